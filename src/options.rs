//! Configuration options for serialization and deserialization.
//!
//! A single [`Options`] value controls output formatting and the nesting
//! depth limit. The same value is accepted by every entry point so one
//! configuration can drive a measure pass, a write pass, and the
//! deserializer symmetrically.
//!
//! ## Examples
//!
//! ```rust
//! use stackjson::Options;
//!
//! // Compact output, unlimited depth.
//! let options = Options::new();
//!
//! // Indented output, one tab per nesting level.
//! let options = Options::pretty();
//!
//! // Four spaces per level, reject trees deeper than 8.
//! let options = Options::pretty().with_indent("    ").with_max_depth(8);
//! ```

/// Configuration for JSON output formatting and traversal limits.
///
/// # Examples
///
/// ```rust
/// use stackjson::Options;
///
/// let options = Options::new();
/// assert!(!options.pretty);
/// assert_eq!(options.indent, "\t");
/// assert_eq!(options.max_depth, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Emit one indent unit per nesting level, a space after each `:`,
    /// and a newline after every element. Compact mode omits all of it.
    pub pretty: bool,
    /// The per-level indent unit for pretty output.
    pub indent: &'static str,
    /// Maximum nesting depth for serialization, deserialization, and
    /// path retrieval. `0` means unlimited.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            pretty: false,
            indent: "\t",
            max_depth: 0,
        }
    }
}

impl Options {
    /// Creates default options (compact output, tab indent, unlimited depth).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stackjson::Options;
    ///
    /// let options = Options::pretty();
    /// assert!(options.pretty);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        Options {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the per-level indent unit. Only affects pretty output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stackjson::Options;
    ///
    /// let options = Options::pretty().with_indent("  ");
    /// assert_eq!(options.indent, "  ");
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the maximum nesting depth. `0` (the default) means unlimited.
    ///
    /// Exceeding the limit fails with [`Error::Depth`](crate::Error::Depth).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stackjson::Options;
    ///
    /// let options = Options::new().with_max_depth(8);
    /// assert_eq!(options.max_depth, 8);
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// True when `depth` exceeds the configured limit.
    #[inline]
    #[must_use]
    pub(crate) fn depth_exceeded(&self, depth: usize) -> bool {
        self.max_depth != 0 && depth > self.max_depth
    }
}
