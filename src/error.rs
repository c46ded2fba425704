//! Error types for JSON serialization and deserialization.
//!
//! Every fallible operation in this crate reports one of the [`Error`]
//! kinds below. Errors are plain discriminants with no payload so they
//! stay `Copy` and allocation-free, and every entry point stops at the
//! first failure it encounters.
//!
//! ## Error Categories
//!
//! - **Capacity**: [`Error::Space`] (output or token array too small),
//!   [`Error::Depth`] (nesting beyond the configured limit)
//! - **Input**: [`Error::Parse`] (malformed JSON), [`Error::MoreData`]
//!   (truncated JSON), [`Error::Format`] (malformed encoded payloads)
//! - **Shape**: [`Error::Type`] (token does not match the declared node),
//!   [`Error::Number`] (numeric text out of range for the declared width)
//! - **Setup**: [`Error::Config`] (inconsistent tree declaration),
//!   [`Error::Version`] (unset crate version), [`Error::Disabled`]
//!   (operation requires a disabled cargo feature)
//!
//! ## Examples
//!
//! ```rust
//! use stackjson::{Error, Node, Options};
//!
//! // A bare scalar is not a JSON document this codec accepts.
//! let tree: [Node; 0] = [];
//! let result = stackjson::deserialize_str(&tree, "42", &Options::new());
//! assert_eq!(result, Err(Error::Parse));
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur during serialization,
/// deserialization, and tree traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Internal invariant violation. Seeing this is a bug in the crate.
    #[error("unknown internal error")]
    Unknown,

    /// Nesting depth exceeded [`Options::max_depth`](crate::Options::max_depth).
    #[error("nesting depth limit exceeded")]
    Depth,

    /// Malformed encoded data: a base64 payload with invalid characters,
    /// a decoded payload larger than its destination, or (with `std`)
    /// serialized output that is not valid UTF-8.
    #[error("malformed encoded data")]
    Format,

    /// Destination too small: the output byte slice, a token array, or a
    /// node pool ran out of room.
    #[error("insufficient space in destination")]
    Space,

    /// The operation requires a cargo feature that is compiled out.
    #[error("operation disabled by crate features")]
    Disabled,

    /// The input is not syntactically valid JSON.
    #[error("invalid JSON syntax")]
    Parse,

    /// The input ends before the JSON document is complete.
    #[error("truncated JSON document")]
    MoreData,

    /// A JSON token cannot be stored in the node declared at its position.
    #[error("token does not match declared node type")]
    Type,

    /// Numeric text does not fit the declared integer width.
    #[error("number out of range")]
    Number,

    /// The crate version is unset (0.0.0).
    #[error("crate version is unset")]
    Version,

    /// The declared tree is internally inconsistent, e.g. an array whose
    /// live count exceeds its element slots.
    #[error("inconsistent tree declaration")]
    Config,
}

pub type Result<T> = core::result::Result<T, Error>;
