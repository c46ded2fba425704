//! # stackjson
//!
//! An allocation-free JSON codec for statically declared data trees.
//!
//! ## What is it for?
//!
//! Firmware and other constrained programs usually know the exact shape
//! of every document they exchange. stackjson turns that knowledge into
//! a declared tree of typed nodes borrowing the program's own
//! variables, then serializes and deserializes through those borrows
//! with no heap, no intermediate value model, and exact buffer
//! accounting.
//!
//! ## Key Features
//!
//! - **Zero allocation**: every byte lands in caller-provided storage;
//!   the heap conveniences are optional and feature-gated
//! - **Measure-only mode**: compute the exact serialized length up
//!   front through the same emission path that later writes the bytes
//! - **Schema-tolerant matching**: unknown keys in incoming documents
//!   are skipped structurally, never an error
//! - **Partial updates**: deserialization writes only the fields the
//!   document carries; everything else keeps its value
//! - **`no_std` ready**: disable the `std` feature and keep the whole
//!   codec
//! - **No unsafe code**: interior mutability through [`core::cell::Cell`]
//!   instead of pointer aliasing
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! stackjson = "0.1"
//! ```
//!
//! Declare a tree over your variables, then move documents through it:
//!
//! ```rust
//! use stackjson::{deserialize_str, field, serialize_to_string, Options, Value};
//!
//! let mut id = 123u64;
//! let mut active = true;
//! let tree = [field!(unsigned id), field!(bool active)];
//!
//! let text = serialize_to_string(&tree, &Options::new()).unwrap();
//! assert_eq!(text, r#"{"id":123,"active":true}"#);
//!
//! // Unknown keys are tolerated; missing keys keep their values.
//! deserialize_str(&tree, r#"{"id":456,"ignored":[1,2]}"#, &Options::new()).unwrap();
//! let Value::Unsigned(id) = &tree[0].value else { unreachable!() };
//! assert_eq!(id.get(), 456);
//! ```
//!
//! ### Without the heap
//!
//! The same codec runs against fixed buffers and a caller-provided
//! token scratch array:
//!
//! ```rust
//! use stackjson::{deserialize_text, field, measure, serialize, Options, Token};
//!
//! let mut reading = 20u64;
//! let tree = [field!(unsigned reading)];
//! let options = Options::new();
//!
//! let need = measure(&tree, &options).unwrap();
//! let mut out = [0u8; 32];
//! let written = serialize(&tree, &mut out, &options).unwrap();
//! assert_eq!(written, need);
//! assert_eq!(&out[..written], br#"{"reading":20}"#);
//!
//! let mut tokens = [Token::default(); 8];
//! deserialize_text(&tree, &mut tokens, br#"{"reading":21}"#, &options).unwrap();
//! ```
//!
//! ### Pretty printing
//!
//! ```rust
//! use stackjson::{field, serialize_to_string, Options};
//!
//! let mut x = 1u64;
//! let tree = [field!(unsigned x)];
//! let text = serialize_to_string(&tree, &Options::pretty()).unwrap();
//! assert_eq!(text, "{\n\t\"x\": 1\n}");
//! ```
//!
//! ## Feature Flags
//!
//! - **`std`** (default): `String`/`Vec` conveniences such as
//!   [`serialize_to_string`] and [`deserialize_str`]
//! - **`escape`** (default): JSON escaping of control and meta
//!   characters in emitted strings; without it such bytes fail with
//!   [`Error::Disabled`]
//! - **`walk`** (default): the [`tree`] module with traversal, path
//!   retrieval, and the compacting pool copy
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All indexing is bounds-checked; output never exceeds the buffer
//!   budget
//! - Proper error propagation with `Result` types; the first failure
//!   in a call is the one reported
//!
//! ## Examples
//!
//! See the `demos/` directory for focused examples:
//!
//! - **`serialize.rs`** - declaring a mixed tree, pretty output, custom
//!   indentation
//! - **`deserialize.rs`** - matching an evolving document against a
//!   fixed schema
//! - **`compact.rs`** - relocating a tree into a contiguous pool
//!
//! Run any example with: `cargo run --example <name>`

#![cfg_attr(not(feature = "std"), no_std)]

pub mod base64;
pub mod de;
pub mod error;
pub mod macros;
pub mod num;
pub mod options;
pub mod ser;
pub mod token;
#[cfg(feature = "walk")]
pub mod tree;
pub mod value;
mod version;

pub use error::{Error, Result};
pub use options::Options;
pub use token::{tokenize, Token, TokenKind};
#[cfg(feature = "walk")]
pub use tree::{compact_into, node_count, retrieve, walk, ChildSpan, PooledNode, PooledValue};
pub use value::{ByteBuf, Node, StrBuf, Value};
pub use version::version;

/// Computes the exact serialized length of `tree` without writing.
///
/// Runs the same emission path as [`serialize`] against a counting
/// sink, so the two can never disagree.
///
/// # Examples
///
/// ```rust
/// use stackjson::{field, measure, Options};
///
/// let mut x = 123u64;
/// let tree = [field!(unsigned x)];
/// assert_eq!(measure(&tree, &Options::new()), Ok(9)); // {"x":123}
/// ```
///
/// # Errors
///
/// Fails the way [`serialize`] fails, except that no buffer is
/// involved so [`Error::Space`] cannot occur.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn measure(tree: &[Node], options: &Options) -> Result<usize> {
    ser::Serializer::new(ser::Writer::count(), options).run(tree)
}

/// Serializes `tree` as one JSON object into `out`.
///
/// Returns the number of bytes written. The output is compact unless
/// the `pretty` flag in [`Options`] is set. Nothing past the returned
/// length is touched.
///
/// # Examples
///
/// ```rust
/// use stackjson::{field, serialize, Options};
///
/// let mut x = -5i64;
/// let tree = [field!(signed x)];
/// let mut out = [0u8; 16];
/// let written = serialize(&tree, &mut out, &Options::new()).unwrap();
/// assert_eq!(&out[..written], br#"{"x":-5}"#);
/// ```
///
/// # Errors
///
/// [`Error::Space`] if `out` is too small ([`measure`] gives the exact
/// need), [`Error::Depth`] past a nonzero depth limit,
/// [`Error::Config`] for a malformed tree (an unnamed object member or
/// an overfull array), and [`Error::Disabled`] when a string needs
/// escaping but the `escape` feature is off.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize(tree: &[Node], out: &mut [u8], options: &Options) -> Result<usize> {
    ser::Serializer::new(ser::Writer::fill(out), options).run(tree)
}

/// Serializes `tree` to a freshly measured `String`.
///
/// # Examples
///
/// ```rust
/// use stackjson::{field, serialize_to_string, Options};
///
/// let mut b = true;
/// let tree = [field!(bool b)];
/// let text = serialize_to_string(&tree, &Options::new()).unwrap();
/// assert_eq!(text, r#"{"b":true}"#);
/// ```
///
/// # Errors
///
/// As for [`serialize`].
#[cfg(feature = "std")]
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_to_string(tree: &[Node], options: &Options) -> Result<String> {
    let length = measure(tree, options)?;
    let mut out = vec![0u8; length];
    serialize(tree, &mut out, options)?;
    String::from_utf8(out).map_err(|_| Error::Format)
}

/// Matches an already tokenized document against `tree`.
///
/// `tokens` comes from [`tokenize`] over the same `text`. Returns the
/// number of tokens consumed; an empty or all-`Undefined` token array
/// consumes zero and mutates nothing.
///
/// # Errors
///
/// [`Error::Type`] for a value of the wrong kind (including an array
/// document root), [`Error::Parse`] for a non-object scalar root or a
/// non-string key, [`Error::Number`] for malformed or overflowing
/// digits, [`Error::MoreData`] for a key whose value never arrived,
/// [`Error::Space`] for more array elements than declared slots, and
/// [`Error::Depth`] past a nonzero depth limit. Values matched before
/// the failure keep their new contents.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize(
    tree: &[Node],
    tokens: &[Token],
    text: &[u8],
    options: &Options,
) -> Result<usize> {
    de::Deserializer::new(tokens, text, options).run(tree)
}

/// Tokenizes `text` into the scratch `tokens` and matches it against
/// `tree`.
///
/// # Examples
///
/// ```rust
/// use stackjson::{deserialize_text, field, Options, Token};
///
/// let mut x = 0u64;
/// let tree = [field!(unsigned x)];
/// let mut tokens = [Token::default(); 8];
/// let consumed =
///     deserialize_text(&tree, &mut tokens, br#"{"x":7}"#, &Options::new()).unwrap();
/// assert_eq!(consumed, 3);
/// ```
///
/// # Errors
///
/// Tokenizer failures ([`Error::Space`] when `tokens` runs out,
/// [`Error::Parse`], [`Error::MoreData`]) surface before any value is
/// written; matching then fails as for [`deserialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize_text(
    tree: &[Node],
    tokens: &mut [Token],
    text: &[u8],
    options: &Options,
) -> Result<usize> {
    let produced = token::tokenize(text, tokens)?;
    deserialize(tree, &tokens[..produced], text, options)
}

/// Deserializes a string document against `tree`, allocating the token
/// scratch internally.
///
/// One token never spans fewer bytes than one, so a scratch of
/// `text.len()` tokens always suffices.
///
/// # Examples
///
/// ```rust
/// use stackjson::{deserialize_str, field, Options, Value};
///
/// let mut x = 0u64;
/// let tree = [field!(unsigned x)];
/// deserialize_str(&tree, r#"{"x":42}"#, &Options::new()).unwrap();
/// let Value::Unsigned(x) = &tree[0].value else { unreachable!() };
/// assert_eq!(x.get(), 42);
/// ```
///
/// # Errors
///
/// As for [`deserialize_text`].
#[cfg(feature = "std")]
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize_str(tree: &[Node], text: &str, options: &Options) -> Result<usize> {
    let mut tokens = vec![Token::default(); text.len()];
    deserialize_text(tree, &mut tokens, text.as_bytes(), options)
}
