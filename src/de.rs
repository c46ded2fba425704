//! Token-driven deserialization into descriptor trees.
//!
//! The deserializer walks a token array against a tree: each JSON
//! object key is looked up among the declared nodes by exact byte
//! comparison of its raw span, matched values are converted into the
//! node's storage, and unknown keys are skipped over by computing the
//! token distance of their value subtree. Unknown keys are a tolerated
//! condition, never an error, which is what makes a declared tree a
//! stable schema against evolving documents.
//!
//! Matching is partial-is-valid: keys absent from the document leave
//! their nodes untouched, and a failure partway through leaves the
//! already-matched values in place. Callers that need all-or-nothing
//! must keep a copy.
//!
//! The root token must be an object (or [`TokenKind::Undefined`],
//! which is an empty input and a successful no-op). Conversion rules
//! per token kind are strict: primitives into the matching scalar
//! kind only, `null` never accepted, strings into string or byte
//! storage, containers into the matching composite. A JSON array maps
//! only onto an [`Array`](crate::Value::Array) node, positionally,
//! rewriting the node's live count.
//!
//! ## Examples
//!
//! ```rust
//! use stackjson::{deserialize_str, Node, Options, Value};
//!
//! let mut a = 1i64;
//! let mut b = 2i64;
//! let tree = [
//!     Node::named("a", Value::signed(&mut a)),
//!     Node::named("b", Value::signed(&mut b)),
//! ];
//!
//! // "b" keeps its value; "ignored" is skipped.
//! let consumed =
//!     deserialize_str(&tree, r#"{"a":4,"ignored":[1,2]}"#, &Options::new()).unwrap();
//! assert_eq!(consumed, 7);
//!
//! let Value::Signed(a) = &tree[0].value else { unreachable!() };
//! let Value::Signed(b) = &tree[1].value else { unreachable!() };
//! assert_eq!((a.get(), b.get()), (4, 2));
//! ```

use crate::base64;
use crate::error::{Error, Result};
use crate::num;
use crate::options::Options;
use crate::token::{Token, TokenKind};
use crate::value::{Node, Value};

pub(crate) struct Deserializer<'o, 's, 't> {
    tokens: &'t [Token],
    text: &'s [u8],
    options: &'o Options,
}

/// The node whose name equals the raw key span, if any. Escape
/// sequences are not interpreted on either side.
fn find<'n, 'a>(children: &'n [Node<'a>], key: &[u8]) -> Option<&'n Node<'a>> {
    children
        .iter()
        .find(|node| node.name.is_some_and(|name| name.as_bytes() == key))
}

impl<'o, 's, 't> Deserializer<'o, 's, 't> {
    pub(crate) fn new(tokens: &'t [Token], text: &'s [u8], options: &'o Options) -> Self {
        Deserializer {
            tokens,
            text,
            options,
        }
    }

    /// Matches the document root against the tree and returns the
    /// number of tokens consumed.
    pub(crate) fn run(&self, tree: &[Node]) -> Result<usize> {
        let Some(root) = self.tokens.first() else {
            return Ok(0);
        };
        match root.kind {
            TokenKind::Undefined => Ok(0),
            TokenKind::Object => self.match_object(tree, 0, 0),
            TokenKind::Array => Err(Error::Type),
            TokenKind::String | TokenKind::Primitive => Err(Error::Parse),
        }
    }

    /// The token at `at`, with both the slice end and the zeroed tail
    /// folded into `None`.
    fn token(&self, at: usize) -> Option<Token> {
        self.tokens
            .get(at)
            .copied()
            .filter(|token| token.kind != TokenKind::Undefined)
    }

    /// Matches the object token at `at` against `children`. Returns
    /// the subtree's token count, the object token included.
    fn match_object(&self, children: &[Node], at: usize, depth: usize) -> Result<usize> {
        if self.options.depth_exceeded(depth) {
            return Err(Error::Depth);
        }
        let pairs = self.tokens[at].children;
        let mut cursor = at + 1;
        for _ in 0..pairs {
            // Running out of tokens ends matching without error.
            let Some(key) = self.token(cursor) else {
                break;
            };
            if key.kind != TokenKind::String {
                return Err(Error::Parse);
            }
            if self.token(cursor + 1).is_none() {
                return Err(Error::MoreData);
            }
            let span = key.span(self.text).ok_or(Error::Parse)?;
            cursor += 1 + match find(children, span) {
                Some(node) => self.convert(node, cursor + 1, depth)?,
                None => self.distance(cursor + 1, depth + 1)?,
            };
        }
        Ok(cursor - at)
    }

    /// Converts the value token at `at` into `node`'s storage. Returns
    /// the value subtree's token count.
    fn convert(&self, node: &Node, at: usize, depth: usize) -> Result<usize> {
        let token = self.token(at).ok_or(Error::MoreData)?;
        let span = token.span(self.text).ok_or(Error::Parse)?;
        match token.kind {
            TokenKind::Object => {
                let Value::Object(children) = &node.value else {
                    return Err(Error::Type);
                };
                self.match_object(children, at, depth + 1)
            }
            TokenKind::Array => self.match_array(node, at, depth + 1),
            TokenKind::String => {
                self.store_string(node, span)?;
                Ok(1)
            }
            TokenKind::Primitive => {
                self.store_primitive(node, span)?;
                Ok(1)
            }
            TokenKind::Undefined => Err(Error::Unknown),
        }
    }

    /// Fills array slots positionally from the array token at `at`,
    /// rewriting the node's live count.
    fn match_array(&self, node: &Node, at: usize, depth: usize) -> Result<usize> {
        let Value::Array { elements, used } = &node.value else {
            return Err(Error::Type);
        };
        if self.options.depth_exceeded(depth) {
            return Err(Error::Depth);
        }
        used.set(0);
        let count = self.tokens[at].children;
        let mut cursor = at + 1;
        let mut filled = 0;
        for _ in 0..count {
            if self.token(cursor).is_none() {
                break;
            }
            let slot = elements.get(filled).ok_or(Error::Space)?;
            cursor += self.convert(slot, cursor, depth)?;
            filled += 1;
        }
        used.set(filled);
        Ok(cursor - at)
    }

    fn store_string(&self, node: &Node, span: &[u8]) -> Result<()> {
        match &node.value {
            Value::Bytes(buf) => {
                buf.clear();
                let decoded = base64::decode_cells(span, buf.cells())?;
                buf.set_used(decoded);
                Ok(())
            }
            Value::Str(buf) => {
                // Zero-capacity strings are serialize-only, and a
                // stored string keeps one byte of headroom.
                if span.len() >= buf.capacity() {
                    return Err(Error::Type);
                }
                buf.set_bytes(span)
            }
            _ => Err(Error::Type),
        }
    }

    fn store_primitive(&self, node: &Node, span: &[u8]) -> Result<()> {
        match span.first() {
            Some(b'n') => Err(Error::Type),
            Some(b't' | b'f') => {
                let Value::Bool(cell) = &node.value else {
                    return Err(Error::Type);
                };
                match span {
                    b"true" => cell.set(true),
                    b"false" => cell.set(false),
                    _ => return Err(Error::Type),
                }
                Ok(())
            }
            Some(b'-' | b'0'..=b'9') => match &node.value {
                Value::Unsigned(cell) => {
                    cell.set(num::parse_unsigned(span, 10)?);
                    Ok(())
                }
                Value::Signed(cell) => {
                    cell.set(num::parse_signed(span, 10)?);
                    Ok(())
                }
                _ => Err(Error::Type),
            },
            _ => Err(Error::Parse),
        }
    }

    /// Token count of the value subtree at `at`, used to resume
    /// matching after an unmatched key. Must agree exactly with the
    /// child counts the tokenizer assigned; `depth` is the depth the
    /// subtree root sits at.
    fn distance(&self, at: usize, depth: usize) -> Result<usize> {
        let token = self.token(at).ok_or(Error::MoreData)?;
        match token.kind {
            TokenKind::String | TokenKind::Primitive => Ok(1),
            TokenKind::Object => {
                if self.options.depth_exceeded(depth) {
                    return Err(Error::Depth);
                }
                let mut size = 1;
                for _ in 0..token.children {
                    let key = self.token(at + size).ok_or(Error::MoreData)?;
                    if key.kind != TokenKind::String {
                        return Err(Error::Parse);
                    }
                    size += 1;
                    size += self.distance(at + size, depth + 1)?;
                }
                Ok(size)
            }
            TokenKind::Array => {
                if self.options.depth_exceeded(depth) {
                    return Err(Error::Depth);
                }
                let mut size = 1;
                for _ in 0..token.children {
                    size += self.distance(at + size, depth + 1)?;
                }
                Ok(size)
            }
            TokenKind::Undefined => Err(Error::MoreData),
        }
    }
}
