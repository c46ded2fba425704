//! JSON tokenization into a caller-provided flat token array.
//!
//! [`tokenize`] splits JSON text into [`Token`]s: byte spans tagged
//! with a [`TokenKind`] and a direct child count. There is no token
//! tree; nesting is implicit in span containment, which keeps the pass
//! single-scan and allocation-free. The deserializer consumes only the
//! token array, so callers with their own tokenizer can fill one
//! themselves and skip this module.
//!
//! Conventions:
//!
//! - A string token's span excludes the surrounding quotes; escape
//!   sequences inside are left raw, exactly as they appear in the text.
//! - An object's `children` is its key/value pair count; an array's is
//!   its element count; a string in key position counts its value and
//!   has `children == 1`.
//! - Slots past the last produced token keep their [`Default`] value,
//!   so [`TokenKind::Undefined`] doubles as an end-of-stream sentinel.
//! - One document per input: trailing non-whitespace after the root
//!   value fails with [`Error::Parse`].
//!
//! The pass validates token structure, not the full JSON value
//! grammar. Some malformed documents tokenize successfully; the
//! deserializer reports those when token kinds fail to line up with
//! the declared tree.
//!
//! ## Examples
//!
//! ```rust
//! use stackjson::token::{tokenize, Token, TokenKind};
//!
//! let text = br#"{"x":12}"#;
//! let mut tokens = [Token::default(); 4];
//! let produced = tokenize(text, &mut tokens).unwrap();
//!
//! assert_eq!(produced, 3);
//! assert_eq!(tokens[0].kind, TokenKind::Object);
//! assert_eq!(tokens[0].children, 1);
//! assert_eq!(tokens[1].span(text), Some(&b"x"[..]));
//! assert_eq!(tokens[2].span(text), Some(&b"12"[..]));
//! assert_eq!(tokens[3].kind, TokenKind::Undefined);
//! ```

use crate::error::{Error, Result};

/// Lexical class of one token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenKind {
    /// End-of-stream sentinel; never produced for real input.
    #[default]
    Undefined,
    Object,
    Array,
    String,
    Primitive,
}

/// One lexical unit: a byte span of the source text, its kind, and the
/// number of direct children the tokenizer assigned to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first span byte.
    pub start: usize,
    /// Byte offset one past the last span byte.
    pub end: usize,
    /// Direct child count; see the module docs for per-kind meaning.
    pub children: usize,
}

/// Container tokens carry this `end` while still unclosed. Real spans
/// never reach it.
const OPEN: usize = usize::MAX;

impl Token {
    /// The token's bytes within `text`, or `None` when the span does
    /// not fit `text`.
    #[inline]
    #[must_use]
    pub fn span<'s>(&self, text: &'s [u8]) -> Option<&'s [u8]> {
        text.get(self.start..self.end)
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.end == OPEN
    }
}

/// Tokenizes `text` into `tokens`, returning the number of tokens
/// produced. Unused trailing slots are reset to [`Token::default`].
///
/// Fails with [`Error::Space`] when `tokens` is too small,
/// [`Error::Parse`] on invalid syntax, and [`Error::MoreData`] when the
/// text ends inside an unclosed string or container. Empty input
/// produces zero tokens.
///
/// # Examples
///
/// ```rust
/// use stackjson::token::{tokenize, Token};
/// use stackjson::Error;
///
/// let mut tokens = [Token::default(); 8];
/// assert_eq!(tokenize(br#"[1,2,3]"#, &mut tokens), Ok(4));
/// assert_eq!(tokenize(br#"[1,2"#, &mut tokens), Err(Error::MoreData));
/// assert_eq!(tokenize(br#"[1,2}"#, &mut tokens), Err(Error::Parse));
/// ```
pub fn tokenize(text: &[u8], tokens: &mut [Token]) -> Result<usize> {
    for slot in tokens.iter_mut() {
        *slot = Token::default();
    }
    Tokenizer {
        text,
        tokens,
        pos: 0,
        next: 0,
        parent: None,
    }
    .run()
}

struct Tokenizer<'t, 's> {
    text: &'s [u8],
    tokens: &'t mut [Token],
    /// Cursor into `text`.
    pos: usize,
    /// Count of tokens produced so far.
    next: usize,
    /// Token currently collecting children, if any.
    parent: Option<usize>,
}

impl Tokenizer<'_, '_> {
    fn run(mut self) -> Result<usize> {
        while self.pos < self.text.len() {
            match self.text[self.pos] {
                b'{' => self.open(TokenKind::Object)?,
                b'[' => self.open(TokenKind::Array)?,
                b'}' => self.close(TokenKind::Object)?,
                b']' => self.close(TokenKind::Array)?,
                b'"' => self.string()?,
                b'\t' | b'\r' | b'\n' | b' ' => {}
                // The value that follows a key belongs to the key.
                b':' => self.parent = self.next.checked_sub(1),
                b',' => self.comma(),
                b'-' | b'0'..=b'9' | b't' | b'f' | b'n' => self.primitive()?,
                _ => return Err(Error::Parse),
            }
            self.pos += 1;
        }
        if self.tokens[..self.next].iter().any(Token::is_open) {
            return Err(Error::MoreData);
        }
        Ok(self.next)
    }

    /// Appends a token. A second token at top level means a second
    /// document.
    fn push(&mut self, kind: TokenKind, start: usize, end: usize) -> Result<usize> {
        if self.parent.is_none() && self.next > 0 {
            return Err(Error::Parse);
        }
        let at = self.next;
        let slot = self.tokens.get_mut(at).ok_or(Error::Space)?;
        *slot = Token {
            kind,
            start,
            end,
            children: 0,
        };
        self.next = at + 1;
        Ok(at)
    }

    fn bump_parent(&mut self) {
        if let Some(at) = self.parent {
            self.tokens[at].children += 1;
        }
    }

    fn open(&mut self, kind: TokenKind) -> Result<()> {
        self.bump_parent();
        let at = self.push(kind, self.pos, OPEN)?;
        self.parent = Some(at);
        Ok(())
    }

    fn close(&mut self, kind: TokenKind) -> Result<()> {
        // The innermost open token must match the closing bracket.
        let mut at = self.next;
        loop {
            if at == 0 {
                return Err(Error::Parse);
            }
            at -= 1;
            if self.tokens[at].is_open() {
                if self.tokens[at].kind != kind {
                    return Err(Error::Parse);
                }
                self.tokens[at].end = self.pos + 1;
                break;
            }
        }
        self.parent = self.enclosing_open(at);
        Ok(())
    }

    /// After a comma the next child belongs to the enclosing container,
    /// not to the key the previous value was attached to.
    fn comma(&mut self) {
        if let Some(at) = self.parent {
            if !matches!(self.tokens[at].kind, TokenKind::Object | TokenKind::Array) {
                self.parent = self.enclosing_open(self.next);
            }
        }
    }

    fn enclosing_open(&self, below: usize) -> Option<usize> {
        (0..below).rev().find(|&at| self.tokens[at].is_open())
    }

    fn string(&mut self) -> Result<()> {
        let start = self.pos + 1;
        let mut at = start;
        while at < self.text.len() {
            match self.text[at] {
                b'"' => {
                    self.bump_parent();
                    self.push(TokenKind::String, start, at)?;
                    self.pos = at;
                    return Ok(());
                }
                b'\\' => {
                    at += 1;
                    match self.text.get(at) {
                        Some(b'"' | b'/' | b'\\' | b'b' | b'f' | b'n' | b'r' | b't') => {}
                        Some(b'u') => {
                            let hex = self.text.get(at + 1..at + 5).ok_or(Error::MoreData)?;
                            if !hex.iter().all(u8::is_ascii_hexdigit) {
                                return Err(Error::Parse);
                            }
                            at += 4;
                        }
                        Some(_) => return Err(Error::Parse),
                        None => return Err(Error::MoreData),
                    }
                }
                // Raw bytes pass through, control characters included;
                // the serializer's escape set is narrow and its output
                // must tokenize back.
                _ => {}
            }
            at += 1;
        }
        Err(Error::MoreData)
    }

    fn primitive(&mut self) -> Result<()> {
        // Directly inside an object this byte sits in key position.
        if let Some(at) = self.parent {
            if self.tokens[at].kind == TokenKind::Object {
                return Err(Error::Parse);
            }
        }
        let start = self.pos;
        let mut at = self.pos;
        while at < self.text.len() {
            match self.text[at] {
                b'\t' | b'\r' | b'\n' | b' ' | b',' | b']' | b'}' | b':' => break,
                c if !(32..127).contains(&c) => return Err(Error::Parse),
                _ => at += 1,
            }
        }
        self.bump_parent();
        self.push(TokenKind::Primitive, start, at)?;
        self.pos = at - 1;
        Ok(())
    }
}
