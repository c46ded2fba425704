//! JSON serialization of descriptor trees.
//!
//! One emission path serves two sinks: a counting sink for
//! [`measure`](crate::measure) and a bounded fill sink for
//! [`serialize`](crate::serialize). Every byte goes through the same
//! code either way, so the measured length and the written length
//! cannot disagree, and a measure pass makes exact pre-allocation
//! possible before a write pass.
//!
//! The tree is always emitted as one JSON object whose members are the
//! top-level nodes, in declaration order. Pretty output indents with
//! [`Options::indent`](crate::Options::indent) per level, puts a space
//! after each `:`, and a newline after every element; compact output
//! has no whitespace at all. `null` is never produced.
//!
//! ## Examples
//!
//! ```rust
//! use stackjson::{measure, serialize, Node, Options, Value};
//!
//! let mut x = 123i64;
//! let tree = [Node::named("x", Value::signed(&mut x))];
//! let options = Options::new();
//!
//! let len = measure(&tree, &options).unwrap();
//! let mut out = vec![0u8; len];
//! let used = serialize(&tree, &mut out, &options).unwrap();
//!
//! assert_eq!(used, len);
//! assert_eq!(&out[..used], br#"{"x":123}"#);
//! ```

use crate::base64;
use crate::error::{Error, Result};
use crate::num::NumBuf;
use crate::options::Options;
use crate::value::{self, ByteBuf, Node, StrBuf, Value};

/// Where emitted bytes go.
enum Sink<'w> {
    /// Count only, unlimited capacity.
    Count,
    /// Write into a caller slice, failing [`Error::Space`] on overflow.
    Fill(&'w mut [u8]),
}

pub(crate) struct Writer<'w> {
    sink: Sink<'w>,
    used: usize,
}

impl<'w> Writer<'w> {
    pub(crate) fn count() -> Self {
        Writer {
            sink: Sink::Count,
            used: 0,
        }
    }

    pub(crate) fn fill(out: &'w mut [u8]) -> Self {
        Writer {
            sink: Sink::Fill(out),
            used: 0,
        }
    }

    /// Bytes emitted so far.
    pub(crate) fn used(&self) -> usize {
        self.used
    }

    fn push(&mut self, byte: u8) -> Result<()> {
        match &mut self.sink {
            Sink::Count => {
                self.used += 1;
                Ok(())
            }
            Sink::Fill(out) => {
                let slot = out.get_mut(self.used).ok_or(Error::Space)?;
                *slot = byte;
                self.used += 1;
                Ok(())
            }
        }
    }

    fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        match &mut self.sink {
            Sink::Count => {
                self.used += bytes.len();
                Ok(())
            }
            Sink::Fill(out) => {
                let dest = out
                    .get_mut(self.used..self.used + bytes.len())
                    .ok_or(Error::Space)?;
                dest.copy_from_slice(bytes);
                self.used += bytes.len();
                Ok(())
            }
        }
    }
}

pub(crate) struct Serializer<'o, 'w> {
    writer: Writer<'w>,
    options: &'o Options,
}

impl<'o, 'w> Serializer<'o, 'w> {
    pub(crate) fn new(writer: Writer<'w>, options: &'o Options) -> Self {
        Serializer { writer, options }
    }

    /// Emits the whole tree as the root object and returns the byte
    /// count.
    pub(crate) fn run(mut self, tree: &[Node]) -> Result<usize> {
        self.container(tree, false, 0)?;
        Ok(self.writer.used())
    }

    fn container(&mut self, children: &[Node], array: bool, depth: usize) -> Result<()> {
        if self.options.depth_exceeded(depth) {
            return Err(Error::Depth);
        }
        self.indent(depth)?;
        self.writer.push(if array { b'[' } else { b'{' })?;
        self.newline()?;

        for (at, node) in children.iter().enumerate() {
            self.indent(depth + 1)?;
            if !array {
                let name = node.name.ok_or(Error::Config)?;
                self.quoted(name.bytes())?;
                self.writer.push(b':')?;
                self.space()?;
            }
            self.member(node, depth)?;
            if at + 1 != children.len() {
                self.writer.push(b',')?;
            }
            self.newline()?;
        }

        self.indent(depth)?;
        self.writer.push(if array { b']' } else { b'}' })
    }

    /// One member's value. Composites start their own line in pretty
    /// mode; scalar runs stay on the member's line.
    fn member(&mut self, node: &Node, depth: usize) -> Result<()> {
        match &node.value {
            Value::Object(children) => {
                self.newline()?;
                self.container(children, false, depth + 1)
            }
            Value::Array { elements, used } => {
                let live = value::live_elements(elements, used)?;
                self.newline()?;
                self.container(live, true, depth + 1)
            }
            Value::Signed(cell) => self.signed(cell.get()),
            Value::Unsigned(cell) => self.unsigned(cell.get()),
            Value::Bool(cell) => self.boolean(cell.get()),
            Value::SignedSlice(cells) => {
                self.scalar_run(cells.len(), |ser, at| ser.signed(cells[at].get()))
            }
            Value::UnsignedSlice(cells) => {
                self.scalar_run(cells.len(), |ser, at| ser.unsigned(cells[at].get()))
            }
            Value::BoolSlice(cells) => {
                self.scalar_run(cells.len(), |ser, at| ser.boolean(cells[at].get()))
            }
            Value::Str(buf) => self.string(buf),
            Value::Bytes(buf) => self.bytes(buf),
        }
    }

    /// `[a,b,c]` over a run of scalars, no whitespace in either mode.
    fn scalar_run<F>(&mut self, len: usize, mut emit: F) -> Result<()>
    where
        F: FnMut(&mut Self, usize) -> Result<()>,
    {
        self.writer.push(b'[')?;
        for at in 0..len {
            if at > 0 {
                self.writer.push(b',')?;
            }
            emit(self, at)?;
        }
        self.writer.push(b']')
    }

    fn signed(&mut self, v: i64) -> Result<()> {
        let mut buf = NumBuf::new();
        self.writer.push_bytes(buf.format_signed(v, 10))
    }

    fn unsigned(&mut self, v: u64) -> Result<()> {
        let mut buf = NumBuf::new();
        self.writer.push_bytes(buf.format_unsigned(v, 10))
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.writer.push_bytes(if v { b"true" } else { b"false" })
    }

    fn string(&mut self, buf: &StrBuf) -> Result<()> {
        self.quoted(buf.live().iter().map(|cell| cell.get()))
    }

    fn bytes(&mut self, buf: &ByteBuf) -> Result<()> {
        self.writer.push(b'"')?;
        let mut scratch = [0u8; 3];
        for chunk in buf.live().chunks(3) {
            for (at, cell) in chunk.iter().enumerate() {
                scratch[at] = cell.get();
            }
            let group = base64::encode_group(&scratch[..chunk.len()]);
            self.writer.push_bytes(&group)?;
        }
        self.writer.push(b'"')
    }

    fn quoted<I>(&mut self, bytes: I) -> Result<()>
    where
        I: IntoIterator<Item = u8>,
    {
        self.writer.push(b'"')?;
        for byte in bytes {
            self.string_byte(byte)?;
        }
        self.writer.push(b'"')
    }

    #[cfg(feature = "escape")]
    fn string_byte(&mut self, byte: u8) -> Result<()> {
        let escape = match byte {
            0x08 => Some(b'b'),
            0x0C => Some(b'f'),
            b'\n' => Some(b'n'),
            b'\r' => Some(b'r'),
            b'\t' => Some(b't'),
            b'\\' => Some(b'\\'),
            b'"' => Some(b'"'),
            _ => None,
        };
        match escape {
            Some(symbol) => {
                self.writer.push(b'\\')?;
                self.writer.push(symbol)
            }
            None => self.writer.push(byte),
        }
    }

    /// Without the `escape` feature a byte that needs escaping cannot
    /// be emitted as valid JSON.
    #[cfg(not(feature = "escape"))]
    fn string_byte(&mut self, byte: u8) -> Result<()> {
        if matches!(byte, 0x08 | 0x0C | b'\n' | b'\r' | b'\t' | b'\\' | b'"') {
            return Err(Error::Disabled);
        }
        self.writer.push(byte)
    }

    fn indent(&mut self, depth: usize) -> Result<()> {
        if !self.options.pretty {
            return Ok(());
        }
        for _ in 0..depth {
            self.writer.push_bytes(self.options.indent.as_bytes())?;
        }
        Ok(())
    }

    fn space(&mut self) -> Result<()> {
        if !self.options.pretty {
            return Ok(());
        }
        self.writer.push(b' ')
    }

    fn newline(&mut self) -> Result<()> {
        if !self.options.pretty {
            return Ok(());
        }
        self.writer.push(b'\n')
    }
}
