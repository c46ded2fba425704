//! The descriptor tree data model.
//!
//! A tree is a borrowed slice of [`Node`]s, each pairing an optional
//! attribute name with a [`Value`] that references externally owned
//! storage. The codec never allocates: it reads and writes scalar
//! values, string bytes, and buffer bytes through the references the
//! caller put in the tree, and the tree itself lives wherever the
//! caller built it.
//!
//! ## Core Types
//!
//! - [`Node`]: one schema node, an optional name plus a [`Value`]
//! - [`Value`]: typed reference to external storage, scalar or composite
//! - [`StrBuf`]: fixed-capacity string storage with a live length
//! - [`ByteBuf`]: fixed-capacity binary storage with a live byte count
//!
//! ## Shared storage
//!
//! Serialization reads through the tree and deserialization writes
//! through it, so storage is bound as [`Cell`] references. Binding a
//! `&mut` exclusively borrows the underlying variable for the tree's
//! lifetime; all later access goes through the tree. `Cell` makes a
//! tree `!Sync`, so two threads cannot touch the same tree, which is
//! exactly the sharing rule the codec requires. Distinct trees over
//! distinct storage are fully independent.
//!
//! ## Examples
//!
//! ```rust
//! use stackjson::{Node, Options, StrBuf, Value};
//!
//! let mut count = 123i64;
//! let mut flag = true;
//! let mut text = [0u8; 8];
//! let name = StrBuf::new(&mut text);
//! name.set("abc").unwrap();
//!
//! let tree = [
//!     Node::named("count", Value::signed(&mut count)),
//!     Node::named("flag", Value::boolean(&mut flag)),
//!     Node::named("name", Value::string(&name)),
//! ];
//!
//! let json = stackjson::serialize_to_string(&tree, &Options::new()).unwrap();
//! assert_eq!(json, r#"{"count":123,"flag":true,"name":"abc"}"#);
//! ```

use core::cell::Cell;

use crate::error::{Error, Result};

/// One schema node: an optional attribute name and a typed value.
///
/// Nodes inside an object must be named; array elements need no name
/// and any name they carry is ignored when the array is emitted.
///
/// # Examples
///
/// ```rust
/// use stackjson::{Node, Value};
///
/// let mut x = 0u64;
/// let node = Node::named("x", Value::unsigned(&mut x));
/// assert_eq!(node.name, Some("x"));
/// ```
#[derive(Clone, Debug)]
pub struct Node<'a> {
    /// Attribute name, the JSON object key. Required for object
    /// members, unused for array elements.
    pub name: Option<&'a str>,
    /// The typed storage reference.
    pub value: Value<'a>,
}

impl<'a> Node<'a> {
    /// Creates a named node for use inside an object.
    #[must_use]
    pub const fn named(name: &'a str, value: Value<'a>) -> Self {
        Node {
            name: Some(name),
            value,
        }
    }

    /// Creates an unnamed node for use as an array element.
    #[must_use]
    pub const fn unnamed(value: Value<'a>) -> Self {
        Node { name: None, value }
    }
}

/// A typed reference to externally owned storage.
///
/// Scalar variants reference a single value; slice variants reference a
/// homogeneous run of values that serializes as a JSON array of
/// primitives; [`Str`](Value::Str) and [`Bytes`](Value::Bytes) reference
/// fixed-capacity buffers; [`Object`](Value::Object) and
/// [`Array`](Value::Array) reference child nodes.
///
/// The codec mutates only what a variant points at, never the variant
/// itself: the tree's shape is fixed at construction.
#[derive(Clone, Debug)]
pub enum Value<'a> {
    /// A single signed 64-bit integer.
    Signed(&'a Cell<i64>),
    /// A single unsigned 64-bit integer.
    Unsigned(&'a Cell<u64>),
    /// A single boolean.
    Bool(&'a Cell<bool>),
    /// A run of signed integers, serialized as `[a,b,...]`.
    SignedSlice(&'a [Cell<i64>]),
    /// A run of unsigned integers, serialized as `[a,b,...]`.
    UnsignedSlice(&'a [Cell<u64>]),
    /// A run of booleans, serialized as `[true,false,...]`.
    BoolSlice(&'a [Cell<bool>]),
    /// Fixed-capacity string storage.
    Str(&'a StrBuf<'a>),
    /// Fixed-capacity binary storage, serialized as a base64 string.
    Bytes(&'a ByteBuf<'a>),
    /// A JSON object over named child nodes.
    Object(&'a [Node<'a>]),
    /// A JSON array over child nodes, of which the first `used` are
    /// live. Deserialization rewrites `used` to the element count it
    /// consumed.
    Array {
        elements: &'a [Node<'a>],
        used: Cell<usize>,
    },
}

impl<'a> Value<'a> {
    /// Binds a signed integer variable.
    #[must_use]
    pub fn signed(storage: &'a mut i64) -> Self {
        Value::Signed(Cell::from_mut(storage))
    }

    /// Binds an unsigned integer variable.
    #[must_use]
    pub fn unsigned(storage: &'a mut u64) -> Self {
        Value::Unsigned(Cell::from_mut(storage))
    }

    /// Binds a boolean variable.
    #[must_use]
    pub fn boolean(storage: &'a mut bool) -> Self {
        Value::Bool(Cell::from_mut(storage))
    }

    /// Binds a slice of signed integers. Every element is live; pass a
    /// subslice to serialize fewer.
    #[must_use]
    pub fn signed_slice(storage: &'a mut [i64]) -> Self {
        Value::SignedSlice(Cell::from_mut(storage).as_slice_of_cells())
    }

    /// Binds a slice of unsigned integers.
    #[must_use]
    pub fn unsigned_slice(storage: &'a mut [u64]) -> Self {
        Value::UnsignedSlice(Cell::from_mut(storage).as_slice_of_cells())
    }

    /// Binds a slice of booleans.
    #[must_use]
    pub fn bool_slice(storage: &'a mut [bool]) -> Self {
        Value::BoolSlice(Cell::from_mut(storage).as_slice_of_cells())
    }

    /// References string storage.
    #[must_use]
    pub const fn string(buf: &'a StrBuf<'a>) -> Self {
        Value::Str(buf)
    }

    /// References binary storage.
    #[must_use]
    pub const fn bytes(buf: &'a ByteBuf<'a>) -> Self {
        Value::Bytes(buf)
    }

    /// References object members.
    #[must_use]
    pub const fn object(children: &'a [Node<'a>]) -> Self {
        Value::Object(children)
    }

    /// References array elements, all live initially.
    #[must_use]
    pub const fn array(elements: &'a [Node<'a>]) -> Self {
        Value::Array {
            elements,
            used: Cell::new(elements.len()),
        }
    }

    /// Returns `true` for [`Value::Object`].
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` for the two composite variants.
    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array { .. })
    }

    /// Returns the child slice of an object.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&'a [Node<'a>]> {
        match self {
            Value::Object(children) => Some(children),
            _ => None,
        }
    }

    /// A short name for the variant.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Value::Signed(_) => "signed",
            Value::Unsigned(_) => "unsigned",
            Value::Bool(_) => "bool",
            Value::SignedSlice(_) => "signed array",
            Value::UnsignedSlice(_) => "unsigned array",
            Value::BoolSlice(_) => "bool array",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Object(_) => "object",
            Value::Array { .. } => "array",
        }
    }
}

/// The live elements of an array value, validated against the slot
/// count.
pub(crate) fn live_elements<'a>(
    elements: &'a [Node<'a>],
    used: &Cell<usize>,
) -> Result<&'a [Node<'a>]> {
    elements.get(..used.get()).ok_or(Error::Config)
}

/// Fixed-capacity string storage with a live length.
///
/// Capacity is the size of the backing slice. A stored string always
/// leaves one byte of headroom (`len < capacity`), the same bound the
/// deserializer enforces when accepting a JSON string, so any value a
/// `StrBuf` holds can round-trip. Zero-capacity storage is
/// serialize-only and permanently empty.
///
/// # Examples
///
/// ```rust
/// use stackjson::StrBuf;
///
/// let mut storage = [0u8; 6];
/// let buf = StrBuf::new(&mut storage);
/// buf.set("HELLO").unwrap();
/// assert_eq!(buf.len(), 5);
/// assert!(buf.eq_bytes(b"HELLO"));
/// assert!(buf.set("TOO LONG").is_err());
/// ```
#[derive(Debug)]
pub struct StrBuf<'a> {
    bytes: &'a [Cell<u8>],
    len: Cell<usize>,
}

impl<'a> StrBuf<'a> {
    /// Binds `storage` as string memory, initially empty.
    #[must_use]
    pub fn new(storage: &'a mut [u8]) -> Self {
        StrBuf {
            bytes: Cell::from_mut(storage).as_slice_of_cells(),
            len: Cell::new(0),
        }
    }

    /// Replaces the contents with `text`.
    ///
    /// Fails with [`Error::Space`] when `text.len() >= capacity`; on
    /// failure the previous contents stay in place.
    pub fn set(&self, text: &str) -> Result<()> {
        self.set_bytes(text.as_bytes())
    }

    /// [`set`](Self::set) for raw bytes. JSON escape sequences are not
    /// interpreted anywhere in this crate, so string storage is byte
    /// storage.
    pub fn set_bytes(&self, text: &[u8]) -> Result<()> {
        if text.len() >= self.bytes.len() {
            return Err(Error::Space);
        }
        for (cell, &byte) in self.bytes.iter().zip(text) {
            cell.set(byte);
        }
        self.len.set(text.len());
        Ok(())
    }

    /// Current length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// Size of the backing storage in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len.get() == 0
    }

    /// Empties the string. The backing bytes are left as they were.
    pub fn clear(&self) {
        self.len.set(0);
    }

    /// Copies the contents into `out`, returning the length copied.
    ///
    /// Fails with [`Error::Space`] when `out` is too small.
    pub fn copy_to(&self, out: &mut [u8]) -> Result<usize> {
        let live = self.live();
        let out = out.get_mut(..live.len()).ok_or(Error::Space)?;
        for (byte, cell) in out.iter_mut().zip(live) {
            *byte = cell.get();
        }
        Ok(live.len())
    }

    /// Compares the contents against `other`.
    #[must_use]
    pub fn eq_bytes(&self, other: &[u8]) -> bool {
        let live = self.live();
        live.len() == other.len()
            && live.iter().zip(other).all(|(cell, &byte)| cell.get() == byte)
    }

    /// Copies the contents into a fresh `Vec`.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.live().iter().map(Cell::get).collect()
    }

    /// The live bytes.
    #[inline]
    pub(crate) fn live(&self) -> &'a [Cell<u8>] {
        &self.bytes[..self.len.get()]
    }
}

impl PartialEq for StrBuf<'_> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.live(), other.live());
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.get() == y.get())
    }
}

/// Fixed-capacity binary storage with a live byte count.
///
/// Serializes as a base64 string over the first `used` bytes;
/// deserialization decodes into the full capacity and rewrites `used`.
///
/// # Examples
///
/// ```rust
/// use stackjson::ByteBuf;
///
/// let mut storage = [0u8; 8];
/// let buf = ByteBuf::new(&mut storage);
/// buf.set(b"HELLO\0").unwrap();
/// assert_eq!(buf.used(), 6);
/// assert!(buf.set(&[0; 9]).is_err());
/// ```
#[derive(Debug)]
pub struct ByteBuf<'a> {
    bytes: &'a [Cell<u8>],
    used: Cell<usize>,
}

impl<'a> ByteBuf<'a> {
    /// Binds `storage` as binary memory, initially empty.
    #[must_use]
    pub fn new(storage: &'a mut [u8]) -> Self {
        ByteBuf {
            bytes: Cell::from_mut(storage).as_slice_of_cells(),
            used: Cell::new(0),
        }
    }

    /// Replaces the contents with `data`.
    ///
    /// Fails with [`Error::Space`] when `data.len() > capacity`; on
    /// failure the previous contents stay in place.
    pub fn set(&self, data: &[u8]) -> Result<()> {
        if data.len() > self.bytes.len() {
            return Err(Error::Space);
        }
        for (cell, &byte) in self.bytes.iter().zip(data) {
            cell.set(byte);
        }
        self.used.set(data.len());
        Ok(())
    }

    /// Number of live bytes.
    #[inline]
    #[must_use]
    pub fn used(&self) -> usize {
        self.used.get()
    }

    /// Size of the backing storage in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.get() == 0
    }

    /// Empties the buffer. The backing bytes are left as they were.
    pub fn clear(&self) {
        self.used.set(0);
    }

    /// Copies the contents into `out`, returning the length copied.
    ///
    /// Fails with [`Error::Space`] when `out` is too small.
    pub fn copy_to(&self, out: &mut [u8]) -> Result<usize> {
        let live = self.live();
        let out = out.get_mut(..live.len()).ok_or(Error::Space)?;
        for (byte, cell) in out.iter_mut().zip(live) {
            *byte = cell.get();
        }
        Ok(live.len())
    }

    /// Compares the contents against `other`.
    #[must_use]
    pub fn eq_bytes(&self, other: &[u8]) -> bool {
        let live = self.live();
        live.len() == other.len()
            && live.iter().zip(other).all(|(cell, &byte)| cell.get() == byte)
    }

    /// Copies the contents into a fresh `Vec`.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.live().iter().map(Cell::get).collect()
    }

    /// The live bytes.
    #[inline]
    pub(crate) fn live(&self) -> &'a [Cell<u8>] {
        &self.bytes[..self.used.get()]
    }

    /// The full backing storage, the deserializer's decode target.
    #[inline]
    pub(crate) fn cells(&self) -> &'a [Cell<u8>] {
        self.bytes
    }

    /// Rewrites the live count after the codec filled the storage
    /// directly.
    #[inline]
    pub(crate) fn set_used(&self, used: usize) {
        debug_assert!(used <= self.bytes.len());
        self.used.set(used);
    }
}

impl PartialEq for ByteBuf<'_> {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.live(), other.live());
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.get() == y.get())
    }
}
