//! Tree traversal, path lookup, and the compacting pool copy.
//!
//! Everything here operates on declared [`Node`] trees without
//! allocating: the walk recurses over borrowed slices, retrieval
//! resolves a `/`-separated path one segment at a time, and the
//! compacting copy writes into a caller-provided pool.
//!
//! ## Examples
//!
//! ```rust
//! use stackjson::{retrieve, walk, Node, Options, Value};
//!
//! let mut inner = 7u64;
//! let j1 = [Node::named("ul3", Value::unsigned(&mut inner))];
//! let tree = [Node::named("j1", Value::object(&j1))];
//!
//! let found = retrieve(&tree, "j1/ul3", &Options::new()).unwrap();
//! assert!(found.is_some());
//!
//! // A miss is not an error.
//! assert!(retrieve(&tree, "j1/missing", &Options::new()).unwrap().is_none());
//!
//! let mut names = Vec::new();
//! walk(&tree, |node| {
//!     names.push(node.name.unwrap_or(""));
//!     Ok(())
//! })
//! .unwrap();
//! assert_eq!(names, ["j1", "ul3"]);
//! ```

use crate::error::{Error, Result};
use crate::options::Options;
use crate::value::{live_elements, Node, Value};

/// Visits every node of `tree` in pre-order, parents before children.
///
/// Array nodes visit only their live elements. The first visitor error
/// aborts the traversal and is returned as-is.
pub fn walk<'a, F>(tree: &[Node<'a>], mut visit: F) -> Result<()>
where
    F: FnMut(&Node<'a>) -> Result<()>,
{
    walk_nodes(tree, &mut visit)
}

fn walk_nodes<'a, F>(nodes: &[Node<'a>], visit: &mut F) -> Result<()>
where
    F: FnMut(&Node<'a>) -> Result<()>,
{
    for node in nodes {
        visit(node)?;
        match &node.value {
            Value::Object(children) => walk_nodes(children, visit)?,
            Value::Array { elements, used } => {
                walk_nodes(live_elements(elements, used)?, visit)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Total number of nodes in `tree`, composites included.
pub fn node_count(tree: &[Node]) -> Result<usize> {
    let mut nodes = 0;
    walk(tree, |_| {
        nodes += 1;
        Ok(())
    })?;
    Ok(nodes)
}

/// Looks up a node by a `/`-separated path of attribute names.
///
/// Empty segments are skipped wherever they appear, so `"/a//b/"`
/// resolves like `"a/b"`. A segment that matches nothing, or an
/// intermediate segment naming a non-object node, yields `Ok(None)`.
/// Descending past a nonzero [`Options::max_depth`] fails with
/// [`Error::Depth`]. Array elements are not addressable by index.
pub fn retrieve<'t, 'a>(
    tree: &'t [Node<'a>],
    path: &str,
    options: &Options,
) -> Result<Option<&'t Node<'a>>> {
    let mut scope = tree;
    let mut depth = 0;
    let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();
    while let Some(segment) = segments.next() {
        if options.depth_exceeded(depth) {
            return Err(Error::Depth);
        }
        let Some(node) = scope.iter().find(|n| n.name == Some(segment)) else {
            return Ok(None);
        };
        if segments.peek().is_none() {
            return Ok(Some(node));
        }
        let Value::Object(children) = &node.value else {
            return Ok(None);
        };
        scope = children;
        depth += 1;
    }
    Ok(None)
}

/// An index range into a compacted pool, identifying one child list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildSpan {
    pub start: usize,
    pub len: usize,
}

impl ChildSpan {
    pub const EMPTY: ChildSpan = ChildSpan { start: 0, len: 0 };
}

/// A node in a compacted pool.
///
/// Leaves keep the source tree's storage references; composites link
/// their children by index range instead of by reference, so a pool is
/// self-contained and can be moved or embedded as a whole.
#[derive(Clone, Debug)]
pub struct PooledNode<'a> {
    pub name: Option<&'a str>,
    pub value: PooledValue<'a>,
}

#[derive(Clone, Debug)]
pub enum PooledValue<'a> {
    /// A scalar, slice, string, or buffer value shared with the source.
    Leaf(Value<'a>),
    Object(ChildSpan),
    Array(ChildSpan),
}

impl<'a> PooledNode<'a> {
    /// An unnamed empty object, for pre-filling pools.
    pub const EMPTY: PooledNode<'a> = PooledNode {
        name: None,
        value: PooledValue::Object(ChildSpan::EMPTY),
    };

    /// Resolves this node's child list within `pool`. `None` for
    /// leaves and for spans that fall outside the pool.
    pub fn children_in<'p>(&self, pool: &'p [PooledNode<'a>]) -> Option<&'p [PooledNode<'a>]> {
        let span = match self.value {
            PooledValue::Object(span) | PooledValue::Array(span) => span,
            PooledValue::Leaf(_) => return None,
        };
        pool.get(span.start..span.start + span.len)
    }
}

/// Copies `tree` into `pool`, compacting arrays to their live elements.
///
/// Every child list lands in one contiguous run, parents always ahead
/// of their children, and composite nodes record their run as a
/// [`ChildSpan`]. Leaf storage is shared with the source tree, so the
/// copy sees later value updates. Returns the number of pool slots
/// used, or [`Error::Space`] if the pool is too small; on error the
/// pool contents are unspecified.
pub fn compact_into<'a>(tree: &[Node<'a>], pool: &mut [PooledNode<'a>]) -> Result<usize> {
    let mut next = 0;
    copy_list(tree, pool, &mut next)?;
    Ok(next)
}

fn copy_list<'a>(
    nodes: &[Node<'a>],
    pool: &mut [PooledNode<'a>],
    next: &mut usize,
) -> Result<ChildSpan> {
    let start = *next;
    let end = start.checked_add(nodes.len()).ok_or(Error::Space)?;
    if end > pool.len() {
        return Err(Error::Space);
    }
    *next = end;
    for (slot, node) in pool[start..end].iter_mut().zip(nodes) {
        slot.name = node.name;
        slot.value = match &node.value {
            // Composite spans are patched once their run is placed.
            Value::Object(_) | Value::Array { .. } => PooledValue::Object(ChildSpan::EMPTY),
            leaf => PooledValue::Leaf(leaf.clone()),
        };
    }
    for (offset, node) in nodes.iter().enumerate() {
        match &node.value {
            Value::Object(children) => {
                let span = copy_list(children, pool, next)?;
                pool[start + offset].value = PooledValue::Object(span);
            }
            Value::Array { elements, used } => {
                let live = live_elements(elements, used)?;
                let span = copy_list(live, pool, next)?;
                pool[start + offset].value = PooledValue::Array(span);
            }
            _ => {}
        }
    }
    Ok(ChildSpan {
        start,
        len: nodes.len(),
    })
}
