//! Selector-driven rebuild of a document tree.
//!
//! `prune` copies every node the selector does not reach. At the last
//! `Elements` step it asks `keep` about each element and drops the ones it
//! rejects. Removing array elements is the only mutation it can perform.

use crate::pointer::Pointer;
use modsan_types::ids::{KEY_DEPENDENCIES, KEY_VARIANTS};
use modsan_types::{Node, NodeKind, Object, SchemaError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step<'a> {
    /// Descend into this key of an object. A missing key is left alone.
    Field(&'a str),
    /// Visit every element of an array.
    Elements,
}

/// `variants / * / dependencies / *`
pub const DEPENDENCY_ENTRIES: &[Step<'static>] = &[
    Step::Field(KEY_VARIANTS),
    Step::Elements,
    Step::Field(KEY_DEPENDENCIES),
    Step::Elements,
];

/// Rebuild `node`, filtering the elements addressed by `steps`.
///
/// A node on the selector path with the wrong kind is a `SchemaError`; nothing
/// is skipped silently. `keep` may also reject an element's shape by returning
/// an error.
pub fn prune<F>(node: &Node, steps: &[Step<'_>], keep: &mut F) -> Result<Node, SchemaError>
where
    F: FnMut(&Pointer, &Node) -> Result<bool, SchemaError>,
{
    let mut pointer = Pointer::root();
    prune_at(node, steps, &mut pointer, keep)
}

fn prune_at<F>(
    node: &Node,
    steps: &[Step<'_>],
    pointer: &mut Pointer,
    keep: &mut F,
) -> Result<Node, SchemaError>
where
    F: FnMut(&Pointer, &Node) -> Result<bool, SchemaError>,
{
    let Some((step, rest)) = steps.split_first() else {
        return Ok(node.clone());
    };

    match step {
        Step::Field(name) => {
            let obj = expect_object(node, pointer)?;
            let mut out = Object::with_capacity(obj.len());
            for (key, value) in obj.iter() {
                let value = if key == *name {
                    pointer.push_key(key);
                    let pruned = prune_at(value, rest, pointer, keep);
                    pointer.pop();
                    pruned?
                } else {
                    value.clone()
                };
                out.insert(key, value);
            }
            Ok(Node::Object(out))
        }
        Step::Elements => {
            let items = expect_array(node, pointer)?;
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                pointer.push_index(index);
                let result = if rest.is_empty() {
                    keep(pointer, item).map(|kept| kept.then(|| item.clone()))
                } else {
                    prune_at(item, rest, pointer, keep).map(Some)
                };
                pointer.pop();
                if let Some(item) = result? {
                    out.push(item);
                }
            }
            Ok(Node::Array(out))
        }
    }
}

pub(crate) fn expect_object<'n>(node: &'n Node, at: &Pointer) -> Result<&'n Object, SchemaError> {
    node.as_object().ok_or_else(|| shape_error(node, at, NodeKind::Object))
}

fn expect_array<'n>(node: &'n Node, at: &Pointer) -> Result<&'n [Node], SchemaError> {
    node.as_array().ok_or_else(|| shape_error(node, at, NodeKind::Array))
}

fn shape_error(node: &Node, at: &Pointer, expected: NodeKind) -> SchemaError {
    SchemaError {
        pointer: at.to_string(),
        expected,
        found: node.kind(),
    }
}
