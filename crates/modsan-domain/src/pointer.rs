//! RFC 6901 JSON pointers into a document.

use modsan_types::Node;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a node, built up while walking the tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pointer {
    segments: Vec<Segment>,
}

impl Pointer {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(key.to_string()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    /// The first `len` segments.
    pub fn prefix(&self, len: usize) -> Pointer {
        Pointer {
            segments: self.segments.iter().take(len).cloned().collect(),
        }
    }

    /// Follow this pointer from `root`.
    pub fn resolve<'n>(&self, root: &'n Node) -> Option<&'n Node> {
        self.segments
            .iter()
            .try_fold(root, |node, segment| match segment {
                Segment::Key(key) => node.get(key),
                Segment::Index(index) => node.as_array().and_then(|items| items.get(*index)),
            })
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => write!(f, "/{}", key.replace('~', "~0").replace('/', "~1"))?,
                Segment::Index(index) => write!(f, "/{index}")?,
            }
        }
        Ok(())
    }
}
