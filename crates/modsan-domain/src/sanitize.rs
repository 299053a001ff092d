use crate::exclusion::ExclusionSet;
use crate::pointer::Pointer;
use crate::prune::{DEPENDENCY_ENTRIES, expect_object, prune};
use modsan_types::ids::KEY_NAME;
use modsan_types::{Coordinate, Node, SchemaError};

/// A dependency entry removed from the document.
#[derive(Clone, Debug, PartialEq)]
pub struct Removal {
    pub pointer: Pointer,
    pub coordinate: Coordinate,
    /// `name` of the owning variant, when it is a string.
    pub variant: Option<String>,
    pub entry: Node,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sanitized {
    pub document: Node,
    pub removed: Vec<Removal>,
}

impl Sanitized {
    pub fn is_changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Strip every dependency entry matched by `exclusions` from every variant.
///
/// Everything else is copied unchanged. Missing `variants` or `dependencies`
/// keys are fine; present ones with the wrong shape are a `SchemaError`.
pub fn sanitize(document: &Node, exclusions: &ExclusionSet) -> Result<Sanitized, SchemaError> {
    let mut removed = Vec::new();

    let rebuilt = prune(document, DEPENDENCY_ENTRIES, &mut |pointer: &Pointer,
                                                              entry: &Node| {
        let obj = expect_object(entry, pointer)?;
        match exclusions.matching(obj) {
            Some(coordinate) => {
                removed.push(Removal {
                    pointer: pointer.clone(),
                    coordinate: coordinate.clone(),
                    variant: None,
                    entry: entry.clone(),
                });
                Ok(false)
            }
            None => Ok(true),
        }
    })?;

    for removal in &mut removed {
        removal.variant = variant_name(document, &removal.pointer);
    }

    Ok(Sanitized {
        document: rebuilt,
        removed,
    })
}

// `/variants/<i>/dependencies/<j>` -> `/variants/<i>/name`
fn variant_name(document: &Node, entry: &Pointer) -> Option<String> {
    entry
        .prefix(2)
        .resolve(document)?
        .get(KEY_NAME)?
        .as_str()
        .map(str::to_string)
}
