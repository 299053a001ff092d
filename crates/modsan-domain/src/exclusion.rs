use modsan_types::ids::{KEY_GROUP, KEY_MODULE};
use modsan_types::{Coordinate, Object};

/// Coordinates whose dependency entries are stripped. Ordered, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    rules: Vec<Coordinate>,
}

impl ExclusionSet {
    pub fn new(rules: impl IntoIterator<Item = Coordinate>) -> Self {
        let mut out: Vec<Coordinate> = Vec::new();
        for rule in rules {
            if !out.contains(&rule) {
                out.push(rule);
            }
        }
        Self { rules: out }
    }

    pub fn single(rule: Coordinate) -> Self {
        Self { rules: vec![rule] }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.rules
    }

    /// The rule that excludes `entry`, if any.
    ///
    /// Both `group` and `module` must be present as strings and equal the rule
    /// exactly. An entry with a missing or non-string coordinate never matches.
    pub fn matching(&self, entry: &Object) -> Option<&Coordinate> {
        let (group, module) = entry_coordinate(entry)?;
        self.rules
            .iter()
            .find(|rule| rule.group == group && rule.module == module)
    }
}

impl From<Coordinate> for ExclusionSet {
    fn from(value: Coordinate) -> Self {
        Self::single(value)
    }
}

/// `(group, module)` of a dependency entry when both are strings.
pub fn entry_coordinate(entry: &Object) -> Option<(&str, &str)> {
    let group = entry.get(KEY_GROUP)?.as_str()?;
    let module = entry.get(KEY_MODULE)?.as_str()?;
    Some((group, module))
}
