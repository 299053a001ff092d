//! Property-based tests for the sanitizer.
//!
//! Documents are generated in the module metadata shape with a mix of matching,
//! non-matching, partial, and non-string dependency coordinates.

use crate::{ExclusionSet, sanitize};
use modsan_types::{Coordinate, Node, Object, parse_document, to_pretty_bytes};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_scalar() -> impl Strategy<Value = Node> {
    prop_oneof![
        Just(Node::Null),
        any::<bool>().prop_map(Node::Bool),
        any::<i64>().prop_map(|n| Node::Number(n.into())),
        "[a-z0-9.]{0,8}".prop_map(Node::String),
    ]
}

fn arb_group() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("com.wonder".to_string()),
        Just("org.slf4j".to_string()),
        "[a-z]{1,4}\\.[a-z]{1,4}",
    ]
}

fn arb_module() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("wonder-dependencies".to_string()),
        Just("other-lib".to_string()),
        "[a-z]{1,8}",
    ]
}

/// Coordinate field: usually a string, sometimes another scalar.
fn arb_field(strings: impl Strategy<Value = String>) -> impl Strategy<Value = Option<Node>> {
    prop::option::weighted(
        0.9,
        prop_oneof![4 => strings.prop_map(Node::String), 1 => arb_scalar()],
    )
}

fn arb_extras() -> impl Strategy<Value = Vec<(String, Node)>> {
    prop::collection::vec(("x_[a-z]{1,5}", arb_scalar()), 0..3)
}

fn arb_dependency() -> impl Strategy<Value = Node> {
    (arb_field(arb_group()), arb_field(arb_module()), arb_extras()).prop_map(
        |(group, module, extras)| {
            let mut obj = Object::new();
            if let Some(group) = group {
                obj.insert("group", group);
            }
            if let Some(module) = module {
                obj.insert("module", module);
            }
            for (k, v) in extras {
                obj.insert(k, v);
            }
            Node::Object(obj)
        },
    )
}

fn arb_variant() -> impl Strategy<Value = Node> {
    (
        "[a-z]{1,8}Elements",
        arb_extras(),
        prop::option::of(prop::collection::vec(arb_dependency(), 0..6)),
    )
        .prop_map(|(name, extras, dependencies)| {
            let mut obj = Object::new();
            obj.insert("name", Node::String(name));
            for (k, v) in extras {
                obj.insert(k, v);
            }
            if let Some(deps) = dependencies {
                obj.insert("dependencies", Node::Array(deps));
            }
            Node::Object(obj)
        })
}

fn arb_document() -> impl Strategy<Value = Node> {
    (
        arb_extras(),
        prop::option::of(prop::collection::vec(arb_variant(), 0..4)),
    )
        .prop_map(|(extras, variants)| {
            let mut obj = Object::new();
            obj.insert("formatVersion", Node::String("1.1".to_string()));
            for (k, v) in extras {
                obj.insert(k, v);
            }
            if let Some(variants) = variants {
                obj.insert("variants", Node::Array(variants));
            }
            Node::Object(obj)
        })
}

// ============================================================================
// Helpers
// ============================================================================

fn excluded(entry: &Node, rule: &Coordinate) -> bool {
    entry.get("group").and_then(Node::as_str) == Some(rule.group.as_str())
        && entry.get("module").and_then(Node::as_str) == Some(rule.module.as_str())
}

fn variants(doc: &Node) -> Vec<Node> {
    doc.get("variants")
        .and_then(Node::as_array)
        .map(<[Node]>::to_vec)
        .unwrap_or_default()
}

fn dependencies(variant: &Node) -> Option<Vec<Node>> {
    variant
        .get("dependencies")
        .and_then(Node::as_array)
        .map(<[Node]>::to_vec)
}

fn without_dependencies(variant: &Node) -> Vec<(String, Node)> {
    variant
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter(|(k, _)| *k != "dependencies")
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn entry_survives_iff_not_excluded(doc in arb_document()) {
        let rule = Coordinate::aggregator();
        let out = sanitize(&doc, &ExclusionSet::single(rule.clone())).expect("sanitize");

        let before = variants(&doc);
        let after = variants(&out.document);
        prop_assert_eq!(before.len(), after.len());

        let mut expected_removed = 0;
        for (b, a) in before.iter().zip(after.iter()) {
            match (dependencies(b), dependencies(a)) {
                (Some(b), Some(a)) => {
                    let expected: Vec<Node> =
                        b.iter().filter(|d| !excluded(d, &rule)).cloned().collect();
                    expected_removed += b.len() - expected.len();
                    prop_assert_eq!(a, expected);
                }
                (None, None) => {}
                other => {
                    prop_assert!(false, "dependencies presence changed: {:?}", other);
                }
            }
        }
        prop_assert_eq!(out.removed.len(), expected_removed);
        for removal in &out.removed {
            prop_assert!(excluded(&removal.entry, &rule));
            prop_assert_eq!(&removal.coordinate, &rule);
        }
    }

    #[test]
    fn sanitize_is_idempotent(doc in arb_document()) {
        let set = ExclusionSet::single(Coordinate::aggregator());
        let first = sanitize(&doc, &set).expect("first pass");
        let second = sanitize(&first.document, &set).expect("second pass");
        prop_assert!(!second.is_changed());
        prop_assert_eq!(&second.document, &first.document);

        let first_bytes = to_pretty_bytes(&first.document, 4).expect("encode");
        let reparsed = parse_document(std::str::from_utf8(&first_bytes).expect("utf8"))
            .expect("reparse");
        let again = sanitize(&reparsed, &set).expect("third pass");
        let again_bytes = to_pretty_bytes(&again.document, 4).expect("encode");
        prop_assert_eq!(first_bytes, again_bytes);
    }

    #[test]
    fn keys_outside_dependencies_are_untouched(doc in arb_document()) {
        let out = sanitize(&doc, &ExclusionSet::single(Coordinate::aggregator()))
            .expect("sanitize");

        let in_obj = doc.as_object().expect("object");
        let out_obj = out.document.as_object().expect("object");
        prop_assert_eq!(in_obj.keys().collect::<Vec<_>>(), out_obj.keys().collect::<Vec<_>>());
        for (key, value) in in_obj.iter().filter(|(k, _)| *k != "variants") {
            prop_assert_eq!(Some(value), out_obj.get(key));
        }
        for (b, a) in variants(&doc).iter().zip(variants(&out.document).iter()) {
            prop_assert_eq!(without_dependencies(b), without_dependencies(a));
        }
    }

    #[test]
    fn unmatched_rule_is_a_no_op(doc in arb_document()) {
        // Generated groups never contain an uppercase letter.
        let set = ExclusionSet::single(Coordinate::new("com.Absent", "nothing"));
        let out = sanitize(&doc, &set).expect("sanitize");
        prop_assert!(!out.is_changed());
        prop_assert_eq!(out.document, doc);
    }

    #[test]
    fn empty_exclusion_set_is_a_no_op(doc in arb_document()) {
        let out = sanitize(&doc, &ExclusionSet::default()).expect("sanitize");
        prop_assert_eq!(out.document, doc);
    }
}
