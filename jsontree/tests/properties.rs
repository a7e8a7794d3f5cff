//! Property tests for the conversion rules.
//!
//! Inputs are generated as a plain tree of scalars, maps and lists, then fed
//! to the builder in several equivalent shapes: as maps and lists, as blocks
//! that `set` every entry, and as a ready-made JSON value.

use std::collections::{BTreeMap, BTreeSet};

use jsontree::{Input, JsonBuilder};
use proptest::prelude::*;
use serde_json::{Map, Value};

#[derive(Debug, Clone)]
enum Node {
    Int(i64),
    Bool(bool),
    Str(String),
    Null,
    Map(Vec<(String, Node)>),
    List(Vec<Node>),
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Node::Int),
        any::<bool>().prop_map(Node::Bool),
        "[a-z ]{0,8}".prop_map(Node::Str),
        Just(Node::Null),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Node::List),
            entries_strategy(inner).prop_map(Node::Map),
        ]
    })
}

/// Map entries with unique keys, in key order.
fn entries_strategy(
    inner: impl Strategy<Value = Node>,
) -> impl Strategy<Value = Vec<(String, Node)>> {
    prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
        .prop_map(|m: BTreeMap<String, Node>| m.into_iter().collect())
}

fn expected(node: &Node) -> Value {
    match node {
        Node::Int(n) => Value::from(*n),
        Node::Bool(b) => Value::Bool(*b),
        Node::Str(s) => Value::String(s.clone()),
        Node::Null => Value::Null,
        Node::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), expected(v)))
                .collect::<Map<String, Value>>(),
        ),
        Node::List(items) => Value::Array(items.iter().map(expected).collect()),
    }
}

/// Strings go in as JSON strings so `set` never tries to parse them.
fn scalar_input(node: &Node) -> Input<'static> {
    Input::Value(expected(node))
}

fn as_maps_and_lists(node: &Node) -> Input<'static> {
    match node {
        Node::Map(entries) => Input::Map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), as_maps_and_lists(v)))
                .collect(),
        ),
        Node::List(items) => Input::List(items.iter().map(as_maps_and_lists).collect()),
        scalar => scalar_input(scalar),
    }
}

fn as_blocks(node: &Node) -> Input<'static> {
    match node {
        Node::Map(entries) => {
            let entries = entries.clone();
            Input::block(move |b| {
                for (key, value) in &entries {
                    b.set(key, as_blocks(value))?;
                }
                Ok(())
            })
        }
        Node::List(items) => Input::List(items.iter().map(as_blocks).collect()),
        scalar => scalar_input(scalar),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn list_keeps_length_and_converts_each_element(
        items in prop::collection::vec(node_strategy(), 0..6)
    ) {
        let mut b = JsonBuilder::new();
        let doc = b
            .json([Input::List(items.iter().map(as_maps_and_lists).collect())])
            .unwrap();

        let array = doc.as_array().unwrap();
        prop_assert_eq!(array.len(), items.len());
        for (item, converted) in items.iter().zip(array) {
            prop_assert_eq!(converted, &expected(item));
        }
        prop_assert_eq!(b.depth(), 0);
    }

    #[test]
    fn map_keeps_keys_and_converts_each_value(
        entries in entries_strategy(node_strategy())
    ) {
        let mut b = JsonBuilder::new();
        let doc = b
            .json([as_maps_and_lists(&Node::Map(entries.clone()))])
            .unwrap();

        let object = doc.as_object().unwrap();
        let keys: Vec<&String> = object.keys().collect();
        let want: Vec<&String> = entries.iter().map(|(k, _)| k).collect();
        prop_assert_eq!(keys, want);
        for (key, value) in &entries {
            prop_assert_eq!(&object[key.as_str()], &expected(value));
        }
    }

    #[test]
    fn map_keys_are_stringified_in_order(keys in prop::collection::btree_set(any::<i32>(), 0..6)) {
        let keys: BTreeSet<i32> = keys;
        let mut b = JsonBuilder::new();
        let doc = b
            .json([Input::map(keys.iter().map(|k| (k, true)))])
            .unwrap();

        let got: Vec<String> = doc.as_object().unwrap().keys().cloned().collect();
        let want: Vec<String> = keys.iter().map(i32::to_string).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn blocks_build_the_same_tree_as_maps_and_lists(
        entries in entries_strategy(node_strategy())
    ) {
        let tree = Node::Map(entries);

        let from_blocks = JsonBuilder::new().json([as_blocks(&tree)]).unwrap();
        let from_maps = JsonBuilder::new().json([as_maps_and_lists(&tree)]).unwrap();
        let from_value = JsonBuilder::new().json([Input::from(expected(&tree))]).unwrap();

        prop_assert_eq!(&from_blocks, &expected(&tree));
        prop_assert_eq!(from_blocks.to_string(), from_maps.to_string());
        prop_assert_eq!(from_maps.to_string(), from_value.to_string());
    }
}
