//! Final naming of discovered functions.
//!
//! Explicit functions keep their registered identifier. Every anonymous
//! function gets a child of the internal prefix derived from its label, with
//! a numeric suffix when that name is already taken. Bodies hold references
//! by key, so nothing else needs rewriting when a name is assigned.

use mcpack_common::{BuildError, IdPrefix, Identifier};
use rustc_hash::FxHashSet;

use crate::build::FunctionGraph;
use crate::text_map::{FunctionEntry, FunctionTextMap, TagSet, TagValue};

const FALLBACK_LABEL: &str = "untitled";

/// Turn a free-form label into a path segment.
///
/// camelCase boundaries become underscores, letters are lowercased and every
/// run of other characters collapses to a single `_`.
pub fn clean_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len() + 4);
    let mut prev: Option<char> = None;
    let mut in_separator = false;

    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            if prev.is_some_and(|p| p.is_ascii_lowercase()) && c.is_ascii_uppercase() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            in_separator = false;
        } else if !in_separator {
            out.push('_');
            in_separator = true;
        }
        prev = Some(c);
    }

    if out.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        out
    }
}

/// Assign every node its final identifier and build the function map.
///
/// `load` and `tick` hold entries registered directly on the datapack; they
/// come first in their tags, followed by flagged functions in discovery
/// order.
pub fn rename(
    graph: FunctionGraph,
    internal: Option<&IdPrefix>,
    load: Vec<TagValue>,
    tick: Vec<TagValue>,
) -> Result<FunctionTextMap, BuildError> {
    let mut taken: FxHashSet<Identifier> = graph
        .iter()
        .filter_map(|node| node.explicit.clone())
        .collect();

    let mut ids = Vec::with_capacity(graph.len());
    let mut renamed = 0usize;
    for node in graph.iter() {
        let id = match &node.explicit {
            Some(id) => id.clone(),
            None => {
                let prefix = internal.ok_or_else(|| BuildError::MissingInternalPrefix {
                    label: node.label.clone(),
                })?;
                let id = unique_child(prefix, &clean_label(&node.label), &taken)?;
                taken.insert(id.clone());
                renamed += 1;
                id
            }
        };
        ids.push(id);
    }

    let mut map = FunctionTextMap::new();
    map.load = tag_set(load);
    map.tick = tag_set(tick);

    for (node, id) in graph.into_nodes().into_iter().zip(ids) {
        let explicit = node.is_explicit();
        let key = map.push(FunctionEntry::new(id, node.label, explicit, node.lines));
        debug_assert_eq!(key, node.key);
        if node.on_load {
            map.load.insert(TagValue::Function(key));
        }
        if node.on_tick {
            map.tick.insert(TagValue::Function(key));
        }
    }

    tracing::debug!(renamed, total = map.len(), "named functions");
    Ok(map)
}

fn unique_child(
    prefix: &IdPrefix,
    base: &str,
    taken: &FxHashSet<Identifier>,
) -> Result<Identifier, BuildError> {
    let mut candidate = prefix.child(base)?;
    let mut suffix = 0u32;
    while taken.contains(&candidate) {
        suffix += 1;
        candidate = prefix.child(&format!("{base}_{suffix}"))?;
    }
    Ok(candidate)
}

fn tag_set(values: Vec<TagValue>) -> TagSet {
    let mut set = TagSet::new();
    for value in values {
        set.insert(value);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::FunctionNode;
    use crate::ir::{FunctionKey, Line};

    fn node(key: u32, label: &str, explicit: Option<&str>) -> FunctionNode {
        FunctionNode {
            key: FunctionKey(key),
            label: label.to_string(),
            explicit: explicit.map(|id| Identifier::parse(id).unwrap()),
            lines: vec![Line::from_text("say hi")],
            on_load: false,
            on_tick: false,
        }
    }

    fn graph(nodes: Vec<FunctionNode>) -> FunctionGraph {
        let mut graph = FunctionGraph::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    fn ids(map: &FunctionTextMap) -> Vec<String> {
        map.iter().map(|(_, entry)| entry.id.to_string()).collect()
    }

    #[test]
    fn clean_label_splits_camel_case() {
        assert_eq!(clean_label("spawnParticles"), "spawn_particles");
        assert_eq!(clean_label("HTTPServer"), "httpserver");
        assert_eq!(clean_label("on tick!"), "on_tick_");
        assert_eq!(clean_label("a -- b"), "a_b");
        assert_eq!(clean_label("Grüße"), "gr_e");
        assert_eq!(clean_label(""), "untitled");
    }

    #[test]
    fn anonymous_functions_get_prefixed_names() {
        let prefix = IdPrefix::parse("ns:internal").unwrap();
        let map = rename(
            graph(vec![node(0, "main", Some("ns:main")), node(1, "giveItems", None)]),
            Some(&prefix),
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(ids(&map), vec!["ns:main", "ns:internal/give_items"]);
        assert!(!map.is_eligible(FunctionKey(0)));
        assert!(map.is_eligible(FunctionKey(1)));
    }

    #[test]
    fn collisions_get_numeric_suffixes() {
        let prefix = IdPrefix::parse("ns").unwrap();
        let map = rename(
            graph(vec![
                node(0, "foo", None),
                node(1, "Foo", None),
                node(2, "foo?", None),
            ]),
            Some(&prefix),
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(ids(&map), vec!["ns:foo", "ns:foo_1", "ns:foo_"]);
    }

    #[test]
    fn explicit_ids_are_claimed_first() {
        // The explicit function is discovered after the anonymous one but
        // still keeps its name.
        let prefix = IdPrefix::parse("ns").unwrap();
        let map = rename(
            graph(vec![node(0, "helper", None), node(1, "x", Some("ns:helper"))]),
            Some(&prefix),
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(ids(&map), vec!["ns:helper_1", "ns:helper"]);
        assert_eq!(
            map.lookup(&Identifier::parse("ns:helper").unwrap()),
            Some(FunctionKey(1))
        );
    }

    #[test]
    fn anonymous_without_prefix_is_an_error() {
        let err = rename(graph(vec![node(0, "loop", None)]), None, Vec::new(), Vec::new())
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingInternalPrefix {
                label: "loop".into()
            }
        );
    }

    #[test]
    fn flagged_functions_follow_registered_tag_entries() {
        let mut flagged = node(1, "setup", None);
        flagged.on_load = true;
        let prefix = IdPrefix::parse("ns").unwrap();
        let external = TagValue::Id(Identifier::parse("other:init").unwrap());
        let map = rename(
            graph(vec![node(0, "main", Some("ns:main")), flagged]),
            Some(&prefix),
            vec![external.clone(), TagValue::Function(FunctionKey(1))],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(
            map.load.values(),
            &[external, TagValue::Function(FunctionKey(1))]
        );
        assert!(map.tick.is_empty());
    }
}
