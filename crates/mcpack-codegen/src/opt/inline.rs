//! Inlining and dead function removal.
//!
//! All three passes only touch eligible functions: live and not explicitly
//! registered. Each is a single traversal in key order.

use crate::ir::{trim_body, FunctionKey, Line};
use crate::text_map::FunctionTextMap;

/// Pass 1: replace `execute <...> run function <f>` with
/// `execute <...> run <body>` for every eligible one-line `f`.
///
/// Returns the number of rewritten call sites. The callee is left in place;
/// the dead sweep removes it once nothing refers to it.
pub fn inline_execute_calls(map: &mut FunctionTextMap) -> usize {
    let mut rewritten = 0;
    for key in map.keys() {
        let Some(body) = single_line_body(map, key) else {
            continue;
        };
        for other in map.keys() {
            if other == key {
                continue;
            }
            let Some(entry) = map.get_mut(other) else {
                continue;
            };
            for line in entry.lines.iter_mut() {
                if let Some(inlined) = line.inline_execute_call(key, &body) {
                    *line = inlined;
                    rewritten += 1;
                }
            }
        }
    }
    rewritten
}

/// The trimmed body of an eligible function whose file is exactly one
/// non-blank line that is not a comment and does not call the function
/// itself. Blank lines count towards the length.
fn single_line_body(map: &FunctionTextMap, key: FunctionKey) -> Option<Line> {
    if !map.is_eligible(key) {
        return None;
    }
    let [line] = map.get(key)?.lines.as_slice() else {
        return None;
    };
    if line.is_blank() || line.is_comment() || line.count_references(key) > 0 {
        return None;
    }
    Some(line.trimmed())
}

/// Pass 2: an eligible function referenced exactly once, through a line that
/// is exactly `function <f>`, has that line replaced by its whole body.
///
/// Returns the number of functions inlined. The callee keeps its entry, so
/// calls in its body still count until the dead sweep removes it; a callee
/// of a callee is only inlined in a later round.
pub fn inline_single_references(map: &mut FunctionTextMap) -> usize {
    let mut inlined = 0;
    for key in map.keys() {
        if !map.is_eligible(key) || map.reference_count(key) != 1 {
            continue;
        }
        let Some(site) = find_call_site(map, key) else {
            continue;
        };
        let body = match map.get(key) {
            Some(entry) => trim_body(&entry.lines),
            None => continue,
        };
        let (owner, index) = site;
        if let Some(entry) = map.get_mut(owner) {
            entry.lines.splice(index..=index, body);
            inlined += 1;
        }
    }
    inlined
}

/// First line outside `key`'s own body that is exactly `function <key>`.
fn find_call_site(map: &FunctionTextMap, key: FunctionKey) -> Option<(FunctionKey, usize)> {
    map.iter()
        .filter(|(owner, _)| *owner != key)
        .find_map(|(owner, entry)| {
            entry
                .lines
                .iter()
                .position(|line| line.call_target() == Some(key))
                .map(|index| (owner, index))
        })
}

/// Pass 3: remove eligible functions nothing refers to.
///
/// Counts are taken when each function is visited, so removing one function
/// can free the functions after it in the same sweep.
pub fn eliminate_dead(map: &mut FunctionTextMap) -> usize {
    let mut removed = 0;
    for key in map.keys() {
        if map.is_eligible(key) && map.reference_count(key) == 0 {
            tracing::trace!(function = %map.id(key), "removing unreferenced function");
            map.remove(key);
            removed += 1;
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_map::{FunctionEntry, TagValue};
    use mcpack_common::Identifier;

    fn text(s: &str) -> Line {
        Line::from_text(s)
    }

    fn call(prefix: &str, key: u32) -> Line {
        let mut line = Line::from_text(prefix);
        line.push_ref(FunctionKey(key));
        line
    }

    fn entry(id: &str, explicit: bool, lines: Vec<Line>) -> FunctionEntry {
        let id = Identifier::parse(id).unwrap();
        let label = id.path().to_string();
        FunctionEntry::new(id, label, explicit, lines)
    }

    fn rendered(map: &FunctionTextMap) -> Vec<(String, String)> {
        map.iter()
            .map(|(key, entry)| (entry.id.to_string(), map.render(key).unwrap()))
            .collect()
    }

    #[test]
    fn execute_call_is_rewritten_and_callee_swept() {
        let mut map = FunctionTextMap::new();
        map.push(entry("ns:main", true, vec![call("execute as @a run function ", 1)]));
        map.push(entry("ns:greet", false, vec![text("say hi")]));

        assert_eq!(inline_execute_calls(&mut map), 1);
        assert_eq!(map.reference_count(FunctionKey(1)), 0);
        assert_eq!(eliminate_dead(&mut map), 1);
        assert_eq!(
            rendered(&map),
            vec![("ns:main".to_string(), "execute as @a run say hi".to_string())]
        );
    }

    #[test]
    fn execute_inlining_skips_comments_and_multi_line_bodies() {
        let mut map = FunctionTextMap::new();
        map.push(entry(
            "ns:main",
            true,
            vec![
                call("execute as @a run function ", 1),
                call("execute as @a run function ", 2),
            ],
        ));
        map.push(entry("ns:note", false, vec![text("# just a note")]));
        map.push(entry("ns:two", false, vec![text("say a"), text("say b")]));

        assert_eq!(inline_execute_calls(&mut map), 0);
    }

    #[test]
    fn execute_inlining_counts_blank_lines() {
        let mut map = FunctionTextMap::new();
        map.push(entry(
            "ns:main",
            true,
            vec![
                call("execute if entity @s run function ", 1),
                call("execute if entity @s run function ", 2),
            ],
        ));
        map.push(entry("ns:padded", false, vec![text(""), text("say hi"), text("")]));
        map.push(entry("ns:spaced", false, vec![text("  say hi  ")]));

        assert_eq!(inline_execute_calls(&mut map), 1);
        assert_eq!(
            map.render(FunctionKey(0)).unwrap(),
            "execute if entity @s run function ns:padded\nexecute if entity @s run say hi"
        );
    }

    #[test]
    fn explicit_functions_are_never_inlined_or_removed() {
        let mut map = FunctionTextMap::new();
        map.push(entry("ns:main", true, vec![call("execute as @a run function ", 1)]));
        map.push(entry("ns:api", true, vec![text("say hi")]));
        map.push(entry("ns:unused", true, vec![text("say unused")]));

        assert_eq!(inline_execute_calls(&mut map), 0);
        assert_eq!(inline_single_references(&mut map), 0);
        assert_eq!(eliminate_dead(&mut map), 0);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn single_reference_body_is_substituted() {
        let mut map = FunctionTextMap::new();
        map.push(entry(
            "ns:main",
            true,
            vec![text("say before"), call("function ", 1), text("say after")],
        ));
        map.push(entry(
            "ns:helper",
            false,
            vec![text("say one"), text("say two"), text("say three")],
        ));

        assert_eq!(inline_single_references(&mut map), 1);
        assert_eq!(
            map.render(FunctionKey(0)).unwrap(),
            "say before\nsay one\nsay two\nsay three\nsay after"
        );
        // The callee stays until the sweep.
        assert_eq!(map.reference_count(FunctionKey(1)), 0);
        assert!(map.lookup(&Identifier::parse("ns:helper").unwrap()).is_some());
        assert_eq!(eliminate_dead(&mut map), 1);
        assert!(map.lookup(&Identifier::parse("ns:helper").unwrap()).is_none());
    }

    #[test]
    fn nested_single_reference_waits_for_the_next_round() {
        let mut map = FunctionTextMap::new();
        map.push(entry("ns:main", true, vec![call("function ", 1)]));
        map.push(entry("ns:outer", false, vec![text("say outer"), call("function ", 2)]));
        map.push(entry("ns:inner", false, vec![text("say inner"), text("say done")]));

        // `inner` is referenced from `main` and from the not yet swept `outer`.
        assert_eq!(inline_single_references(&mut map), 1);
        assert_eq!(map.reference_count(FunctionKey(2)), 2);
        assert_eq!(eliminate_dead(&mut map), 1);
        assert_eq!(
            rendered(&map),
            vec![
                ("ns:main".to_string(), "say outer\nfunction ns:inner".to_string()),
                ("ns:inner".to_string(), "say inner\nsay done".to_string()),
            ]
        );

        assert_eq!(inline_single_references(&mut map), 1);
        assert_eq!(eliminate_dead(&mut map), 1);
        assert_eq!(
            map.render(FunctionKey(0)).unwrap(),
            "say outer\nsay inner\nsay done"
        );
    }

    #[test]
    fn twice_referenced_function_is_kept() {
        let mut map = FunctionTextMap::new();
        map.push(entry("ns:main", true, vec![call("function ", 1), call("function ", 1)]));
        map.push(entry("ns:helper", false, vec![text("say a"), text("say b")]));

        assert_eq!(inline_single_references(&mut map), 0);
        assert_eq!(eliminate_dead(&mut map), 0);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn tag_membership_counts_as_a_reference() {
        let mut map = FunctionTextMap::new();
        map.push(entry("ns:setup", false, vec![text("say loaded")]));
        map.load.insert(TagValue::Function(FunctionKey(0)));

        assert_eq!(inline_single_references(&mut map), 0);
        assert_eq!(eliminate_dead(&mut map), 0);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn self_recursive_function_is_not_expanded() {
        let mut map = FunctionTextMap::new();
        map.push(entry("ns:loop", false, vec![text("say again"), call("function ", 0)]));
        map.load.insert(TagValue::Function(FunctionKey(0)));

        assert_eq!(inline_single_references(&mut map), 0);
        assert_eq!(map.render(FunctionKey(0)).unwrap(), "say again\nfunction ns:loop");
    }

    #[test]
    fn sweep_frees_later_functions() {
        let mut map = FunctionTextMap::new();
        map.push(entry("ns:a", false, vec![call("function ", 1), call("function ", 1)]));
        map.push(entry("ns:b", false, vec![text("say b")]));

        assert_eq!(eliminate_dead(&mut map), 2);
        assert!(map.is_empty());
    }

    #[test]
    fn prefix_identifiers_are_counted_separately() {
        // `ns:foo` is a textual prefix of `ns:foo2`; only whole references
        // count.
        let mut map = FunctionTextMap::new();
        map.push(entry("ns:main", true, vec![call("function ", 2)]));
        map.push(entry("ns:foo", false, vec![text("say foo")]));
        map.push(entry("ns:foo2", false, vec![text("say foo2"), text("say more")]));

        assert_eq!(map.reference_count(FunctionKey(1)), 0);
        assert_eq!(inline_single_references(&mut map), 1);
        assert_eq!(eliminate_dead(&mut map), 1);
        assert_eq!(map.len(), 1);
        assert_eq!(map.render(FunctionKey(0)).unwrap(), "say foo2\nsay more");
    }
}
