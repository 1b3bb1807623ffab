use serde_json::Value;

use crate::jsonc::{self, ParseError, PathSeg};

use super::{HookDefinition, matching};

const HOOKS_KEY: &str = "hooks";

/// Result of one install or removal pass. `changed` counts entries added
/// or hook commands removed; `errors` are the source document's syntax
/// diagnostics, never fatal.
#[derive(Debug)]
pub struct PatchOutcome {
    pub text: String,
    pub changed: usize,
    pub errors: Vec<ParseError>,
}

fn hooks_object(text: &str) -> Option<serde_json::Map<String, Value>> {
    let (root, _) = jsonc::parse(text);
    root.map(|r| r.to_value())
        .and_then(|v| v.get(HOOKS_KEY).cloned())
        .and_then(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        })
}

fn event_entries(text: &str, event: &str) -> Vec<Value> {
    hooks_object(text)
        .and_then(|hooks| hooks.get(event).and_then(Value::as_array).cloned())
        .unwrap_or_default()
}

/// Adds every matcher in `definition` that is not already present, one
/// structural edit at a time. Exactly-equal entries are skipped, so a
/// repeat install adds nothing.
pub fn install_definition(text: &str, definition: &HookDefinition) -> PatchOutcome {
    let (_, errors) = jsonc::parse(text);
    let mut current = text.to_string();
    let mut added = 0;
    for (event, matchers) in definition {
        for wanted in matchers {
            let existing = event_entries(&current, event);
            if existing.iter().any(|e| matching::matcher_equals(wanted, e)) {
                continue;
            }
            let Ok(value) = serde_json::to_value(wanted) else {
                continue;
            };
            let path = [
                PathSeg::key(HOOKS_KEY),
                PathSeg::key(event.as_str()),
                PathSeg::Index(existing.len()),
            ];
            let outcome = jsonc::set_at_path(&current, &path, &value);
            if outcome.changed {
                current = outcome.text;
                added += 1;
            }
        }
    }
    PatchOutcome {
        text: current,
        changed: added,
        errors,
    }
}

/// Removes exactly the entries that equal some matcher in `definition`.
/// An event emptied by the removal loses its whole key, and a `hooks`
/// object left without events is deleted entirely.
pub fn remove_definition(text: &str, definition: &HookDefinition) -> PatchOutcome {
    let (_, errors) = jsonc::parse(text);
    let Some(hooks) = hooks_object(text) else {
        return PatchOutcome {
            text: text.to_string(),
            changed: 0,
            errors,
        };
    };

    let mut current = text.to_string();
    let mut removed = 0;
    for (event, wanted) in definition {
        let Some(existing) = hooks.get(event).and_then(Value::as_array) else {
            continue;
        };
        let indices = matching::matchers_to_remove(wanted, existing);
        if indices.is_empty() {
            continue;
        }
        if indices.len() == existing.len() {
            // Nothing would remain under this event, so the key goes too.
            let path = [PathSeg::key(HOOKS_KEY), PathSeg::key(event.as_str())];
            let outcome = jsonc::remove_at_path(&current, &path);
            if outcome.changed {
                current = outcome.text;
                removed += indices.len();
            }
        } else {
            for index in indices.into_iter().rev() {
                let path = [
                    PathSeg::key(HOOKS_KEY),
                    PathSeg::key(event.as_str()),
                    PathSeg::Index(index),
                ];
                let outcome = jsonc::remove_at_path(&current, &path);
                if outcome.changed {
                    current = outcome.text;
                    removed += 1;
                }
            }
        }
    }
    if removed > 0 {
        current = drop_hooks_if_empty(&current);
    }
    PatchOutcome {
        text: current,
        changed: removed,
        errors,
    }
}

/// Looser removal for callers that only know the installed binary's
/// name: every hook whose command contains `needle` is removed, matcher
/// entries emptied by that are deleted whole, and the usual event and
/// `hooks` cleanup follows.
pub fn remove_by_command(text: &str, needle: &str) -> PatchOutcome {
    let (_, errors) = jsonc::parse(text);
    let Some(hooks) = hooks_object(text) else {
        return PatchOutcome {
            text: text.to_string(),
            changed: 0,
            errors,
        };
    };

    let mut current = text.to_string();
    let mut removed = 0;
    for (event, entries) in &hooks {
        let Some(entries) = entries.as_array() else {
            continue;
        };
        // Per entry: full removal when every hook matches, otherwise the
        // matching hooks come out individually.
        let mut full: Vec<(usize, usize)> = Vec::new();
        let mut partial: Vec<(usize, Vec<usize>)> = Vec::new();
        for (entry_index, entry) in entries.iter().enumerate() {
            let hook_count = entry
                .get("hooks")
                .and_then(Value::as_array)
                .map(|a| a.len())
                .unwrap_or(0);
            let matched = matching::entry_hooks_containing(entry, needle);
            if matched.is_empty() {
                continue;
            }
            if matched.len() == hook_count {
                full.push((entry_index, matched.len()));
            } else {
                partial.push((entry_index, matched));
            }
        }
        if full.is_empty() && partial.is_empty() {
            continue;
        }
        if partial.is_empty() && full.len() == entries.len() {
            let path = [PathSeg::key(HOOKS_KEY), PathSeg::key(event.as_str())];
            let outcome = jsonc::remove_at_path(&current, &path);
            if outcome.changed {
                current = outcome.text;
                removed += full.iter().map(|(_, count)| count).sum::<usize>();
            }
            continue;
        }
        // Descending entry order keeps the remaining indices stable.
        let mut plans: Vec<(usize, Option<Vec<usize>>)> = full
            .iter()
            .map(|(entry_index, _)| (*entry_index, None))
            .chain(
                partial
                    .iter()
                    .map(|(entry_index, hooks)| (*entry_index, Some(hooks.clone()))),
            )
            .collect();
        plans.sort_by(|a, b| b.0.cmp(&a.0));
        for (entry_index, hook_indices) in plans {
            match hook_indices {
                None => {
                    let count = full
                        .iter()
                        .find(|(i, _)| *i == entry_index)
                        .map(|(_, count)| *count)
                        .unwrap_or(0);
                    let path = [
                        PathSeg::key(HOOKS_KEY),
                        PathSeg::key(event.as_str()),
                        PathSeg::Index(entry_index),
                    ];
                    let outcome = jsonc::remove_at_path(&current, &path);
                    if outcome.changed {
                        current = outcome.text;
                        removed += count;
                    }
                }
                Some(hook_indices) => {
                    for hook_index in hook_indices.into_iter().rev() {
                        let path = [
                            PathSeg::key(HOOKS_KEY),
                            PathSeg::key(event.as_str()),
                            PathSeg::Index(entry_index),
                            PathSeg::key("hooks"),
                            PathSeg::Index(hook_index),
                        ];
                        let outcome = jsonc::remove_at_path(&current, &path);
                        if outcome.changed {
                            current = outcome.text;
                            removed += 1;
                        }
                    }
                }
            }
        }
    }
    if removed > 0 {
        current = drop_hooks_if_empty(&current);
    }
    PatchOutcome {
        text: current,
        changed: removed,
        errors,
    }
}

fn drop_hooks_if_empty(text: &str) -> String {
    let empty = hooks_object(text).map(|m| m.is_empty()).unwrap_or(false);
    if empty {
        let outcome = jsonc::remove_at_path(text, &[PathSeg::key(HOOKS_KEY)]);
        if outcome.changed {
            return outcome.text;
        }
    }
    text.to_string()
}
