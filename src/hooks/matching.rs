use serde_json::Value;

use super::HookMatcher;

/// Exact structural equality between a typed matcher and an untrusted
/// settings entry: same matcher string, same hook count, each hook equal
/// on `(type, command)`, and no extra properties anywhere. Entries that
/// fail shape checks simply do not match.
pub fn matcher_equals(wanted: &HookMatcher, entry: &Value) -> bool {
    let Some(obj) = entry.as_object() else {
        return false;
    };
    if obj.len() != 2 {
        return false;
    }
    if obj.get("matcher").and_then(Value::as_str) != Some(wanted.matcher.as_str()) {
        return false;
    }
    let Some(hooks) = obj.get("hooks").and_then(Value::as_array) else {
        return false;
    };
    if hooks.len() != wanted.hooks.len() {
        return false;
    }
    wanted.hooks.iter().zip(hooks).all(|(w, entry_hook)| {
        let Some(h) = entry_hook.as_object() else {
            return false;
        };
        h.len() == 2
            && h.get("type").and_then(Value::as_str) == Some(w.kind.as_str())
            && h.get("command").and_then(Value::as_str) == Some(w.command.as_str())
    })
}

/// Indices into `existing` that exactly equal some member of `wanted`.
/// Partial overlap is not a match at all.
pub fn matchers_to_remove(wanted: &[HookMatcher], existing: &[Value]) -> Vec<usize> {
    existing
        .iter()
        .enumerate()
        .filter(|(_, entry)| wanted.iter().any(|w| matcher_equals(w, entry)))
        .map(|(index, _)| index)
        .collect()
}

/// Indices of hooks inside an entry whose command mentions `needle`.
pub(super) fn entry_hooks_containing(entry: &Value, needle: &str) -> Vec<usize> {
    entry
        .as_object()
        .and_then(|obj| obj.get("hooks"))
        .and_then(Value::as_array)
        .map(|hooks| {
            hooks
                .iter()
                .enumerate()
                .filter(|(_, hook)| {
                    hook.get("command")
                        .and_then(Value::as_str)
                        .map(|command| command.contains(needle))
                        .unwrap_or(false)
                })
                .map(|(index, _)| index)
                .collect()
        })
        .unwrap_or_default()
}
