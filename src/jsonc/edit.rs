use std::ops::Range;

use serde_json::Value;

use super::PathSeg;
use super::parser::{Member, Node, NodeKind, ParseError, parse};

#[derive(Debug)]
pub struct EditOutcome {
    pub text: String,
    pub changed: bool,
    pub errors: Vec<ParseError>,
}

fn unchanged(text: &str, errors: Vec<ParseError>) -> EditOutcome {
    EditOutcome {
        text: text.to_string(),
        changed: false,
        errors,
    }
}

fn splice(text: &str, span: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..span.start]);
    out.push_str(replacement);
    out.push_str(&text[span.end..]);
    out
}

fn splice_insert(text: &str, pos: usize, insertion: &str) -> String {
    splice(text, pos..pos, insertion)
}

fn node_at<'a>(root: &'a Node, path: &[PathSeg]) -> Option<&'a Node> {
    let mut cur = root;
    for seg in path {
        cur = match (seg, &cur.kind) {
            (PathSeg::Key(k), NodeKind::Object(members)) => {
                &members.iter().find(|m| &m.key == k)?.value
            }
            (PathSeg::Index(i), NodeKind::Array(items)) => items.get(*i)?,
            _ => return None,
        };
    }
    Some(cur)
}

/// Removes the node at `path`, splicing out the smallest span that leaves
/// valid syntax behind. Paths that do not resolve are skipped.
pub fn remove_at_path(text: &str, path: &[PathSeg]) -> EditOutcome {
    let (root, errors) = parse(text);
    let Some(root) = root else {
        return unchanged(text, errors);
    };
    let Some((last, parent_path)) = path.split_last() else {
        return unchanged(text, errors);
    };
    let Some(parent) = node_at(&root, parent_path) else {
        return unchanged(text, errors);
    };

    let spans: Vec<Range<usize>>;
    let index = match (last, &parent.kind) {
        (PathSeg::Key(k), NodeKind::Object(members)) => {
            spans = members.iter().map(|m| m.span.clone()).collect();
            members.iter().position(|m| &m.key == k)
        }
        (PathSeg::Index(i), NodeKind::Array(items)) => {
            spans = items.iter().map(|n| n.span.clone()).collect();
            (*i < items.len()).then_some(*i)
        }
        _ => return unchanged(text, errors),
    };
    let Some(index) = index else {
        return unchanged(text, errors);
    };

    let range = removal_span(text, &spans, index, parent.span.clone());
    EditOutcome {
        text: splice(text, range, ""),
        changed: true,
        errors,
    }
}

/// Picks the span to delete for entry `index`, swallowing the separator
/// comma on the correct side.
fn removal_span(
    text: &str,
    spans: &[Range<usize>],
    index: usize,
    container: Range<usize>,
) -> Range<usize> {
    let bytes = text.as_bytes();
    if spans.len() == 1 {
        // Sole entry: also take a trailing comma, and the leading
        // whitespace when nothing but whitespace precedes it.
        let mut end = spans[index].end;
        let mut probe = end;
        while probe + 1 < container.end && bytes[probe].is_ascii_whitespace() {
            probe += 1;
        }
        if probe + 1 < container.end && bytes[probe] == b',' {
            end = probe + 1;
        }
        let mut start = spans[index].start;
        let mut back = start;
        while back > container.start + 1 && bytes[back - 1].is_ascii_whitespace() {
            back -= 1;
        }
        if back == container.start + 1 {
            start = back;
        }
        start..end
    } else if index + 1 < spans.len() {
        // Take the entry, its separator comma, and (when the entry had
        // the line to itself) the rest of its line. Stopping there keeps
        // comments that sit between this entry and the next one.
        let mut start = spans[index].start;
        let mut end = spans[index].end;
        while end < container.end && matches!(bytes[end], b' ' | b'\t') {
            end += 1;
        }
        if end < container.end && bytes[end] == b',' {
            end += 1;
        }
        let mut probe = end;
        while probe < container.end && matches!(bytes[probe], b' ' | b'\t') {
            probe += 1;
        }
        if probe < container.end && bytes[probe] == b'\n' {
            end = probe + 1;
            while start > container.start + 1 && matches!(bytes[start - 1], b' ' | b'\t') {
                start -= 1;
            }
        } else {
            end = probe;
        }
        start..end
    } else {
        spans[index - 1].end..spans[index].end
    }
}

/// Sets `value` at `path`, replacing an existing node in place or
/// inserting a new entry. `Index == len` appends; missing intermediate
/// containers are created. Everything outside the edited span is kept
/// byte for byte.
pub fn set_at_path(text: &str, path: &[PathSeg], value: &Value) -> EditOutcome {
    if path.is_empty() {
        return unchanged(text, Vec::new());
    }
    let (root, errors) = parse(text);
    let Some(root) = root else {
        // A damaged document is left alone. A blank one gets a fresh
        // tree; a comment-only one keeps its comments, with the new
        // root spliced in after them.
        if !errors.is_empty() {
            return unchanged(text, errors);
        }
        let built = wrap_in_path(path, value);
        let rendered = format_value(&built, "", "  ", false);
        if text.trim().is_empty() {
            return EditOutcome {
                text: format!("{rendered}\n"),
                changed: true,
                errors,
            };
        }
        let mut out = text.to_string();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&rendered);
        out.push('\n');
        return EditOutcome {
            text: out,
            changed: true,
            errors,
        };
    };

    let unit = detect_indent_unit(text);
    let mut cur = &root;
    let mut depth = 0;
    while depth < path.len() {
        match (&path[depth], &cur.kind) {
            (PathSeg::Key(k), NodeKind::Object(members)) => {
                match members.iter().find(|m| &m.key == k) {
                    Some(member) => {
                        cur = &member.value;
                        depth += 1;
                    }
                    None => break,
                }
            }
            (PathSeg::Index(i), NodeKind::Array(items)) => {
                if *i < items.len() {
                    cur = &items[*i];
                    depth += 1;
                } else if *i == items.len() {
                    break;
                } else {
                    return unchanged(text, errors);
                }
            }
            _ => return unchanged(text, errors),
        }
    }

    if depth == path.len() {
        let indent = line_indent(text, cur.span.start);
        let compact = !text[cur.span.clone()].contains('\n');
        let rendered = format_value(value, &indent, &unit, compact);
        let out = splice(text, cur.span.clone(), &rendered);
        let changed = out != text;
        return EditOutcome {
            text: out,
            changed,
            errors,
        };
    }

    let nested = wrap_in_path(&path[depth + 1..], value);
    let out = match (&path[depth], &cur.kind) {
        (PathSeg::Key(k), NodeKind::Object(members)) => {
            insert_member(text, cur, members, k, &nested, &unit)
        }
        (PathSeg::Index(_), NodeKind::Array(items)) => {
            insert_element(text, cur, items, &nested, &unit)
        }
        _ => None,
    };
    match out {
        Some(new_text) => EditOutcome {
            text: new_text,
            changed: true,
            errors,
        },
        None => unchanged(text, errors),
    }
}

fn insert_member(
    text: &str,
    obj: &Node,
    members: &[Member],
    key: &str,
    value: &Value,
    unit: &str,
) -> Option<String> {
    let key_text = json_quote(key);
    if let Some(last) = members.last() {
        if text[obj.span.clone()].contains('\n') {
            let indent = line_indent(text, last.span.start);
            let rendered = format_value(value, &indent, unit, false);
            Some(splice_insert(
                text,
                last.span.end,
                &format!(",\n{indent}{key_text}: {rendered}"),
            ))
        } else {
            let rendered = format_value(value, "", unit, true);
            Some(splice_insert(
                text,
                last.span.end,
                &format!(", {key_text}: {rendered}"),
            ))
        }
    } else {
        let bytes = text.as_bytes();
        if obj.span.end <= obj.span.start + 1 || bytes.get(obj.span.end - 1) != Some(&b'}') {
            return None;
        }
        let close = obj.span.end - 1;
        let inner = &text[obj.span.start + 1..close];
        if inner.trim().is_empty() {
            // Nothing inside to preserve, so re-render the whole object.
            let mut map = serde_json::Map::new();
            map.insert(key.to_string(), value.clone());
            let whole = Value::Object(map);
            let indent = line_indent(text, obj.span.start);
            let compact = !text.contains('\n');
            let rendered = format_value(&whole, &indent, unit, compact);
            Some(splice(text, obj.span.clone(), &rendered))
        } else {
            // Comments between the braces stay where they are.
            let outer = line_indent(text, obj.span.start);
            let indent = format!("{outer}{unit}");
            let rendered = format_value(value, &indent, unit, false);
            Some(splice_insert(
                text,
                close,
                &format!("\n{indent}{key_text}: {rendered}\n{outer}"),
            ))
        }
    }
}

fn insert_element(
    text: &str,
    arr: &Node,
    items: &[Node],
    value: &Value,
    unit: &str,
) -> Option<String> {
    if let Some(last) = items.last() {
        if text[arr.span.clone()].contains('\n') {
            let indent = line_indent(text, last.span.start);
            let rendered = format_value(value, &indent, unit, false);
            Some(splice_insert(
                text,
                last.span.end,
                &format!(",\n{indent}{rendered}"),
            ))
        } else {
            let rendered = format_value(value, "", unit, true);
            Some(splice_insert(text, last.span.end, &format!(", {rendered}")))
        }
    } else {
        let bytes = text.as_bytes();
        if arr.span.end <= arr.span.start + 1 || bytes.get(arr.span.end - 1) != Some(&b']') {
            return None;
        }
        let close = arr.span.end - 1;
        let inner = &text[arr.span.start + 1..close];
        if inner.trim().is_empty() {
            let whole = Value::Array(vec![value.clone()]);
            let indent = line_indent(text, arr.span.start);
            let compact = !text.contains('\n');
            let rendered = format_value(&whole, &indent, unit, compact);
            Some(splice(text, arr.span.clone(), &rendered))
        } else {
            let outer = line_indent(text, arr.span.start);
            let indent = format!("{outer}{unit}");
            let rendered = format_value(value, &indent, unit, false);
            Some(splice_insert(
                text,
                close,
                &format!("\n{indent}{rendered}\n{outer}"),
            ))
        }
    }
}

fn wrap_in_path(path: &[PathSeg], value: &Value) -> Value {
    let mut acc = value.clone();
    for seg in path.iter().rev() {
        acc = match seg {
            PathSeg::Key(k) => {
                let mut map = serde_json::Map::new();
                map.insert(k.clone(), acc);
                Value::Object(map)
            }
            PathSeg::Index(_) => Value::Array(vec![acc]),
        };
    }
    acc
}

fn format_value(value: &Value, indent: &str, unit: &str, compact: bool) -> String {
    match value {
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Object(map) => {
            if compact {
                let members: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", json_quote(k), format_value(v, "", unit, true)))
                    .collect();
                format!("{{ {} }}", members.join(", "))
            } else {
                let inner = format!("{indent}{unit}");
                let members: Vec<String> = map
                    .iter()
                    .map(|(k, v)| {
                        format!(
                            "{inner}{}: {}",
                            json_quote(k),
                            format_value(v, &inner, unit, false)
                        )
                    })
                    .collect();
                format!("{{\n{}\n{indent}}}", members.join(",\n"))
            }
        }
        Value::Array(items) => {
            if compact {
                let rendered: Vec<String> = items
                    .iter()
                    .map(|v| format_value(v, "", unit, true))
                    .collect();
                format!("[{}]", rendered.join(", "))
            } else {
                let inner = format!("{indent}{unit}");
                let rendered: Vec<String> = items
                    .iter()
                    .map(|v| format!("{inner}{}", format_value(v, &inner, unit, false)))
                    .collect();
                format!("[\n{}\n{indent}]", rendered.join(",\n"))
            }
        }
        scalar => serde_json::to_string(scalar).unwrap_or_else(|_| "null".to_string()),
    }
}

fn json_quote(key: &str) -> String {
    serde_json::to_string(key).unwrap_or_else(|_| format!("\"{key}\""))
}

fn detect_indent_unit(text: &str) -> String {
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.len() == line.len() {
            continue;
        }
        return line[..line.len() - trimmed.len()].to_string();
    }
    "  ".to_string()
}

fn line_indent(text: &str, offset: usize) -> String {
    let line_start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let bytes = text.as_bytes();
    let mut end = line_start;
    while end < offset && (bytes[end] == b' ' || bytes[end] == b'\t') {
        end += 1;
    }
    text[line_start..end].to_string()
}
