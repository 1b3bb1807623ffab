use std::ops::Range;

use serde_json::{Map, Number, Value};

/// A non-fatal syntax problem, reported with its byte offset.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub offset: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub span: Range<usize>,
    pub kind: NodeKind,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Object(Vec<Member>),
    Array(Vec<Node>),
    Str(String),
    Num(String),
    Bool(bool),
    Null,
}

/// One object member; the span runs from the key's opening quote through
/// the end of the value.
#[derive(Debug, Clone)]
pub struct Member {
    pub key: String,
    pub span: Range<usize>,
    pub value: Node,
}

impl Node {
    /// Projects the tree into a plain value for duck-typed inspection.
    pub fn to_value(&self) -> Value {
        match &self.kind {
            NodeKind::Object(members) => {
                let mut map = Map::new();
                for member in members {
                    map.insert(member.key.clone(), member.value.to_value());
                }
                Value::Object(map)
            }
            NodeKind::Array(items) => Value::Array(items.iter().map(Node::to_value).collect()),
            NodeKind::Str(s) => Value::String(s.clone()),
            NodeKind::Num(raw) => {
                if let Ok(n) = raw.parse::<i64>() {
                    Value::Number(n.into())
                } else if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
                    Value::Number(n)
                } else {
                    Value::Null
                }
            }
            NodeKind::Bool(b) => Value::Bool(*b),
            NodeKind::Null => Value::Null,
        }
    }
}

/// Parses a JSON-with-comments document, tolerating line and block
/// comments, trailing commas, and local syntax damage. Problems are
/// collected rather than thrown; a blank document yields no root.
pub fn parse(text: &str) -> (Option<Node>, Vec<ParseError>) {
    let mut parser = Parser {
        src: text.as_bytes(),
        text,
        pos: 0,
        errors: Vec::new(),
    };
    parser.skip_trivia();
    if parser.pos >= parser.src.len() {
        return (None, parser.errors);
    }
    let root = parser.parse_value();
    parser.skip_trivia();
    if parser.pos < parser.src.len() {
        parser.error("unexpected trailing content");
    }
    (root, parser.errors)
}

struct Parser<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
    errors: Vec<ParseError>,
}

impl Parser<'_> {
    fn error(&mut self, message: &str) {
        self.errors.push(ParseError {
            offset: self.pos,
            message: message.to_string(),
        });
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.text[self.pos..].chars().next() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            while let Some(b) = self.peek() {
                if matches!(b, b' ' | b'\t' | b'\r' | b'\n') {
                    self.pos += 1;
                } else {
                    break;
                }
            }
            if self.src[self.pos..].starts_with(b"//") {
                while let Some(b) = self.peek() {
                    if b == b'\n' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if self.src[self.pos..].starts_with(b"/*") {
                self.pos += 2;
                match self.text[self.pos..].find("*/") {
                    Some(idx) => self.pos += idx + 2,
                    None => {
                        self.error("unterminated block comment");
                        self.pos = self.src.len();
                    }
                }
            } else {
                break;
            }
        }
    }

    fn parse_value(&mut self) -> Option<Node> {
        match self.peek() {
            Some(b'{') => Some(self.parse_object()),
            Some(b'[') => Some(self.parse_array()),
            Some(b'"') => Some(self.parse_string_node()),
            Some(b't') | Some(b'f') | Some(b'n') => self.parse_keyword(),
            Some(b) if b == b'-' || b == b'+' || b.is_ascii_digit() => Some(self.parse_number()),
            _ => {
                self.error("expected a JSON value");
                None
            }
        }
    }

    fn parse_object(&mut self) -> Node {
        let start = self.pos;
        self.pos += 1;
        let mut members = Vec::new();
        let mut need_comma = false;
        loop {
            self.skip_trivia();
            match self.peek() {
                None => {
                    self.error("unterminated object");
                    break;
                }
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => {
                    self.pos += 1;
                    need_comma = false;
                }
                Some(b'"') => {
                    if need_comma {
                        self.error("expected ',' between members");
                    }
                    let key_start = self.pos;
                    let key = self.parse_string_raw();
                    self.skip_trivia();
                    if self.peek() == Some(b':') {
                        self.pos += 1;
                    } else {
                        self.error("expected ':' after object key");
                        self.recover_in_container(b'}');
                        continue;
                    }
                    self.skip_trivia();
                    match self.parse_value() {
                        Some(value) => {
                            let end = value.span.end;
                            members.push(Member {
                                key,
                                span: key_start..end,
                                value,
                            });
                            need_comma = true;
                        }
                        None => self.recover_in_container(b'}'),
                    }
                }
                Some(_) => {
                    self.error("expected object key");
                    self.recover_in_container(b'}');
                }
            }
        }
        Node {
            span: start..self.pos,
            kind: NodeKind::Object(members),
        }
    }

    fn parse_array(&mut self) -> Node {
        let start = self.pos;
        self.pos += 1;
        let mut items = Vec::new();
        let mut need_comma = false;
        loop {
            self.skip_trivia();
            match self.peek() {
                None => {
                    self.error("unterminated array");
                    break;
                }
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                Some(b',') => {
                    self.pos += 1;
                    need_comma = false;
                }
                Some(_) => {
                    if need_comma {
                        self.error("expected ',' between elements");
                    }
                    match self.parse_value() {
                        Some(node) => {
                            items.push(node);
                            need_comma = true;
                        }
                        None => self.recover_in_container(b']'),
                    }
                }
            }
        }
        Node {
            span: start..self.pos,
            kind: NodeKind::Array(items),
        }
    }

    /// Skips forward to the next separator so one bad entry does not take
    /// the rest of the container with it.
    fn recover_in_container(&mut self, close: u8) {
        while let Some(b) = self.peek() {
            if b == b',' || b == close {
                break;
            }
            self.advance_char();
        }
    }

    fn parse_string_node(&mut self) -> Node {
        let start = self.pos;
        let value = self.parse_string_raw();
        Node {
            span: start..self.pos,
            kind: NodeKind::Str(value),
        }
    }

    fn parse_string_raw(&mut self) -> String {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => {
                    self.error("unterminated string");
                    break;
                }
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(b'"') => {
                            out.push('"');
                            self.pos += 1;
                        }
                        Some(b'\\') => {
                            out.push('\\');
                            self.pos += 1;
                        }
                        Some(b'/') => {
                            out.push('/');
                            self.pos += 1;
                        }
                        Some(b'b') => {
                            out.push('\u{0008}');
                            self.pos += 1;
                        }
                        Some(b'f') => {
                            out.push('\u{000C}');
                            self.pos += 1;
                        }
                        Some(b'n') => {
                            out.push('\n');
                            self.pos += 1;
                        }
                        Some(b'r') => {
                            out.push('\r');
                            self.pos += 1;
                        }
                        Some(b't') => {
                            out.push('\t');
                            self.pos += 1;
                        }
                        Some(b'u') => {
                            self.pos += 1;
                            match self.parse_unicode_escape() {
                                Some(ch) => out.push(ch),
                                None => {
                                    self.error("invalid unicode escape");
                                    out.push('\u{FFFD}');
                                }
                            }
                        }
                        Some(_) => {
                            self.error("invalid escape sequence");
                            if let Some(ch) = self.text[self.pos..].chars().next() {
                                out.push(ch);
                                self.pos += ch.len_utf8();
                            }
                        }
                        None => {
                            self.error("unterminated string");
                            break;
                        }
                    }
                }
                Some(_) => {
                    if let Some(ch) = self.text[self.pos..].chars().next() {
                        out.push(ch);
                        self.pos += ch.len_utf8();
                    } else {
                        break;
                    }
                }
            }
        }
        out
    }

    fn parse_unicode_escape(&mut self) -> Option<char> {
        let first = self.read_hex4()?;
        if (0xD800..=0xDBFF).contains(&first) {
            let save = self.pos;
            if self.text[self.pos..].starts_with("\\u") {
                self.pos += 2;
                if let Some(second) = self.read_hex4()
                    && (0xDC00..=0xDFFF).contains(&second)
                {
                    let cp = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
                    return char::from_u32(cp);
                }
            }
            self.pos = save;
            return None;
        }
        char::from_u32(first)
    }

    fn read_hex4(&mut self) -> Option<u32> {
        let end = self.pos.checked_add(4)?;
        if end > self.src.len() {
            self.pos = self.src.len();
            return None;
        }
        let value = u32::from_str_radix(&self.text[self.pos..end], 16).ok()?;
        self.pos = end;
        Some(value)
    }

    fn parse_keyword(&mut self) -> Option<Node> {
        let start = self.pos;
        for (literal, kind) in [
            ("true", NodeKind::Bool(true)),
            ("false", NodeKind::Bool(false)),
            ("null", NodeKind::Null),
        ] {
            if self.text[self.pos..].starts_with(literal) {
                self.pos += literal.len();
                return Some(Node {
                    span: start..self.pos,
                    kind,
                });
            }
        }
        self.error("expected a JSON value");
        self.advance_char();
        None
    }

    fn parse_number(&mut self) -> Node {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E') {
                self.pos += 1;
            } else {
                break;
            }
        }
        Node {
            span: start..self.pos,
            kind: NodeKind::Num(self.text[start..self.pos].to_string()),
        }
    }
}
