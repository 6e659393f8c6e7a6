//! Purpose: Render extracted documents as 2-space pretty JSON with optional ANSI color.
//! Exports: `render_json`.
//! Role: Pure formatter used by the `extract` command's stdout path.
//! Invariants: With color off, output equals `serde_json::to_string_pretty`.
//! Invariants: Escapes wrap tokens only; whitespace and newlines are never colored.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

#[derive(Clone, Copy)]
struct Palette {
    key: &'static str,
    string: &'static str,
    number: &'static str,
    literal: &'static str,
    punct: &'static str,
}

// 8/16-color codes only; bright variants wash out on light themes.
const PALETTE: Palette = Palette {
    key: "34",
    string: "32",
    number: "36",
    literal: "35",
    punct: "39",
};

struct Renderer {
    palette: Option<Palette>,
    out: String,
}

pub fn render_json(value: &Value, use_color: bool) -> String {
    let mut renderer = Renderer {
        palette: use_color.then_some(PALETTE),
        out: String::new(),
    };
    renderer.value(value, 0);
    renderer.out
}

impl Renderer {
    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.token("null", |p| p.literal),
            Value::Bool(flag) => self.token(if *flag { "true" } else { "false" }, |p| p.literal),
            Value::Number(num) => self.token(&num.to_string(), |p| p.number),
            Value::String(text) => self.token(&quote(text), |p| p.string),
            Value::Array(items) => self.array(items, depth),
            Value::Object(map) => self.object(map, depth),
        }
    }

    fn array(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            return self.token("[]", |p| p.punct);
        }
        self.token("[", |p| p.punct);
        for (idx, item) in items.iter().enumerate() {
            self.separator(idx, depth + 1);
            self.value(item, depth + 1);
        }
        self.close("]", depth);
    }

    fn object(&mut self, map: &Map<String, Value>, depth: usize) {
        if map.is_empty() {
            return self.token("{}", |p| p.punct);
        }
        self.token("{", |p| p.punct);
        for (idx, (key, item)) in map.iter().enumerate() {
            self.separator(idx, depth + 1);
            self.token(&quote(key), |p| p.key);
            self.token(":", |p| p.punct);
            self.out.push(' ');
            self.value(item, depth + 1);
        }
        self.close("}", depth);
    }

    fn separator(&mut self, idx: usize, depth: usize) {
        if idx > 0 {
            self.token(",", |p| p.punct);
        }
        self.out.push('\n');
        self.indent(depth);
    }

    fn close(&mut self, bracket: &str, depth: usize) {
        self.out.push('\n');
        self.indent(depth);
        self.token(bracket, |p| p.punct);
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    fn token(&mut self, text: &str, pick: impl Fn(&Palette) -> &'static str) {
        match &self.palette {
            Some(palette) => {
                let code = pick(palette);
                self.out.push_str("\u{1b}[");
                self.out.push_str(code);
                self.out.push('m');
                self.out.push_str(text);
                self.out.push_str("\u{1b}[0m");
            }
            None => self.out.push_str(text),
        }
    }
}

fn quote(text: &str) -> String {
    // Serializing a str cannot fail.
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}
