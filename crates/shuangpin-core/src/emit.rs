//! Renders a [`KeyTable`] as an Emacs Lisp `defconst`.

use crate::variant::KeyTable;

/// Header, one quoted string per key, closing line.
pub fn render(name: &str, keys: &KeyTable) -> Vec<String> {
    let mut lines = Vec::with_capacity(keys.rows().len() + 2);
    lines.push(format!("(defconst {name} '("));
    for row in keys.rows() {
        lines.push(format!("  \"{}\"", escape(row)));
    }
    lines.push("))".to_string());
    lines
}

/// Escape `"` and `\` for an Emacs Lisp string literal.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
