use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// `{{{name}}}` inserts trusted HTML verbatim, `{{name}}` inserts escaped text.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\{(\w+)\}\}\}|\{\{(\w+)\}\}").unwrap());

/// Replace placeholders with values from `vars`. Unknown names render empty.
pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures| {
            if let Some(raw) = caps.get(1) {
                vars.get(raw.as_str()).cloned().unwrap_or_default()
            } else {
                let name = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                vars.get(name).map(|v| escape_html(v)).unwrap_or_default()
            }
        })
        .to_string()
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
