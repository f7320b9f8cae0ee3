// File: ./src/render/html.rs
//! HTML/CSS rendition for hosts that screenshot a page.
use crate::layout::{Body, NO_TASKS, Snapshot};
use std::fmt::Write;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
  html, body { margin: 0; background: #fff; color: #000; }
  body { width: {{width}}px; height: {{height}}px; overflow: hidden;
         font-family: "DejaVu Sans", sans-serif; box-sizing: border-box; padding: 10px; }
  h1 { font-size: 24px; margin: 0 0 16px 0; }
  ul { list-style: none; margin: 0; padding: 0; }
  li.task { font-size: 16px; margin-bottom: 12px; }
  li.group { font-size: 16px; font-weight: bold; margin: 8px 0; }
  .glyph { display: inline-block; min-width: 1.6em; font-weight: bold; }
  .detail { font-size: 13px; margin-left: 1.6em; }
  .message { font-size: 16px; }
  .error { position: absolute; top: 50%; left: 10px; }
</style>
</head>
<body>
<h1>{{title}}</h1>
{{body}}
</body>
</html>
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn body_markup(body: &Body) -> String {
    let mut out = String::new();
    match body {
        Body::Tasks(lines) => {
            out.push_str("<ul>\n");
            let mut group: Option<&str> = None;
            for line in lines {
                if let Some(name) = line.group.as_deref()
                    && Some(name) != group
                {
                    let _ = writeln!(out, "<li class=\"group\">{}</li>", escape(name));
                    group = Some(name);
                }
                let _ = write!(
                    out,
                    "<li class=\"task\"><span class=\"glyph\">{}</span>{}",
                    escape(line.glyph.symbol()),
                    escape(&line.text)
                );
                for detail in &line.details {
                    let _ = write!(out, "<div class=\"detail\">{}</div>", escape(detail));
                }
                out.push_str("</li>\n");
            }
            out.push_str("</ul>");
        }
        Body::Empty => {
            let _ = write!(out, "<p class=\"message\">{}</p>", NO_TASKS);
        }
        Body::Prompt(msg) => {
            let _ = write!(out, "<p class=\"message\">{}</p>", escape(msg));
        }
        Body::Error(msg) => {
            let _ = write!(out, "<p class=\"message error\">{}</p>", escape(msg));
        }
    }
    out
}

/// Single-pass `{{key}}` substitution; values are never rescanned, so text
/// coming from a provider cannot expand into another placeholder.
fn fill(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let key = &after[..end];
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

pub fn render(snapshot: &Snapshot, width: u32, height: u32) -> String {
    fill(
        TEMPLATE,
        &[
            ("width", width.to_string()),
            ("height", height.to_string()),
            ("title", escape(&snapshot.title)),
            ("body", body_markup(&snapshot.body)),
        ],
    )
}
