use serde_json::Value;

use crate::{
    model::layer::Props,
    render::node::{BoundaryState, RenderNode},
};

const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

impl RenderNode {
    /// Serialize the output tree as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }
}

fn write_node(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Empty => {}
        RenderNode::Text { text } => escape_into(text, out),
        RenderNode::RawHtml { html } => out.push_str(html),
        RenderNode::Element {
            tag,
            props,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            write_attrs(props, out);
            if children.is_empty() && VOID_TAGS.contains(&tag.as_str()) {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        RenderNode::Boundary { state, .. } => match state {
            BoundaryState::Ready { node } => write_node(node, out),
            BoundaryState::Loading => out.push_str("<div>Loading...</div>"),
            BoundaryState::Failed { message } => {
                out.push_str("<div role=\"alert\"><p>Something went wrong:</p><pre>");
                escape_into(message, out);
                out.push_str("</pre></div>");
            }
        },
        RenderNode::Editor(wrapper) => {
            out.push_str("<div class=\"layer-wrapper");
            if wrapper.is_selected {
                out.push_str(" layer-selected");
            }
            out.push_str("\" data-layer-id=\"");
            escape_into(wrapper.layer_id.as_str(), out);
            out.push_str("\" data-layer-name=\"");
            escape_into(&wrapper.label, out);
            out.push_str(&format!(
                "\" data-total-layers=\"{}\" style=\"z-index: {}\">",
                wrapper.total_layers, wrapper.z_index
            ));
            write_node(&wrapper.child, out);
            out.push_str("</div>");
        }
    }
}

fn write_attrs(props: &Props, out: &mut String) {
    for (key, value) in props {
        if key == "children" || !is_attr_name(key) || is_event_handler(key) {
            continue;
        }
        let name = match key.as_str() {
            "className" => "class",
            "htmlFor" => "for",
            other => other,
        };
        match value {
            Value::String(s) => push_attr(name, s, out),
            Value::Number(n) => push_attr(name, &n.to_string(), out),
            Value::Bool(true) => {
                out.push(' ');
                out.push_str(name);
            }
            Value::Object(map) if key == "style" => push_attr(name, &css_text(map), out),
            _ => {}
        }
    }
}

fn push_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(value, out);
    out.push('"');
}

/// `onClick`, `onmouseover`, ...: string props never become inline handlers.
fn is_event_handler(key: &str) -> bool {
    key.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("on"))
}

fn is_attr_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

/// `{ backgroundColor: "red" }` -> `background-color: red`.
pub(crate) fn css_text(style: &Props) -> String {
    let mut decls = Vec::with_capacity(style.len());
    for (key, value) in style {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => continue,
        };
        decls.push(format!("{}: {}", kebab_case(key), value));
    }
    decls.join("; ")
}

fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub(crate) fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/html.rs"]
mod tests;
