use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::{
    model::layer::Props,
    registry::component::{ComponentRenderer, RenderInput, Rendered},
    render::html::escape_into,
    render::node::RenderNode,
};

const PROSE_CLASS: &str = "prose break-words prose-headings:text-secondary-foreground \
prose-blockquote:text-secondary-foreground prose-strong:text-secondary-foreground \
prose-p:leading-relaxed prose-pre:p-0 prose-pre:m-1 prose-p:text-base prose-p:font-normal \
prose-p:my-1 prose-ul:my-1 prose-ol:my-1 prose-li:py-0 prose-li:my-0 max-w-none \
text-secondary-foreground";

const LINK_CLASS: &str = "text-blue-500 hover:text-blue-600";
const IMAGE_CLASS: &str = "w-full h-auto";
const INLINE_CODE_CLASS: &str = "whitespace-pre-wrap";

/// URL schemes kept in links and image sources; relative URLs always pass.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "irc", "ircs", "xmpp"];

/// CommonMark (plus tables, strikethrough, task lists) to HTML.
///
/// Raw HTML in the source is shown as text, never passed through. Links open
/// in a new tab and URLs with unknown schemes are dropped.
#[derive(Clone, Debug, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Convert markdown source to an HTML fragment.
    pub fn to_html(source: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);

        let mut parser = Parser::new_ext(source, options);
        let mut events = Vec::new();
        while let Some(event) = parser.next() {
            let event = match event {
                Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
                Event::Start(Tag::Link { dest_url, .. }) => {
                    let mut tag = String::from("<a href=\"");
                    escape_into(safe_url(&dest_url), &mut tag);
                    tag.push_str(&format!(
                        "\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"{LINK_CLASS}\">"
                    ));
                    Event::InlineHtml(CowStr::from(tag))
                }
                Event::Start(Tag::Image { dest_url, .. }) => {
                    let alt = image_alt(&mut parser);
                    let mut tag = String::from("<img src=\"");
                    escape_into(safe_url(&dest_url), &mut tag);
                    tag.push_str("\" alt=\"");
                    escape_into(&alt, &mut tag);
                    tag.push_str(&format!("\" class=\"{IMAGE_CLASS}\" />"));
                    Event::InlineHtml(CowStr::from(tag))
                }
                Event::Code(code) => {
                    let mut tag = format!("<code class=\"{INLINE_CODE_CLASS}\">");
                    escape_into(&code, &mut tag);
                    tag.push_str("</code>");
                    Event::InlineHtml(CowStr::from(tag))
                }
                other => other,
            };
            events.push(event);
        }

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Plain text of an image description, consuming events through its end tag.
fn image_alt<'a>(events: &mut impl Iterator<Item = Event<'a>>) -> String {
    let mut alt = String::new();
    let mut depth = 0usize;
    for event in events {
        match event {
            Event::Start(Tag::Image { .. }) => depth += 1,
            Event::End(TagEnd::Image) if depth == 0 => break,
            Event::End(TagEnd::Image) => depth -= 1,
            Event::Text(t) | Event::Code(t) | Event::Html(t) | Event::InlineHtml(t) => {
                alt.push_str(&t)
            }
            Event::SoftBreak | Event::HardBreak => alt.push(' '),
            _ => {}
        }
    }
    alt
}

/// `url` when relative or using an allowed scheme, otherwise empty.
fn safe_url(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    // A `/`, `?` or `#` before the colon makes it part of a relative path.
    if url[..colon].contains(['/', '?', '#']) {
        return url;
    }
    let scheme = &url[..colon];
    if SAFE_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
        url
    } else {
        ""
    }
}

impl ComponentRenderer for MarkdownRenderer {
    fn render(&self, input: RenderInput<'_>) -> anyhow::Result<Rendered> {
        let source = input.content.unwrap_or_default();

        let mut props = Props::new();
        let class = match input.props.get("className").and_then(|v| v.as_str()) {
            Some(extra) if !extra.is_empty() => format!("{PROSE_CLASS} {extra}"),
            _ => PROSE_CLASS.to_owned(),
        };
        props.insert("className".to_owned(), class.into());
        for (key, value) in input.props {
            if key != "className" {
                props.insert(key.clone(), value.clone());
            }
        }

        Ok(Rendered::Ready(RenderNode::Element {
            tag: "div".to_owned(),
            props,
            children: vec![RenderNode::RawHtml {
                html: Self::to_html(source),
            }],
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/markdown.rs"]
mod tests;
