use super::*;
use serde_json::json;

struct Fixed;

impl ComponentRenderer for Fixed {
    fn render(&self, _input: RenderInput<'_>) -> anyhow::Result<Rendered> {
        Ok(Rendered::Ready(RenderNode::element("fixed")))
    }
}

#[test]
fn builder_rejects_reserved_and_duplicate_tags() {
    for reserved in [TEXT_TYPE, PAGE_TYPE, ""] {
        let err = ComponentRegistry::builder()
            .register(reserved, Arc::new(Fixed), PropSchema::default())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("empty or reserved"));
    }

    let err = ComponentRegistry::builder()
        .register("box", Arc::new(Fixed), PropSchema::default())
        .register("box", Arc::new(Fixed), PropSchema::default())
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("registered twice"));
}

#[test]
fn lookup_and_kinds() {
    let registry = ComponentRegistry::builder()
        .register("zeta", Arc::new(Fixed), PropSchema::default())
        .register(
            "alpha",
            Arc::new(Fixed),
            PropSchema::new(json!({ "type": "object" })).with_default("variant", json!("primary")),
        )
        .build()
        .unwrap();
    assert!(registry.contains("alpha"));
    assert!(!registry.contains("beta"));
    assert_eq!(registry.kinds().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
    assert_eq!(
        registry.get("alpha").unwrap().schema.defaults.get("variant"),
        Some(&json!("primary"))
    );
}

#[test]
fn element_renderer_puts_content_before_children() {
    let id = LayerId::new("x");
    let mut props = Props::new();
    props.insert("className".into(), json!("p-2"));
    let out = ElementRenderer::new("p")
        .render(RenderInput {
            layer_id: &id,
            props: &props,
            content: Some("hi"),
            children: vec![RenderNode::element("b")],
        })
        .unwrap();
    assert_eq!(
        out,
        Rendered::Ready(RenderNode::Element {
            tag: "p".into(),
            props,
            children: vec![RenderNode::text("hi"), RenderNode::element("b")],
        })
    );
}

#[test]
fn default_text_renderers() {
    let registry = ComponentRegistry::builder().build().unwrap();
    let id = LayerId::new("t");
    let props = Props::new();

    let plain = registry
        .text_renderer(TextType::Plain)
        .render(RenderInput {
            layer_id: &id,
            props: &props,
            content: Some("hello"),
            children: Vec::new(),
        })
        .unwrap();
    let Rendered::Ready(RenderNode::Element { tag, children, .. }) = plain else {
        panic!("expected element");
    };
    assert_eq!(tag, "span");
    assert_eq!(children, vec![RenderNode::text("hello")]);

    let md = registry
        .text_renderer(TextType::Markdown)
        .render(RenderInput {
            layer_id: &id,
            props: &props,
            content: Some("**bold**"),
            children: Vec::new(),
        })
        .unwrap();
    let Rendered::Ready(node) = md else {
        panic!("expected ready");
    };
    assert!(node.to_html().contains("<strong>bold</strong>"));
}

#[test]
fn html_primitives_cover_common_tags() {
    let registry = ComponentRegistry::html_primitives().unwrap();
    for tag in ["div", "p", "button", "img", "h1"] {
        assert!(registry.contains(tag), "{tag} missing");
    }
}
