use super::*;
use crate::{
    foundation::ids::LayerId,
    model::layer::{ComponentLayer, TextLayer, TextType},
    registry::component::{ComponentRenderer, ElementRenderer, PropSchema, Rendered},
    render::editor::{EditorWrapper, IntentQueue},
    render::node::BoundaryState,
};
use serde_json::json;
use std::{rc::Rc, sync::Arc};

struct Failing;

impl ComponentRenderer for Failing {
    fn render(&self, _input: RenderInput<'_>) -> anyhow::Result<Rendered> {
        anyhow::bail!("chart data missing")
    }
}

struct Lazy;

impl ComponentRenderer for Lazy {
    fn render(&self, _input: RenderInput<'_>) -> anyhow::Result<Rendered> {
        Ok(Rendered::Pending)
    }
}

fn registry() -> ComponentRegistry {
    ComponentRegistry::builder()
        .register(
            "box",
            Arc::new(ElementRenderer::new("div")),
            PropSchema::default(),
        )
        .register("chart", Arc::new(Failing), PropSchema::default())
        .register("lazy", Arc::new(Lazy), PropSchema::default())
        .build()
        .unwrap()
}

fn props(v: serde_json::Value) -> Props {
    v.as_object().cloned().unwrap()
}

fn slate_page() -> Page {
    Page::new("P", "Home")
        .with_props(props(json!({ "mode": "light", "colorTheme": "slate" })))
        .with_child(
            ComponentLayer::new("C", "box")
                .with_child(TextLayer::new("T", "hello", TextType::Plain)),
        )
}

fn ready(node: &RenderNode) -> &RenderNode {
    match node {
        RenderNode::Boundary {
            state: BoundaryState::Ready { node },
            ..
        } => node,
        other => panic!("expected ready boundary, got {other:?}"),
    }
}

fn editor(node: &RenderNode) -> &EditorWrapper {
    match node {
        RenderNode::Editor(w) => w,
        other => panic!("expected editor wrapper, got {other:?}"),
    }
}

#[test]
fn plain_render_of_themed_page() {
    let registry = registry();
    let themes = ThemeTable::builtin();
    let out = PagePipeline::new(&registry, &themes).render_plain(&slate_page());

    let RenderNode::Element {
        tag,
        props: root_props,
        children,
    } = &out
    else {
        panic!("expected root element");
    };
    assert_eq!(tag, "div");
    assert_eq!(root_props.get("className"), Some(&json!(PAGE_ROOT_CLASS)));
    assert_eq!(
        root_props.get("style"),
        Some(&json!({
            "backgroundColor": "hsl(0 0% 100%)",
            "color": "hsl(222.2 84% 4.9%)",
            "borderColor": "hsl(214.3 31.8% 91.4%)"
        }))
    );
    assert!(root_props.get("mode").is_none());
    assert!(root_props.get("colorTheme").is_none());

    let RenderNode::Element {
        tag: box_tag,
        children: box_children,
        ..
    } = ready(&children[0])
    else {
        panic!("expected box element");
    };
    assert_eq!(box_tag, "div");
    assert_eq!(box_children.len(), 1);
    assert_eq!(
        ready(&box_children[0]),
        &RenderNode::Element {
            tag: "span".into(),
            props: Props::new(),
            children: vec![RenderNode::text("hello")],
        }
    );
}

#[test]
fn editor_render_marks_selected_text_one_level_deeper() {
    let registry = registry();
    let themes = ThemeTable::builtin();
    let page = slate_page();
    let config = EditorConfig::new(
        page.count_layers(),
        Some(LayerId::new("T")),
        Rc::new(IntentQueue::new()),
    );
    let out = PagePipeline::new(&registry, &themes).render_for_editor(&page, &config);

    let box_wrapper = editor(&out.children()[0]);
    assert_eq!(box_wrapper.layer_id, "C");
    assert_eq!(box_wrapper.z_index, 0);
    assert_eq!(box_wrapper.total_layers, 2);
    assert!(!box_wrapper.is_selected);

    let text_wrapper = out.find_editor("T").unwrap();
    assert!(text_wrapper.is_selected);
    assert_eq!(text_wrapper.z_index, box_wrapper.z_index + 1);
    assert_eq!(text_wrapper.total_layers, 2);
}

#[test]
fn editor_mode_does_not_change_content() {
    let registry = registry();
    let themes = ThemeTable::builtin();
    let page = slate_page();
    let pipeline = PagePipeline::new(&registry, &themes);
    let config = EditorConfig::new(2, None, Rc::new(IntentQueue::new()));

    let plain = pipeline.render_plain(&page);
    let edited = pipeline.render_for_editor(&page, &config);
    assert_eq!(
        plain.children()[0].unwrap_content().children().len(),
        edited.children()[0].unwrap_content().children().len()
    );
    assert!(plain.find_boundary("T").is_some());
    assert_eq!(plain.find_boundary("T"), edited.find_boundary("T"));
}

#[test]
fn rendering_is_deterministic() {
    let registry = registry();
    let themes = ThemeTable::builtin();
    let page = slate_page();
    let pipeline = PagePipeline::new(&registry, &themes);
    assert_eq!(pipeline.render_plain(&page), pipeline.render_plain(&page));

    let config = EditorConfig::new(2, Some(LayerId::new("C")), Rc::new(IntentQueue::new()));
    assert_eq!(
        pipeline.render_for_editor(&page, &config),
        pipeline.render_for_editor(&page, &config)
    );
}

#[test]
fn explicit_style_wins_over_theme() {
    let registry = registry();
    let themes = ThemeTable::builtin();
    let page = Page::new("P", "Home").with_props(props(json!({
        "mode": "dark",
        "colorTheme": "zinc",
        "style": { "color": "red", "padding": "4px" },
        "className": "custom",
        "id": "main"
    })));
    let out = PagePipeline::new(&registry, &themes).render_plain(&page);
    let RenderNode::Element { props, .. } = &out else {
        panic!("expected element");
    };
    assert_eq!(props.get("className"), Some(&json!("custom")));
    assert_eq!(props.get("id"), Some(&json!("main")));
    assert_eq!(
        props.get("style"),
        Some(&json!({
            "backgroundColor": "hsl(240 10% 3.9%)",
            "color": "red",
            "borderColor": "hsl(240 3.7% 15.9%)",
            "padding": "4px"
        }))
    );
}

#[test]
fn unknown_theme_renders_without_overrides() {
    let registry = registry();
    let themes = ThemeTable::builtin();
    let page = Page::new("P", "Home").with_props(props(json!({ "colorTheme": "plaid" })));
    let out = PagePipeline::new(&registry, &themes).render_plain(&page);
    let RenderNode::Element { props, .. } = &out else {
        panic!("expected element");
    };
    assert!(props.get("style").is_none());
}

#[test]
fn unknown_component_renders_nothing_even_in_editor_mode() {
    let registry = registry();
    let themes = ThemeTable::builtin();
    let page = Page::new("P", "Home")
        .with_child(ComponentLayer::new("gone", "carousel"))
        .with_child(ComponentLayer::new("C", "box"));
    let pipeline = PagePipeline::new(&registry, &themes);

    assert_eq!(pipeline.render_plain(&page).children()[0], RenderNode::Empty);

    let config = EditorConfig::new(2, None, Rc::new(IntentQueue::new()));
    let edited = pipeline.render_for_editor(&page, &config);
    assert_eq!(edited.children()[0], RenderNode::Empty);
    assert!(edited.find_editor("C").is_some());
}

#[test]
fn failing_and_pending_renderers_are_isolated_per_layer() {
    let registry = registry();
    let themes = ThemeTable::builtin();
    let page = Page::new("P", "Home").with_child(
        ComponentLayer::new("C", "box")
            .with_child(ComponentLayer::new("bad", "chart"))
            .with_child(ComponentLayer::new("slow", "lazy"))
            .with_child(TextLayer::new("ok", "still here", TextType::Plain)),
    );
    let out = PagePipeline::new(&registry, &themes).render_plain(&page);

    assert!(matches!(
        out.find_boundary("C"),
        Some(BoundaryState::Ready { .. })
    ));
    assert!(matches!(
        out.find_boundary("bad"),
        Some(BoundaryState::Failed { message }) if message.contains("chart data missing")
    ));
    assert_eq!(out.find_boundary("slow"), Some(&BoundaryState::Loading));
    assert!(matches!(
        out.find_boundary("ok"),
        Some(BoundaryState::Ready { .. })
    ));
    assert!(out.to_html().contains("still here"));
}

#[test]
fn markdown_text_layers_use_markdown_renderer() {
    let registry = registry();
    let themes = ThemeTable::builtin();
    let page = Page::new("P", "Home").with_child(TextLayer::new(
        "md",
        "*hi*",
        TextType::Markdown,
    ));
    let html = PagePipeline::new(&registry, &themes)
        .render_plain(&page)
        .to_html();
    assert!(html.contains("<em>hi</em>"));
    assert!(html.contains("class=\"prose"));
}
