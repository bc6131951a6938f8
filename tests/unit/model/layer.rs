use super::*;
use serde_json::json;

fn props(v: serde_json::Value) -> Props {
    v.as_object().cloned().unwrap()
}

fn sample() -> ComponentLayer {
    ComponentLayer::new("root", "box")
        .with_child(
            ComponentLayer::new("a", "row")
                .with_child(TextLayer::new("a1", "one", TextType::Plain))
                .with_child(TextLayer::new("a2", "two", TextType::Markdown)),
        )
        .with_child(ComponentLayer::new("b", "button_group"))
}

#[test]
fn find_is_preorder_and_includes_self() {
    let tree = sample();
    assert_eq!(tree.find("root").unwrap().id(), "root");
    assert!(tree.find("a2").unwrap().is_text());
    assert_eq!(tree.find("b").unwrap().kind(), "button_group");
    assert!(tree.find("nope").is_none());
}

#[test]
fn path_to_tracks_child_indices() {
    let tree = sample();
    assert_eq!(tree.path_to("root"), Some(vec![]));
    assert_eq!(tree.path_to("a2"), Some(vec![0, 1]));
    assert_eq!(tree.path_to("b"), Some(vec![1]));
    assert_eq!(tree.path_to("zz"), None);
}

#[test]
fn component_at_mut_rejects_text_targets() {
    let mut tree = sample();
    assert!(tree.component_at_mut(&[0]).is_some());
    assert!(tree.component_at_mut(&[0, 0]).is_none());
    assert!(tree.layer_at_mut(&[0, 0]).is_some());
    assert!(tree.layer_at_mut(&[5]).is_none());
}

#[test]
fn display_name_falls_back_to_stripped_type() {
    let tree = sample();
    assert_eq!(tree.find("b").unwrap().display_name(), "buttongroup");
    assert_eq!(tree.find("a1").unwrap().display_name(), "text");
    let named = ComponentLayer::new("n", "box").with_name("Hero");
    assert_eq!(LayerRef::Component(&named).display_name(), "Hero");
}

#[test]
fn descendants_are_counted() {
    assert_eq!(sample().count_descendants(), 4);
}

#[test]
fn fresh_id_clone_keeps_shape() {
    let original = Layer::Component(sample());
    let mut n = 0;
    let copy = original.clone_with_fresh_ids(&mut || {
        n += 1;
        LayerId::new(format!("c{n}"))
    });
    assert_eq!(copy.id(), "c1");

    let mut ids = Vec::new();
    copy.for_each_id(&mut |id| ids.push(id.to_string()));
    assert_eq!(ids, vec!["c1", "c2", "c3", "c4", "c5"]);

    let (Layer::Component(a), Layer::Component(b)) = (&original, &copy) else {
        panic!("expected components");
    };
    assert_eq!(a.kind, b.kind);
    assert_eq!(a.children.len(), b.children.len());
}

#[test]
fn serde_distinguishes_variants() {
    let raw = json!({
        "id": "c",
        "type": "box",
        "props": { "className": "p-4" },
        "children": [
            { "id": "t", "type": "_text_", "text": "hi", "textType": "markdown" }
        ]
    });
    let layer: Layer = serde_json::from_value(raw.clone()).unwrap();
    let Layer::Component(c) = &layer else {
        panic!("expected component");
    };
    assert_eq!(c.props, props(json!({ "className": "p-4" })));
    let Layer::Text(t) = &c.children[0] else {
        panic!("expected text");
    };
    assert_eq!(t.text_type, TextType::Markdown);
    assert_eq!(serde_json::to_value(&layer).unwrap(), raw);
}

#[test]
fn text_with_children_does_not_deserialize() {
    let raw = json!({
        "id": "t",
        "type": "_text_",
        "text": "hi",
        "children": []
    });
    assert!(serde_json::from_value::<Layer>(raw).is_err());
}

#[test]
fn blueprint_build_assigns_ids_parent_first() {
    let blueprint = NewLayer::component("box")
        .with_name("Card")
        .with_child(NewLayer::text("hello", TextType::Plain))
        .with_child(NewLayer::component("row"));
    assert_eq!(blueprint.component_kinds(), vec!["box", "row"]);

    let mut n = 0;
    let built = blueprint.build(&mut || {
        n += 1;
        LayerId::new(format!("n{n}"))
    });
    let Layer::Component(c) = built else {
        panic!("expected component");
    };
    assert_eq!(c.id, "n1");
    assert_eq!(c.name.as_deref(), Some("Card"));
    assert_eq!(c.children[0].id(), "n2");
    assert_eq!(c.children[1].id(), "n3");
}

#[test]
fn text_blueprint_ignores_children() {
    let blueprint = NewLayer::text("x", TextType::Plain).with_child(NewLayer::component("box"));
    assert!(matches!(blueprint, NewLayer::Text { .. }));
}
