use super::*;
use crate::registry::component::ComponentRegistry;

#[test]
fn empty_json_uses_defaults() {
    let config = BuilderConfig::from_json_str("{}").unwrap();
    assert_eq!(config, BuilderConfig::default());
    assert!(config.themes.find("slate").is_some());
}

#[test]
fn page_defaults_parse_in_camel_case() {
    let config = BuilderConfig::from_json_str(
        r#"{ "idSeed": 9, "page": { "name": "Start", "mode": "dark", "colorTheme": "stone", "className": "min-h-screen" } }"#,
    )
    .unwrap();
    let props = config.page_props();
    assert_eq!(props.get("mode").and_then(|v| v.as_str()), Some("dark"));
    assert_eq!(props.get("colorTheme").and_then(|v| v.as_str()), Some("stone"));
    assert_eq!(
        props.get("className").and_then(|v| v.as_str()),
        Some("min-h-screen")
    );

    assert_eq!(config.id_seed, 9);

    let store = config.create_store(Arc::new(ComponentRegistry::builder().build().unwrap()));
    assert_eq!(store.selected_page().name(), "Start");
    assert_eq!(store.selected_page().color_theme(), Some("stone"));
}

#[test]
fn unknown_default_theme_is_rejected() {
    let err = BuilderConfig::from_json_str(r#"{ "page": { "colorTheme": "plaid" } }"#).unwrap_err();
    assert!(matches!(err, LayerError::Validation(_)));
}

#[test]
fn missing_file_reports_path() {
    let err = BuilderConfig::load(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("definitely/not/here.json"));
}

#[test]
fn same_seed_same_first_page_id() {
    let config = BuilderConfig::default();
    let registry = Arc::new(ComponentRegistry::builder().build().unwrap());
    let a = config.create_store(registry.clone());
    let b = config.create_store(registry);
    assert_eq!(a.selected_page_id(), b.selected_page_id());
}
