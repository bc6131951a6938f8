use super::*;
use serde_json::json;

#[test]
fn builtin_lookup_is_exact() {
    let table = ThemeTable::builtin();
    assert!(table.find("slate").is_some());
    assert!(table.find("Slate").is_none());
    assert!(table.find("sla").is_none());
    table.validate().unwrap();
}

#[test]
fn overrides_follow_mode() {
    let table = ThemeTable::builtin();
    let slate = table.find("slate").unwrap();
    let light = slate.style_overrides(ColorMode::Light);
    assert_eq!(light[0], ("backgroundColor", "hsl(0 0% 100%)".to_string()));
    assert_eq!(light[1], ("color", "hsl(222.2 84% 4.9%)".to_string()));
    assert_eq!(light[2], ("borderColor", "hsl(214.3 31.8% 91.4%)".to_string()));

    let dark = slate.style_overrides(ColorMode::Dark);
    assert_eq!(dark[0].1, "hsl(222.2 84% 4.9%)");
}

#[test]
fn mode_prop_defaults_to_light() {
    assert_eq!(ColorMode::from_prop(None), ColorMode::Light);
    assert_eq!(ColorMode::from_prop(Some(&json!("dark"))), ColorMode::Dark);
    assert_eq!(ColorMode::from_prop(Some(&json!("sepia"))), ColorMode::Light);
    assert_eq!(ColorMode::from_prop(Some(&json!(3))), ColorMode::Light);
}

#[test]
fn duplicate_names_are_rejected() {
    let slate = ThemeTable::builtin().find("slate").unwrap().clone();
    let err = ThemeTable::new(vec![slate.clone(), slate]).unwrap_err();
    assert!(err.to_string().contains("duplicate theme name"));
}

#[test]
fn table_deserializes_from_css_vars_shape() {
    let raw = json!([{
        "name": "mono",
        "cssVars": {
            "light": { "background": "0 0% 100%", "foreground": "0 0% 0%", "border": "0 0% 50%" },
            "dark": { "background": "0 0% 0%", "foreground": "0 0% 100%", "border": "0 0% 50%" }
        }
    }]);
    let table: ThemeTable = serde_json::from_value(raw).unwrap();
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["mono"]);
}
