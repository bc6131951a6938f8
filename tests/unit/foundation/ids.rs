use super::*;
use std::collections::HashSet;

#[test]
fn generator_is_deterministic_for_seed() {
    let mut a = IdGenerator::new(7);
    let mut b = IdGenerator::new(7);
    for _ in 0..16 {
        assert_eq!(a.next_id(), b.next_id());
    }
}

#[test]
fn generator_never_repeats() {
    let mut g = IdGenerator::default();
    let ids: HashSet<LayerId> = (0..10_000).map(|_| g.next_id()).collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn ids_are_lowercase_base36() {
    let mut g = IdGenerator::new(42);
    let id = g.next_id();
    assert!(!id.as_str().is_empty());
    assert!(
        id.as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    );
}

#[test]
fn encode_base36_edges() {
    assert_eq!(encode_base36(0), "0");
    assert_eq!(encode_base36(35), "z");
    assert_eq!(encode_base36(36), "10");
}

#[test]
fn layer_id_compares_with_str() {
    let id = LayerId::new("abc");
    assert_eq!(id, "abc");
    assert_eq!(id.to_string(), "abc");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
}
