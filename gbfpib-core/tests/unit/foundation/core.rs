use super::*;

#[test]
fn advantage_cycles_match_the_element_wheel() {
    let pairs = [
        (Element::Fire, Element::Wind),
        (Element::Water, Element::Fire),
        (Element::Earth, Element::Water),
        (Element::Wind, Element::Earth),
        (Element::Light, Element::Dark),
        (Element::Dark, Element::Light),
    ];
    for (attacker, target) in pairs {
        assert_eq!(attacker.advantage_target(), target, "{attacker:?}");
    }
}

#[test]
fn element_ids_roundtrip_and_reject_unknown() {
    for id in 1..=6 {
        assert_eq!(Element::from_id(id).unwrap().id(), id);
    }
    assert!(Element::from_id(0).is_none());
    assert!(Element::from_id(99).is_none());
}

#[test]
fn language_codes() {
    assert!(Language::from_code("ja").is_japanese());
    assert!(!Language::from_code("en").is_japanese());
    assert_eq!(Element::Dark.name(Language::Japanese), "闇");
}

#[test]
fn color_hex_is_lowercase_rrggbb() {
    assert_eq!(palette::MODIFIER_MAX.hex(), "#ffa826");
    assert_eq!(palette::BLACK.opacity(), 1.0);
}

#[test]
fn canvas_constants_agree() {
    assert_eq!(CANVAS_SIZE.i(), (1800, 2160));
}
