use super::*;

fn party() -> serde_json::Value {
    serde_json::json!({
        "ver": 2.0,
        "lang": "en",
        "p": 150201,
        "pcjs": "150201_sw_1_01",
        "ps": ["Rage IV", null, "Armor Break"],
        "c": [3040035000i64, null, 3040036000i64],
        "cn": ["Seox", null, "Seofon"],
        "cl": [100, null, 150],
        "cs": [5, null, 6],
        "cp": [99, null, 0],
        "cb": [3, "4", 5, 6],
        "s": [2040003000i64, null],
        "ss": ["2040003000", null],
        "sl": [150, null],
        "w": ["1040001000", "1040002000_02", null],
        "wl": [10, null, null],
        "wsn": [["skill_a", null, "skill_c"], null, null],
        "waxt": [["1588"], null, null],
        "waxi": [["1588", "1589"], null, null],
        "wax": [[[{"show_value": "+3%"}, {"show_value": 5}]], null, null],
        "wakn": [{"is_arousal_weapon": true, "level": 5, "form": 1}, null, null],
        "est": [2, "12345", "23456"],
        "estx": [["txt-gauge-num hp", "73"]],
        "mods": [{"icon_img": "a.png", "value": "+30%", "is_max": true}],
        "sps": "Bahamut",
    })
}

#[test]
fn scalar_views() {
    assert_eq!(Scalar::Text(" 42 ".into()).as_i64(), Some(42));
    assert_eq!(Scalar::Float(3.9).as_i64(), Some(3));
    assert_eq!(Scalar::Text("+12.5%".into()).as_f64(), Some(12.5));
    assert_eq!(Scalar::Bool(true).as_i64(), None);
    assert_eq!(Scalar::Int(7).to_string(), "7");
    assert!(Scalar::Text("x".into()).is_text());
}

#[test]
fn missing_required_field_is_validation_error() {
    let mut raw = party();
    raw.as_object_mut().unwrap().remove("mods");
    let err = GameSnapshot::from_value(raw).unwrap_err();
    assert!(matches!(err, PibError::Validation(_)));
}

#[test]
fn character_slots_skip_nulls() {
    let snap = GameSnapshot::from_value(party()).unwrap();
    assert_eq!(snap.language(), Language::English);

    let first = snap.character(0).unwrap();
    assert_eq!(first.name, "Seox");
    assert_eq!(first.plus, 99);
    assert_eq!(first.skill_count, Some(&Scalar::Text("4".into())));

    assert!(snap.character(1).is_none());
    assert!(snap.character(9).is_none());
    assert_eq!(snap.character(2).unwrap().uncap, 6);
}

#[test]
fn summon_and_weapon_slots() {
    let snap = GameSnapshot::from_value(party()).unwrap();
    assert_eq!(snap.summon(0).unwrap().image, "2040003000");
    assert!(snap.summon(1).is_none());

    let main = snap.weapon(0).unwrap();
    assert!(main.has_ax());
    assert!(main.has_awakening());
    assert_eq!(main.ax_skills.len(), 2);

    // a weapon without skill level is treated as empty
    assert!(snap.weapon(1).is_none());
    assert!(snap.weapon(2).is_none());
}

#[test]
fn weapon_skills_and_ax_values() {
    let snap = GameSnapshot::from_value(party()).unwrap();
    assert_eq!(snap.weapon_skill(0, 0), Some("skill_a"));
    assert_eq!(snap.weapon_skill(0, 1), None);
    assert_eq!(snap.weapon_skills().collect::<Vec<_>>(), ["skill_a", "skill_c"]);
    assert_eq!(snap.ax_value(0, 0), "3");
    assert_eq!(snap.ax_value(0, 1), "5");
    assert_eq!(snap.ax_value(0, 2), "");
}

#[test]
fn estimates_and_hp() {
    let snap = GameSnapshot::from_value(party()).unwrap();
    assert_eq!(snap.estimate_element(), Some(Element::Water));
    assert!(!snap.has_extra_grid());
    assert_eq!(snap.hp_ratio(), 73);
    assert_eq!(snap.support_summon(), Some(SupportSummon::Name("Bahamut")));
}

#[test]
fn hp_defaults_to_full() {
    let mut raw = party();
    raw["estx"] = serde_json::json!([]);
    raw["spsid"] = serde_json::json!(2040003000i64);
    let snap = GameSnapshot::from_value(raw).unwrap();
    assert_eq!(snap.hp_ratio(), 100);
    assert_eq!(
        snap.support_summon(),
        Some(SupportSummon::Id("2040003000".into()))
    );
}

#[test]
fn modifier_magnitude() {
    let snap = GameSnapshot::from_value(party()).unwrap();
    assert_eq!(snap.mods[0].magnitude(), Some(30.0));
    assert!(snap.mods[0].is_max);
}
