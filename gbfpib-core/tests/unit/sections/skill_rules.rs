use super::*;

fn grid(weapon: &str, skills: serde_json::Value, mods: serde_json::Value) -> GameSnapshot {
    GameSnapshot::from_value(serde_json::json!({
        "ver": 2,
        "lang": "en",
        "p": 150201,
        "pcjs": "150201_sw_1_01",
        "c": [],
        "s": [],
        "w": [weapon, "1040001000"],
        "wl": [15, 10],
        "wsn": [skills, ["heal_limit_m", null, null]],
        "est": [1, "0", "0"],
        "mods": mods,
    }))
    .unwrap()
}

fn guess(snapshot: &GameSnapshot, skill: usize) -> Option<String> {
    let weapon = snapshot.weapon(0).unwrap();
    SpecialWeaponRules.guess(snapshot, &weapon, skill)
}

fn hidden_third() -> serde_json::Value {
    serde_json::json!(["a", "b", "skill_job_weapon"])
}

#[test]
fn classifies_weapon_families() {
    assert_eq!(SpecialWeapon::classify("1040310600"), Some(SpecialWeapon::DarkOpus));
    assert_eq!(SpecialWeapon::classify("1040310600_03"), Some(SpecialWeapon::DarkOpus));
    assert_eq!(SpecialWeapon::classify("1040310600_04"), None);
    assert_eq!(SpecialWeapon::classify("1040907500"), Some(SpecialWeapon::Ultima));
    assert_eq!(SpecialWeapon::classify("1040028900"), Some(SpecialWeapon::Destruction));
    assert_eq!(
        SpecialWeapon::classify("1040516500"),
        Some(SpecialWeapon::OriginDraconic)
    );
    assert_eq!(SpecialWeapon::classify("1040001000"), None);
}

#[test]
fn dark_opus_prefers_earlier_rules() {
    let snap = grid(
        "1040310600_02",
        hidden_third(),
        serde_json::json!([
            {"icon_img": "03_icon_turn_dmg.png", "value": "10%"},
            {"icon_img": "03_icon_hp_cut.png", "value": "30%"},
        ]),
    );
    assert_eq!(
        guess(&snap, 2).as_deref(),
        Some("assets_en/img/sp/assets/item/skillplus/s/14014.jpg")
    );
}

#[test]
fn dark_opus_falsehood_window() {
    let make = |v: &str| {
        grid(
            "1040017000",
            hidden_third(),
            serde_json::json!([{"icon_img": "04_icon_ca_gage.png", "value": v}]),
        )
    };
    assert!(guess(&make("-50%"), 2).unwrap().ends_with("/14017.jpg"));
    assert_eq!(guess(&make("-200%"), 2), None);
    assert_eq!(guess(&make("-20%"), 2), None);
}

#[test]
fn only_the_hidden_icon_is_replaced() {
    let snap = grid(
        "1040310600",
        serde_json::json!(["a", "b", "skill_other"]),
        serde_json::json!([{"icon_img": "03_icon_hp_cut.png", "value": "40%"}]),
    );
    assert_eq!(guess(&snap, 2), None);
}

#[test]
fn ultima_heal_cap_counts_heal_skills() {
    let mods = serde_json::json!([
        {"icon_img": "03_icon_heal_cap.png", "value": "50%"},
        {"icon_img": "04_icon_ca_gage.png", "value": "10%"},
    ]);
    // one healing cap skill on the grid
    let snap = grid("1040011900", hidden_third(), mods.clone());
    assert!(guess(&snap, 2).unwrap().ends_with("/17002.jpg"));

    // two: undecided
    let snap = grid(
        "1040011900",
        serde_json::json!(["heal_limit", "b", "skill_job_weapon"]),
        mods.clone(),
    );
    assert_eq!(guess(&snap, 2), None);

    // three
    let snap = grid(
        "1040011900",
        serde_json::json!(["heal_limit", "heal_limit_m", "skill_job_weapon"]),
        mods,
    );
    assert!(guess(&snap, 2).unwrap().ends_with("/17004.jpg"));
}

#[test]
fn ultima_seraphic_wins() {
    let snap = grid(
        "1040011900",
        hidden_third(),
        serde_json::json!([
            {"icon_img": "04_icon_dmg_cap.png", "value": "10%"},
            {"icon_img": "04_icon_elem_amplify.png", "value": "25%"},
        ]),
    );
    assert!(guess(&snap, 2).unwrap().ends_with("/17003.jpg"));
}

#[test]
fn destruction_needs_supplemental_and_cap() {
    let snap = grid(
        "1040028900",
        hidden_third(),
        serde_json::json!([
            {"icon_img": "04_icon_normal_dmg_supp_other.png", "value": "+20000"},
            {"icon_img": "04_icon_na_dmg_cap.png", "value": "10%"},
        ]),
    );
    assert!(guess(&snap, 2).unwrap().ends_with("/19001.jpg"));

    let snap = grid(
        "1040028900",
        hidden_third(),
        serde_json::json!([{"icon_img": "04_icon_skill_dmg_supp_other.png", "value": "+30000"}]),
    );
    assert_eq!(guess(&snap, 2), None);
}

#[test]
fn origin_draconic_guesses_second_skill() {
    let snap = grid(
        "1040815900",
        serde_json::json!(["a", "skill_job_weapon", null]),
        serde_json::json!([{"icon_img": "04_icon_plain_amplify.png", "value": "10%"}]),
    );
    assert!(guess(&snap, 1).unwrap().ends_with("/15009.jpg"));
    assert_eq!(guess(&snap, 2), None);
}

#[test]
fn modifier_keeps_last_parseable_value() {
    let snapshot = grid(
        "1040001000",
        hidden_third(),
        serde_json::json!([
            {"icon_img": "03_icon_hp_cut.png", "value": "+20%"},
            {"icon_img": "01_icon_atk.png", "value": "+5%"},
            {"icon_img": "03_icon_hp_cut.png", "value": "---"},
        ]),
    );
    assert_eq!(modifier(&snapshot, "03_icon_hp_cut.png"), 20.0);
    assert_eq!(modifier(&snapshot, "01_icon_atk.png"), 5.0);
    assert_eq!(modifier(&snapshot, "missing.png"), 0.0);
}
