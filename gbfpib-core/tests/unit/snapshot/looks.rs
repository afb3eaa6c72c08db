use super::*;

fn snapshot(extra: serde_json::Value) -> GameSnapshot {
    let mut base = serde_json::json!({
        "lang": "en",
        "p": 150201,
        "pcjs": "150201_sw_1_01",
        "c": [3040035000i64, 3710098000i64, 3030182000i64, 3710154000i64],
        "s": [],
        "w": [],
        "est": [1, 0, 0],
        "mods": [],
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    GameSnapshot::from_value(base).unwrap()
}

#[test]
fn uncap_ids() {
    assert_eq!(uncap_id(0), "01");
    assert_eq!(uncap_id(3), "02");
    assert_eq!(uncap_id(5), "03");
    assert_eq!(uncap_id(6), "04");
}

#[test]
fn character_stars_follow_level_bands() {
    assert_eq!(character_star(3, 80), "assets/star_0.png");
    assert_eq!(character_star(4, 80), "assets/star_1.png");
    assert_eq!(character_star(5, 100), "assets/star_2.png");
    assert_eq!(character_star(6, 100), "assets/star_4_1.png");
    assert_eq!(character_star(6, 110), "assets/star_4_1.png");
    assert_eq!(character_star(6, 111), "assets/star_4_2.png");
    assert_eq!(character_star(6, 150), "assets/star_4_5.png");
    assert_eq!(character_star(6, 180), "assets/star_4_5.png");
}

#[test]
fn summon_stars_follow_level_bands() {
    assert_eq!(summon_star(3, 100), "assets/star_1.png");
    assert_eq!(summon_star(5, 150), "assets/star_3.png");
    assert_eq!(summon_star(6, 210), "assets/star_4_1.png");
    assert_eq!(summon_star(6, 235), "assets/star_4_4.png");
    assert_eq!(summon_star(6, 250), "assets/star_4_5.png");
}

#[test]
fn plain_character_look() {
    let snap = snapshot(serde_json::json!({"cs": [5], "cst": [1]}));
    let slot = snap.character(0).unwrap();
    assert_eq!(character_look(&snap, &slot), "3040035000_03");
}

#[test]
fn styled_character_resets_uncap() {
    let snap = snapshot(serde_json::json!({"cs": [6], "cst": [2]}));
    let slot = snap.character(0).unwrap();
    assert_eq!(character_look(&snap, &slot), "3040035000_01_st2");
}

#[test]
fn skin_characters_map_to_their_base() {
    let snap = snapshot(serde_json::json!({
        "cl": [1, 90, 1, 1],
        "ce": [1, 1, 1, 5],
    }));
    let seox = snap.character(1).unwrap();
    assert_eq!(character_look(&snap, &seox), "3040035000_01");
    let clarisse = snap.character(3).unwrap();
    assert_eq!(character_look(&snap, &clarisse), "3040121000_01");
}

#[test]
fn null_character_takes_element_suffix() {
    let snap = snapshot(serde_json::json!({"ce": [1, 1, 4, 1], "cs": [0, 0, 4, 0]}));
    let slot = snap.character(2).unwrap();
    assert_eq!(character_look(&snap, &slot), "3030182000_02_04");

    let snap = snapshot(serde_json::json!({"ce": [1, 1, 99, 1], "pce": 3}));
    let slot = snap.character(2).unwrap();
    assert_eq!(character_look(&snap, &slot), "3030182000_01_03");
}

#[test]
fn job_look_keeps_skin_tail() {
    assert_eq!(base_job(150201), "150201");
    assert_eq!(base_job(150299), "150201");
    assert_eq!(job_look("150201", "sw", "370101_kn_1_01"), "150201_sw_1_01");
}
