use super::*;

fn mastery() -> MasteryRecord {
    serde_json::from_value(serde_json::json!({
        "id": "3040035000",
        "lang": "en",
        "emp": [
            {"image": "1", "current_level": 10, "is_lock": false},
            {"image": "2", "current_level": "0", "is_lock": false},
            {"is_lock": true},
        ],
        "ring": [{"type": {"image": "ring_atk", "name": "ATK"}, "param": {"disp_total_param": "+1500"}}],
        "awakening": "lv4",
        "awaktype": "防御",
        "domain": [["a", "t", "1"], ["a", "t", null]],
        "saint": [
            ["ico-progress-gauge on", null, null],
            ["ico-progress-gauge", null, null],
            ["other", null, null],
        ],
        "extra": [["a", null, null], ["b", null, null]],
    }))
    .unwrap()
}

#[test]
fn mastery_slot_levels() {
    let rec = mastery();
    assert_eq!(rec.emp[0].level_text().as_deref(), Some("10"));
    assert_eq!(rec.emp[1].level_text(), None);
    assert!(rec.emp[2].is_lock);
    assert!(!rec.is_transcended());
}

#[test]
fn awakening_fields() {
    let rec = mastery();
    assert_eq!(rec.awakening_level().as_deref(), Some("4"));
    assert_eq!(rec.awakening_kind(), AwakeningKind::Defense);
    assert!(AwakeningKind::Balanced.remote_icon().is_none());
    assert_eq!(AwakeningKind::from_label("???"), AwakeningKind::Balanced);
}

#[test]
fn upgrade_lines() {
    let ups = mastery().upgrades();
    let texts: Vec<_> = ups.iter().map(|u| (u.track, u.text.as_str())).collect();
    assert_eq!(
        texts,
        [
            (UpgradeTrack::Domain, "Lv1"),
            (UpgradeTrack::Saint, "1/2"),
            (UpgradeTrack::Extra, "Lv2"),
        ]
    );
}

#[test]
fn artifact_import_is_normalized() {
    let mut raw = serde_json::json!({
        "id": 3040035000i64,
        "lang": "en",
        "artifact": {
            "img": "https://host/x/y/301010101.jpg",
            "skills": [{"lvl": "Lv. 5", "icon": "https://host/icon/1001.png", "desc": "ATK: up", "value": "+10%"}],
        },
    });
    assert!(normalize_artifact_import(&mut raw));
    let rec: ArtifactRecord = serde_json::from_value(raw).unwrap();
    let (img, skills) = rec.equipped().unwrap();
    assert_eq!(img, "301010101.jpg");
    assert_eq!(skills[0].icon, "1001.png");
    assert_eq!(skills[0].lvl, Scalar::Text("5".into()));
}

#[test]
fn artifact_without_equipment() {
    let mut raw = serde_json::json!({"id": 1, "artifact": {}});
    assert!(!normalize_artifact_import(&mut raw));
    let rec: ArtifactRecord = serde_json::from_value(raw).unwrap();
    assert!(rec.equipped().is_none());
}
