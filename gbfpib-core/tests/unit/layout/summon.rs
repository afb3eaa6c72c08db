use super::*;

#[test]
fn slot_positions() {
    let layout = SummonLayout::default();
    assert_eq!(layout.portrait_position(0).i(), (170, 425));
    assert_eq!(layout.portrait_position(1).i(), (509, 425));
    assert_eq!(layout.portrait_position(2).i(), (775, 425));
    assert_eq!(layout.portrait_position(3).i(), (509, 691));
    assert_eq!(layout.portrait_position(5).i(), (1091, 527));
    assert_eq!(layout.portrait_position(6).i(), (1091, 742));
}

#[test]
fn sizes_and_folders() {
    let layout = SummonLayout::default();
    assert_eq!(layout.portrait_size(0).i(), (271, 472));
    assert_eq!(layout.portrait_size(4).i(), (266, 200));
    assert_eq!(layout.portrait_size(6).i(), (273, 155));
    assert_eq!(layout.asset_folder(0), ("party_main", "ls"));
    assert_eq!(layout.asset_folder(2), ("party_sub", "m"));
    assert_eq!(layout.asset_folder(5), ("m", "m"));
}

#[test]
fn derived_offsets() {
    let layout = SummonLayout::default();
    assert_eq!(layout.background_size.i(), (1224, 615));
    assert_eq!(layout.sub_marker_offset.i(), (1136, 425));
    assert_eq!(layout.stat_offset.i(), (509, 957));
    assert_eq!(layout.stat_hp_text_offset.i(), (346, 9));
}
