use super::*;

#[test]
fn density_thresholds_depend_on_shape() {
    use ModifierDensity::*;
    let standard = [(15, Medium), (16, Small), (20, Mini), (27, Compact)];
    for (count, want) in standard {
        assert_eq!(ModifierDensity::select(PartyShape::Standard, count), want);
    }
    let tall = [(19, Medium), (20, Small), (25, Mini), (31, Mini), (32, Compact)];
    for (count, want) in tall {
        assert_eq!(ModifierDensity::select(PartyShape::Tower, count), want);
    }
}

#[test]
fn origin_follows_shape() {
    assert_eq!(ModifierLayout::new(PartyShape::Standard, 0).origin.i(), (1560, 410));
    assert_eq!(ModifierLayout::new(PartyShape::Extended, 0).origin.i(), (1560, 10));
}

#[test]
fn compact_crops_icons() {
    let layout = ModifierLayout::new(PartyShape::Standard, 30);
    assert_eq!(layout.density, ModifierDensity::Compact);
    assert_eq!(layout.crop, Some((68, 34)));
    assert_eq!(layout.font, FontSize::Mini);
    assert_eq!(layout.spacer, 42);

    let medium = ModifierLayout::new(PartyShape::Standard, 3);
    assert_eq!(medium.crop, None);
    assert_eq!(medium.font, FontSize::Medium);
    assert_eq!(medium.size.i(), (241, 60));
}
