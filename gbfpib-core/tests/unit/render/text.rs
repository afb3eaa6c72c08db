use super::*;

fn fonts(language: Language) -> FontSet {
    // no bundled font under a missing root: the set falls back to system faces
    FontSet::load(std::env::temp_dir().join("gbfpib_missing_font_root"), language)
}

#[test]
fn pixel_sizes_follow_language() {
    let en = fonts(Language::English);
    assert_eq!(en.pixel_size(FontSize::Big), 90);
    assert_eq!(en.pixel_size(FontSize::Medium), 48);
    assert_eq!(en.pixel_size(FontSize::Small), 42);
    assert_eq!(en.pixel_size(FontSize::Mini), 36);

    let ja = fonts(Language::Japanese);
    assert_eq!(ja.language(), Language::Japanese);
    assert_eq!(ja.pixel_size(FontSize::Big), 72);
    assert_eq!(ja.pixel_size(FontSize::Mini), 27);
}

#[test]
fn missing_bundled_font_falls_back() {
    let set = fonts(Language::English);
    assert_eq!(set.family(), "sans-serif");
    assert_eq!(
        FontSet::bundled_font(Language::Japanese),
        "assets/font_japanese.ttf"
    );
}

#[test]
fn blank_text_draws_nothing() {
    let set = fonts(Language::English);
    let style = TextStyle::new(FontSize::Small, palette::WHITE);
    assert!(set.rasterize("", style).unwrap().is_none());
    assert!(set.rasterize("   ", style).unwrap().is_none());
}

#[test]
fn outline_pads_the_bitmap() {
    let set = fonts(Language::English);
    let style = TextStyle::new(FontSize::Small, palette::PLUS).outlined(6);
    let out = set.rasterize("+99", style).unwrap().unwrap();
    // 3 chars at 42px, padding of stroke + 2 on each side
    assert_eq!(out.image.dimensions(), (3 * 42 * 11 / 10 + 16, 42 * 14 / 10 + 16));
    assert_eq!(out.offset, (-8, -8));
}

#[test]
fn svg_escapes_and_doubles_stroke() {
    let set = fonts(Language::English);
    let style = TextStyle::new(FontSize::Medium, palette::WHITE).outlined(4);
    let svg = set.svg_document("a<b & \"c\"", style, 48, (100, 80), (6, 44));
    assert!(svg.contains("a&lt;b &amp; &quot;c&quot;"));
    assert!(svg.contains(r#"stroke-width="8""#));
    assert!(svg.contains(r#"paint-order="stroke""#));
    assert!(svg.contains(r##"fill="#ffffff""##));
}

#[test]
fn plain_style_has_no_stroke() {
    let style = TextStyle::new(FontSize::Mini, palette::WATERMARK);
    assert!(style.stroke.is_none());
    let outlined = style.outlined(6);
    assert_eq!(
        outlined.stroke,
        Some(Stroke {
            width: 6,
            color: palette::BLACK
        })
    );
}
