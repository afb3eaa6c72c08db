use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> ImageHandle {
    ImageHandle::from_rgba(image::RgbaImage::from_pixel(w, h, image::Rgba(px)))
}

fn pixel(canvas: &Canvas, layer: usize, x: u32, y: u32) -> [u8; 4] {
    canvas.layer(layer).unwrap().as_rgba().get_pixel(x, y).0
}

#[test]
fn new_canvas_is_transparent_full_size() {
    let canvas = Canvas::new(2);
    assert_eq!(canvas.len(), 2);
    assert_eq!(
        canvas.layer(1).unwrap().dimensions(),
        (CANVAS_WIDTH, CANVAS_HEIGHT)
    );
    assert_eq!(pixel(&canvas, 0, 900, 900), [0, 0, 0, 0]);
    assert!(canvas.layer(2).is_none());
}

#[test]
fn targets_select_layers() {
    let red = solid(4, 4, [255, 0, 0, 255]);
    let mut canvas = Canvas::new(2);
    canvas.paste(Target::Skin, &red, Vector2::new(10.0, 10.0), Blend::Replace);
    assert_eq!(pixel(&canvas, 0, 11, 11), [0, 0, 0, 0]);
    assert_eq!(pixel(&canvas, 1, 11, 11), [255, 0, 0, 255]);

    canvas.paste(Target::shared(true), &red, Vector2::new(20.0, 20.0), Blend::Over);
    assert_eq!(pixel(&canvas, 0, 21, 21), [255, 0, 0, 255]);
    assert_eq!(pixel(&canvas, 1, 21, 21), [255, 0, 0, 255]);
}

#[test]
fn skin_target_on_single_layer_is_a_no_op() {
    let red = solid(4, 4, [255, 0, 0, 255]);
    let mut canvas = Canvas::new(1);
    canvas.paste(Target::Skin, &red, Vector2::default(), Blend::Replace);
    canvas.paste(Target::Both, &red, Vector2::new(8.0, 0.0), Blend::Replace);
    assert_eq!(pixel(&canvas, 0, 0, 0), [0, 0, 0, 0]);
    assert_eq!(pixel(&canvas, 0, 9, 1), [255, 0, 0, 255]);
}

#[test]
fn replace_and_over_differ_on_translucent_sources() {
    let base = solid(2, 2, [0, 0, 255, 255]);
    let half = solid(2, 2, [255, 0, 0, 128]);
    let mut replace = Canvas::new(1);
    replace.paste(Target::Base, &base, Vector2::default(), Blend::Replace);
    replace.paste(Target::Base, &half, Vector2::default(), Blend::Replace);
    let mut over = replace.clone();
    over.paste(Target::Base, &base, Vector2::default(), Blend::Replace);
    over.paste(Target::Base, &half, Vector2::default(), Blend::Over);

    // mask blending also mixes the alpha channel, compositing keeps it opaque
    assert!(pixel(&replace, 0, 0, 0)[3] < 255);
    assert_eq!(pixel(&over, 0, 0, 0)[3], 255);
}

#[test]
fn positions_are_truncated() {
    let red = solid(1, 1, [255, 0, 0, 255]);
    let mut canvas = Canvas::new(1);
    canvas.paste(Target::Base, &red, Vector2::new(3.9, 4.7), Blend::Replace);
    assert_eq!(pixel(&canvas, 0, 3, 4), [255, 0, 0, 255]);
}
