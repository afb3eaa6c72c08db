use super::*;

#[test]
fn decode_png_keeps_straight_alpha() {
    let src = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let bytes = encode_png(&image::DynamicImage::ImageRgba8(src)).unwrap();

    let decoded = decode_image(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw().as_slice(), &[100u8, 50, 200, 128]);
}

#[test]
fn decode_rejects_garbage() {
    let err = decode_image(b"definitely not a png").unwrap_err();
    assert!(matches!(err, PibError::Decode(_)));
}

#[test]
fn demultiply_restores_channels() {
    let mut px = [50u8, 25, 100, 128, 0, 0, 0, 0, 10, 20, 30, 255];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[100, 50, 199, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..], &[10, 20, 30, 255]);
}
