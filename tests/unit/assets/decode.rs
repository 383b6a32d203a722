use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();

    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_reports_native_size() {
    let img = image::RgbaImage::from_pixel(6, 3, image::Rgba([0, 0, 0, 255]));
    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(prepared.size(), Size::new(6.0, 3.0));
    assert_eq!(prepared.rgba8_premul.len(), 6 * 3 * 4);
}

#[test]
fn decode_image_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn load_image_missing_file_is_error() {
    let err = load_image("definitely/not/here.png").unwrap_err();
    assert!(err.to_string().contains("read map image"));
}
