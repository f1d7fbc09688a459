use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "patchmerge_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn load_rgba_png_dimensions() {
    let tmp = temp_dir("decode_load_png");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("px.png");
    RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 255])
        .unwrap()
        .save(&path)
        .unwrap();

    let img = load_rgba(&path).unwrap();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [100, 50, 200, 128]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn load_rgba_garbage_is_err() {
    let tmp = temp_dir("decode_garbage");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();

    assert!(load_rgba(&path).is_err());
    assert!(load_rgba(&tmp.join("missing.png")).is_err());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn save_rgba_jpeg_drops_alpha() {
    let tmp = temp_dir("decode_save_jpeg");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("out.jpg");
    let img = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));

    save_rgba(&img, &path).unwrap();
    let back = image::open(&path).unwrap();
    assert_eq!((back.width(), back.height()), (4, 4));
    assert!(!back.color().has_alpha());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn premultiply_then_unpremultiply_opaque_and_clear() {
    let mut px = vec![100u8, 50, 200, 128, 7, 8, 9, 255, 40, 40, 40, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        &px[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    assert_eq!(&px[8..], &[0, 0, 0, 0]);

    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..8], &[7, 8, 9, 255]);
    assert!(px[0].abs_diff(100) <= 1);
    assert!(px[1].abs_diff(50) <= 1);
    assert!(px[2].abs_diff(200) <= 1);
}
