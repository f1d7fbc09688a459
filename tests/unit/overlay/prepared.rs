use std::path::PathBuf;

use super::*;

#[test]
fn prepare_keeps_order_and_marks_failures() {
    let dir = std::env::temp_dir().join(format!("patchmerge_prepared_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let good = dir.join("good.png");
    RgbaImage::from_pixel(3, 7, image::Rgba([9, 9, 9, 255]))
        .save(&good)
        .unwrap();

    let refs = vec![
        OverlayRef {
            category: "a".to_string(),
            path: dir.join("missing.png"),
        },
        OverlayRef {
            category: "b".to_string(),
            path: good.clone(),
        },
    ];
    let prepared = prepare_overlays(&refs);

    assert_eq!(prepared.len(), 2);
    assert_eq!(prepared[0].source.category, "a");
    assert!(prepared[0].image.is_none());
    assert_eq!(prepared[1].source.path, good);
    assert_eq!(natural_sizes(&prepared), vec![None, Some((3, 7))]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn natural_size_is_none_without_image() {
    let o = PreparedOverlay {
        source: OverlayRef {
            category: "x".to_string(),
            path: PathBuf::from("x.png"),
        },
        image: None,
    };
    assert_eq!(o.natural_size(), None);
}
