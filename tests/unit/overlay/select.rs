use rand::{SeedableRng, rngs::StdRng};

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "patchmerge_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn category(name: &str, files: &[&str]) -> Category {
    Category {
        name: name.to_string(),
        candidates: files.iter().map(PathBuf::from).collect(),
    }
}

#[test]
fn picks_one_per_category_in_order_and_skips_empty() {
    let cats = vec![
        category("a_body", &["a/1.png", "a/2.png", "a/3.png"]),
        category("b_empty", &[]),
        category("c_hat", &["c/only.jpg"]),
    ];
    let mut rng = StdRng::seed_from_u64(7);
    let got = pick_one_per_category(&cats, &mut rng);

    assert_eq!(got.len(), 2);
    assert_eq!(got[0].category, "a_body");
    assert!(cats[0].candidates.contains(&got[0].path));
    assert_eq!(got[1].category, "c_hat");
    assert_eq!(got[1].path, PathBuf::from("c/only.jpg"));
}

#[test]
fn same_seed_same_selection() {
    let cats = vec![
        category("x", &["x/1.png", "x/2.png", "x/3.png", "x/4.png"]),
        category("y", &["y/1.png", "y/2.png", "y/3.png", "y/4.png"]),
    ];
    let a = pick_one_per_category(&cats, &mut StdRng::seed_from_u64(42));
    let b = pick_one_per_category(&cats, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn select_overlays_scans_sorted_subfolders() {
    let tmp = temp_dir("select_scan");
    std::fs::create_dir_all(tmp.join("02_top")).unwrap();
    std::fs::create_dir_all(tmp.join("01_base")).unwrap();
    std::fs::create_dir_all(tmp.join("03_empty")).unwrap();
    std::fs::write(tmp.join("02_top").join("t.PNG"), b"").unwrap();
    std::fs::write(tmp.join("01_base").join("b.jpeg"), b"").unwrap();
    std::fs::write(tmp.join("01_base").join("notes.txt"), b"").unwrap();
    std::fs::write(tmp.join("03_empty").join("skip.gif"), b"").unwrap();
    std::fs::write(tmp.join("loose.png"), b"").unwrap();

    let got = select_overlays(&tmp, &mut StdRng::seed_from_u64(1));
    assert_eq!(
        got,
        vec![
            OverlayRef {
                category: "01_base".to_string(),
                path: tmp.join("01_base").join("b.jpeg"),
            },
            OverlayRef {
                category: "02_top".to_string(),
                path: tmp.join("02_top").join("t.PNG"),
            },
        ]
    );

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_root_yields_empty() {
    let tmp = temp_dir("select_missing_root");
    let got = select_overlays(&tmp, &mut StdRng::seed_from_u64(1));
    assert!(got.is_empty());
}
