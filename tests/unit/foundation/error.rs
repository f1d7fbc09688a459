use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PatchError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PatchError::decode("x").to_string().contains("decode error:"));
}

#[test]
fn no_overlays_names_the_directory() {
    let err = PatchError::NoOverlays {
        dir: PathBuf::from("patches"),
    };
    assert_eq!(err.to_string(), "no usable overlays found in 'patches'");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PatchError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
