use super::*;

#[test]
fn canvas_parses_wxh() {
    assert_eq!("800x600".parse::<Canvas>().unwrap(), Canvas::new(800, 600).unwrap());
    assert_eq!(" 1920 X 1080 ".parse::<Canvas>().unwrap().width, 1920);
}

#[test]
fn canvas_rejects_malformed_and_zero() {
    assert!("800".parse::<Canvas>().is_err());
    assert!("axb".parse::<Canvas>().is_err());
    assert!("0x10".parse::<Canvas>().is_err());
    assert!("-5x10".parse::<Canvas>().is_err());
}

#[test]
fn canvas_display_matches_parse_format() {
    let c = Canvas::new(64, 32).unwrap();
    assert_eq!(c.to_string(), "64x32");
}
