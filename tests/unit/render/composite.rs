use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_half_alpha_on_opaque_blends() {
    let dst = [0, 0, 200, 255];
    let src = [128, 0, 0, 128];
    assert_eq!(over(dst, src), [128, 0, 100, 255]);
}

#[test]
fn blit_over_clips_at_edges() {
    let mut dst = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
    let src = RgbaImage::from_pixel(3, 3, image::Rgba([255, 255, 255, 255]));
    blit_over(&mut dst, &src, 2, 3);

    assert_eq!(dst.get_pixel(2, 3).0, [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(3, 3).0, [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(1, 3).0, [0, 0, 0, 255]);
    assert_eq!(dst.get_pixel(2, 2).0, [0, 0, 0, 255]);

    blit_over(&mut dst, &src, 10, 10);
    assert_eq!(dst.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[test]
fn blit_over_keeps_translucent_dst_outside_opaque_src_pixels() {
    let mut dst = RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 10]));
    let mut src = RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 0]));
    src.put_pixel(1, 1, image::Rgba([0, 255, 0, 255]));
    blit_over(&mut dst, &src, 1, 1);

    assert_eq!(dst.get_pixel(2, 2).0, [0, 255, 0, 255]);
    for (x, y, px) in dst.enumerate_pixels() {
        if (x, y) != (2, 2) {
            assert_eq!(px.0, [200, 100, 50, 10], "pixel ({x}, {y}) changed");
        }
    }
}
