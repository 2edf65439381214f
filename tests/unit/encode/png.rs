use super::*;

fn frame(w: u32, h: u32, px: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn png_round_trips_through_image_decoder() {
    let bytes = encode_png(&frame(4, 3, [64, 0, 0, 128])).unwrap();
    let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 3));
    // Premultiplied 64 at alpha 128 is straight ~127.
    let p = img.get_pixel(1, 1).0;
    assert_eq!(p[3], 128);
    assert!((126..=128).contains(&p[0]));
}

#[test]
fn thumbnail_is_bounded() {
    let bytes = encode_thumbnail_png(&frame(800, 518, [0, 128, 0, 255]), THUMBNAIL_MAX_EDGE).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!(img.width(), 320);
    assert_eq!(img.height(), 207);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let mut f = frame(2, 2, [0, 0, 0, 255]);
    f.data.pop();
    assert!(encode_png(&f).is_err());
}
