use super::*;
use crate::scene::item::ItemStyle;

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [frame.data[i], frame.data[i + 1], frame.data[i + 2], frame.data[i + 3]]
}

fn surface(w: u32, h: u32) -> CpuSurface {
    let opts = CpuSurfaceOpts::default()
        .with_size(SurfaceSize::new(w, h))
        .with_turf([0, 128, 0, 255], None);
    CpuSurface::new(opts).unwrap()
}

#[test]
fn empty_board_is_turf() {
    let mut s = surface(80, 50);
    let f = s.render_items(&[]).unwrap();
    assert_eq!((f.width, f.height), (80, 50));
    assert_eq!(f.data.len(), 80 * 50 * 4);
    assert!(f.premultiplied);
    assert_eq!(px(&f, 40, 25), [0, 128, 0, 255]);
}

#[test]
fn player_paints_its_colour_at_its_position() {
    let mut s = surface(200, 100);
    let it = Item::new("p", ItemKind::Player, 25.0, 50.0).with_style(ItemStyle {
        color: Some("#ff0000".to_owned()),
        size: Some(80.0),
        ..ItemStyle::default()
    });
    let f = s.render_items(&[&it]).unwrap();
    assert_eq!(px(&f, 50, 50), [255, 0, 0, 255]);
    assert_eq!(px(&f, 180, 50), [0, 128, 0, 255]);
}

#[test]
fn later_items_paint_over_earlier_ones() {
    let mut s = surface(100, 100);
    let style = |c: &str| ItemStyle {
        color: Some(c.to_owned()),
        size: Some(200.0),
        ..ItemStyle::default()
    };
    let under = Item::new("u", ItemKind::Marker, 50.0, 50.0).with_style(style("#0000ff"));
    let over = Item::new("o", ItemKind::Marker, 50.0, 50.0).with_style(style("#ff0000"));
    let f = s.render_items(&[&under, &over]).unwrap();
    assert_eq!(px(&f, 50, 50), [255, 0, 0, 255]);
}

#[test]
fn every_kind_renders() {
    let mut s = surface(160, 100);
    let kinds = [
        "player", "ball", "cone", "marker", "goal", "slalom", "hurdle", "shape-line",
        "shape-line-dashed", "shape-rect", "shape-rect-outline", "shape-circle", "shape-triangle",
        "shape-arrow", "shape-arrow-dashed", "shape-arrow-2head", "shape-curve", "shape-curve2",
        "mystery",
    ];
    let items: Vec<Item> = kinds
        .iter()
        .map(|k| Item::new(*k, ItemKind::parse(k), 50.0, 50.0).with_rot(30.0))
        .collect();
    let refs: Vec<&Item> = items.iter().collect();
    for it in &refs {
        s.render_items(&[*it]).unwrap();
    }
    s.render_items(&refs).unwrap();
}

#[test]
fn rejects_degenerate_sizes() {
    let opts = CpuSurfaceOpts::default().with_size(SurfaceSize::new(0, 10));
    assert!(CpuSurface::new(opts).is_err());
    let opts = CpuSurfaceOpts::default().with_size(SurfaceSize::new(70_000, 10));
    assert!(CpuSurface::new(opts).is_err());
}

#[test]
fn s_curve_strokes_through_its_centre_to_the_tip() {
    let mut s = surface(200, 100);
    let it = Item::new("s", ItemKind::SCurve, 50.0, 50.0).with_style(ItemStyle {
        stroke: Some("#ffffff".to_owned()),
        stroke_width: Some(40.0),
        ..ItemStyle::default()
    });
    let f = s.render_items(&[&it]).unwrap();
    // 18% of 200px long, 10px wide at this scale; the cubic passes through its midpoint.
    assert_eq!(px(&f, 100, 50), [255, 255, 255, 255]);
    assert_eq!(px(&f, 116, 50), [255, 255, 255, 255]);
    assert_eq!(px(&f, 10, 10), [0, 128, 0, 255]);
}
