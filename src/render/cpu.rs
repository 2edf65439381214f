//! `vello_cpu` rasteriser for the board.
//!
//! Item sizes are authored in reference pixels on an 800px-wide stage and scale with the
//! surface width. Pitch markings are not drawn; only turf, the optional grid and the items.

use kurbo::{Cap, Circle, Shape, Stroke, StrokeOpts};

use crate::foundation::core::{Affine, BezPath, Point, Rect, SurfaceSize, Vec2};
use crate::foundation::error::{BoardError, BoardResult};
use crate::render::backend::{FrameRGBA, RenderSurface};
use crate::render::color::{color_or, with_opacity};
use crate::scene::item::{Item, ItemKind};

const REFERENCE_WIDTH: f64 = 800.0;
const TOLERANCE: f64 = 0.1;
const WHITE: [u8; 4] = [255, 255, 255, 255];
const INK: [u8; 4] = [17, 24, 39, 255];

#[derive(Clone, Debug, PartialEq)]
pub struct CpuSurfaceOpts {
    pub size: SurfaceSize,
    /// Straight-alpha turf colour.
    pub turf_rgba: [u8; 4],
    /// Alternate mowing stripe colour, if any.
    pub stripe_rgba: Option<[u8; 4]>,
    /// Draw a 10% reference grid.
    pub grid: bool,
    pub grid_rgba: [u8; 4],
}

impl Default for CpuSurfaceOpts {
    fn default() -> Self {
        Self {
            size: SurfaceSize::default(),
            turf_rgba: [30, 122, 58, 255],
            stripe_rgba: Some([34, 134, 64, 255]),
            grid: false,
            grid_rgba: [255, 255, 255, 40],
        }
    }
}

impl CpuSurfaceOpts {
    pub fn with_size(mut self, size: SurfaceSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_turf(mut self, rgba: [u8; 4], stripe: Option<[u8; 4]>) -> Self {
        self.turf_rgba = rgba;
        self.stripe_rgba = stripe;
        self
    }
}

pub struct CpuSurface {
    opts: CpuSurfaceOpts,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    pub fn new(opts: CpuSurfaceOpts) -> BoardResult<Self> {
        let width: u16 = opts
            .size
            .width
            .try_into()
            .map_err(|_| BoardError::validation("surface width exceeds u16"))?;
        let height: u16 = opts
            .size
            .height
            .try_into()
            .map_err(|_| BoardError::validation("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(BoardError::validation("surface width/height must be > 0"));
        }
        Ok(Self {
            opts,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn opts(&self) -> &CpuSurfaceOpts {
        &self.opts
    }

    fn draw_background(&self, ctx: &mut vello_cpu::RenderContext) {
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        set_paint(ctx, self.opts.turf_rgba);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        if let Some(stripe) = self.opts.stripe_rgba {
            set_paint(ctx, stripe);
            let band = w / 10.0;
            for i in (1..10).step_by(2) {
                let x0 = f64::from(i) * band;
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, 0.0, x0 + band, h));
            }
        }

        if self.opts.grid {
            set_paint(ctx, self.opts.grid_rgba);
            let line = (w / REFERENCE_WIDTH).max(1.0);
            for i in 1..10 {
                let x = f64::from(i) * w / 10.0;
                let y = f64::from(i) * h / 10.0;
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x - line / 2.0, 0.0, x + line / 2.0, h));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, y - line / 2.0, w, y + line / 2.0));
            }
        }
    }
}

impl RenderSurface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(u32::from(self.width), u32::from(self.height))
    }

    fn render_items(&mut self, items: &[&Item]) -> BoardResult<FrameRGBA> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.draw_background(&mut ctx);

        let surface = self.size();
        for item in items {
            draw_item(&mut ctx, surface, item);
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

/// Geometry in item-local pixels (origin at the item position, unrotated) plus paint.
struct Fill {
    path: BezPath,
    rgba: [u8; 4],
}

fn draw_item(ctx: &mut vello_cpu::RenderContext, surface: SurfaceSize, item: &Item) {
    let (w, h) = (f64::from(surface.width), f64::from(surface.height));
    let xf = Affine::translate(Vec2::new(item.x / 100.0 * w, item.y / 100.0 * h))
        * Affine::rotate(item.rot.to_radians());

    ctx.set_transform(affine_to_cpu(xf));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    for fill in item_fills(item, w) {
        if fill.rgba[3] == 0 {
            continue;
        }
        set_paint(ctx, fill.rgba);
        ctx.fill_path(&bezpath_to_cpu(&fill.path));
    }
}

fn item_fills(item: &Item, w: f64) -> Vec<Fill> {
    let s = &item.style;
    let scale = w / REFERENCE_WIDTH;
    let size = s.size.unwrap_or(36.0).max(1.0) * scale;
    let color = |default| color_or(s.color.as_deref(), default);
    let stroke_rgba = color_or(s.stroke.as_deref(), WHITE);
    let stroke_w = s.stroke_width.unwrap_or(2.0).max(0.5) * scale;
    let fill_rgba = with_opacity(color_or(s.fill.as_deref(), WHITE), s.fill_alpha.unwrap_or(0.2));
    let pct_w = |p: Option<f64>, default: f64| p.unwrap_or(default).max(0.0) / 100.0 * w;
    let dashed = item.is_dashed();

    let mut out = Vec::new();
    let mut fill = |path: BezPath, rgba: [u8; 4]| out.push(Fill { path, rgba });

    match &item.kind {
        ItemKind::Player => {
            let r = size / 2.0;
            fill(circle(r + 2.0 * scale), WHITE);
            fill(circle(r), color([74, 163, 255, 255]));
        }
        ItemKind::Ball => {
            let r = size / 2.0;
            fill(circle(r), INK);
            fill(circle(r - 1.5 * scale), color(WHITE));
            fill(circle(r * 0.35), INK);
        }
        ItemKind::Cone => {
            fill(triangle(size), color([255, 138, 52, 255]));
        }
        ItemKind::Marker => {
            fill(circle(size / 2.0), color([244, 196, 48, 255]));
        }
        ItemKind::Goal => {
            let frame = Rect::new(-size / 2.0, -size * 0.2, size / 2.0, size * 0.2);
            fill(outline(&frame.to_path(TOLERANCE), 3.0 * scale, false), color(WHITE));
        }
        ItemKind::Slalom => {
            let pole = Rect::new(-2.0 * scale, -size / 2.0, 2.0 * scale, size / 2.0);
            fill(pole.to_path(TOLERANCE), color([255, 183, 3, 255]));
            fill(circle(4.0 * scale), INK);
        }
        ItemKind::Hurdle => {
            let mut p = BezPath::new();
            p.move_to((-size / 2.0, size * 0.15));
            p.line_to((-size / 2.0, -size * 0.15));
            p.line_to((size / 2.0, -size * 0.15));
            p.line_to((size / 2.0, size * 0.15));
            fill(outline(&p, 3.0 * scale, false), color([229, 231, 235, 255]));
        }
        ItemKind::Line | ItemKind::DashedLine => {
            let half = pct_w(s.length_pct, 14.0) / 2.0;
            fill(outline(&segment(-half, half), stroke_w, dashed), stroke_rgba);
        }
        ItemKind::Arrow | ItemKind::DashedArrow | ItemKind::TwoHeadArrow => {
            let half = pct_w(s.length_pct, 14.0) / 2.0;
            let head = stroke_w * 3.5;
            let tail = if item.kind == ItemKind::TwoHeadArrow { -half + head * 0.5 } else { -half };
            fill(outline(&segment(tail, half - head * 0.5), stroke_w, dashed), stroke_rgba);
            fill(arrow_head(Point::new(half, 0.0), 0.0, head), stroke_rgba);
            if item.kind == ItemKind::TwoHeadArrow {
                fill(arrow_head(Point::new(-half, 0.0), std::f64::consts::PI, head), stroke_rgba);
            }
        }
        ItemKind::Curve | ItemKind::SCurve => {
            let half = pct_w(s.length_pct, 18.0) / 2.0;
            let head = stroke_w * 3.5;
            let mut p = BezPath::new();
            p.move_to((-half, 0.0));
            let end = Point::new(half, 0.0);
            let angle = if item.kind == ItemKind::Curve {
                let ctrl = Point::new(0.0, -half * 0.7);
                p.quad_to(ctrl, end);
                (end - ctrl).atan2()
            } else {
                let c2 = Point::new(half / 3.0, half * 0.6);
                p.curve_to(Point::new(-half / 3.0, -half * 0.6), c2, end);
                (end - c2).atan2()
            };
            fill(outline(&p, stroke_w, dashed), stroke_rgba);
            fill(arrow_head(end, angle, head), stroke_rgba);
        }
        ItemKind::Rect | ItemKind::RectOutline => {
            let bw = pct_w(s.width_pct, 18.0);
            let bh = pct_w(s.height_pct, 10.0);
            let rect = Rect::new(-bw / 2.0, -bh / 2.0, bw / 2.0, bh / 2.0).to_path(TOLERANCE);
            if item.kind == ItemKind::Rect {
                fill(rect.clone(), fill_rgba);
            }
            fill(outline(&rect, stroke_w, dashed), stroke_rgba);
        }
        ItemKind::Circle => {
            let r = match s.radius_pct {
                Some(r) => r.max(0.0) / 100.0 * w,
                None => pct_w(s.size_pct, 10.0) / 2.0,
            };
            let c = circle(r);
            fill(c.clone(), fill_rgba);
            fill(outline(&c, stroke_w, dashed), stroke_rgba);
        }
        ItemKind::Triangle => {
            let t = triangle(pct_w(s.size_pct, 10.0));
            fill(t.clone(), fill_rgba);
            fill(outline(&t, stroke_w, dashed), stroke_rgba);
        }
        ItemKind::Other(_) => {
            fill(circle(6.0 * scale), color([156, 163, 175, 255]));
        }
    }
    out
}

fn circle(r: f64) -> BezPath {
    Circle::new(Point::ORIGIN, r.max(0.5)).to_path(TOLERANCE)
}

fn triangle(size: f64) -> BezPath {
    let half = size / 2.0;
    let mut p = BezPath::new();
    p.move_to((0.0, -half));
    p.line_to((half, half));
    p.line_to((-half, half));
    p.close_path();
    p
}

fn segment(x0: f64, x1: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((x0, 0.0));
    p.line_to((x1.max(x0), 0.0));
    p
}

fn arrow_head(tip: Point, angle: f64, len: f64) -> BezPath {
    let back = Affine::translate(tip.to_vec2()) * Affine::rotate(angle);
    let mut p = BezPath::new();
    p.move_to(back * Point::ORIGIN);
    p.line_to(back * Point::new(-len, len * 0.5));
    p.line_to(back * Point::new(-len, -len * 0.5));
    p.close_path();
    p
}

/// Stroke outline as a fillable path.
fn outline(path: &BezPath, width: f64, dashed: bool) -> BezPath {
    let mut style = Stroke::new(width).with_caps(Cap::Round);
    if dashed {
        style = style.with_dashes(0.0, [width * 3.0, width * 2.5]);
    }
    kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), TOLERANCE)
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, [r, g, b, a]: [u8; 4]) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
