use crate::foundation::core::SurfaceSize;
use crate::foundation::error::BoardResult;
use crate::scene::item::Item;
use crate::scene::store::ItemStore;

/// One rendered frame, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            out.chunks_exact_mut(4)
                .for_each(crate::foundation::math::unpremultiply_rgba8);
        }
        out
    }
}

/// Something that can rasterise the board.
///
/// Rendering is synchronous: a returned frame is always complete.
pub trait RenderSurface {
    fn size(&self) -> SurfaceSize;

    /// Render `items`, already sorted into paint order.
    fn render_items(&mut self, items: &[&Item]) -> BoardResult<FrameRGBA>;

    /// Render the store's current state.
    fn render_store(&mut self, store: &ItemStore) -> BoardResult<FrameRGBA> {
        self.render_items(&store.paint_order())
    }
}
