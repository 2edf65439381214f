/// Frame type and the surface trait.
pub mod backend;
/// Hex colour parsing.
pub mod color;
/// CPU rasteriser.
pub mod cpu;
