/// Drag gestures and client-pixel to percent conversion.
pub mod drag;
