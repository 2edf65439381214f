/// System `ffmpeg` MP4 sink.
pub mod ffmpeg;
/// PNG stills and thumbnails.
pub mod png;
/// Frame sink trait and the in-memory sink.
pub mod sink;
