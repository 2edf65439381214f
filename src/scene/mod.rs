/// Snapshot-based undo/redo.
pub mod history;
/// Placed items and their style bag.
pub mod item;
/// Placeable item catalogue.
pub mod palette;
/// The authoritative item list.
pub mod store;
/// Set-piece formations.
pub mod templates;
