/// Persisted design, save payload and storage boundary.
pub mod document;
