/// Pitch identifier → physical dimensions.
pub mod layout;
