/// Step list to keyframe compilation.
pub mod compile;
/// Legacy keyframe-to-step migration.
pub mod migrate;
/// Authored steps and timing helpers.
pub mod step;
/// Keyframe tracks and sampling.
pub mod track;
