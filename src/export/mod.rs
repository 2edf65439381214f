/// Still and video export.
pub mod pipeline;
