/// Start/end anchor authoring with phase-scoped undo.
pub mod session;
