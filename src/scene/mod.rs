/// Named animation phases and their scheduling table.
pub mod phase;
/// Introspection snapshots of a scene.
pub mod report;
/// The composite scene node.
pub mod scene;
