use serde::{Deserialize, Serialize};

/// A single immutable drawing primitive persisted in a room's element log.
///
/// Elements are never mutated after creation; the log only appends them or
/// is bulk-cleared. The `user_id` is authoritative server state: whatever a
/// client sends on the wire is overwritten with the sender's assigned id
/// before the element is stored or fanned out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Client-assigned element id (unique by convention, never deduplicated)
    pub id: String,
    /// Shape tag ("line", "rectangle", "ellipse", ...) — kept open-ended,
    /// the server persists and forwards it opaquely
    pub element_type: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_color: String,
    pub stroke_width: f64,
    /// Authoring user id, always server-overwritten
    #[serde(default)]
    pub user_id: String,
}
