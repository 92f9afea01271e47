use serde::{Deserialize, Serialize};

use super::Element;

/// Roster entry for a connected user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub color: String,
}

/// Ephemeral cursor position, broadcast but never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPos {
    pub x: f64,
    pub y: f64,
    pub color: String,
}

/// Full canvas state delivered to a new joiner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncData {
    pub elements: Vec<Element>,
    pub user_id: String,
    pub color: String,
}

/// The uniform wire envelope for all traffic, inbound and outbound.
///
/// Tagged by `type`; each tag carries its own payload shape under `data`.
/// The `userId` field is authoritative sender identity — the server
/// overwrites whatever the client supplied before acting on a message.
/// Unknown type tags decode to [`Envelope::Unknown`] and are dropped as a
/// forward-compatible no-op rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Envelope {
    Draw {
        #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
        data: Element,
    },
    Cursor {
        #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
        data: CursorPos,
    },
    Clear {
        #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    // Server-originated tags below; never honored when they arrive inbound.
    Sync {
        #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
        data: SyncData,
    },
    Join {
        #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
        data: UserInfo,
    },
    Leave {
        #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
    },
    UserList {
        data: Vec<UserInfo>,
    },
    #[serde(other)]
    Unknown,
}

impl Envelope {
    /// Full-state snapshot for a new joiner
    pub fn sync(elements: Vec<Element>, user_id: &str, color: &str) -> Self {
        Envelope::Sync {
            user_id: Some(user_id.to_string()),
            data: SyncData {
                elements,
                user_id: user_id.to_string(),
                color: color.to_string(),
            },
        }
    }

    /// Join notice carrying the joiner's roster entry
    pub fn join(user: UserInfo) -> Self {
        Envelope::Join {
            user_id: Some(user.id.clone()),
            data: user,
        }
    }

    /// Leave notice (type + userId only, no payload)
    pub fn leave(user_id: &str) -> Self {
        Envelope::Leave {
            user_id: Some(user_id.to_string()),
        }
    }

    /// Refreshed roster for all members
    pub fn userlist(users: Vec<UserInfo>) -> Self {
        Envelope::UserList { data: users }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_element() -> Element {
        Element {
            id: "e1".to_string(),
            element_type: "line".to_string(),
            x1: 0.0,
            y1: 0.0,
            x2: 5.0,
            y2: 5.0,
            stroke_color: "#e74c3c".to_string(),
            stroke_width: 2.0,
            user_id: "alice".to_string(),
        }
    }

    #[test]
    fn test_decode_draw_envelope() {
        let json = r##"{
            "type": "draw",
            "userId": "spoofed",
            "data": {
                "id": "e1", "elementType": "line",
                "x1": 0.0, "y1": 0.0, "x2": 5.0, "y2": 5.0,
                "strokeColor": "#e74c3c", "strokeWidth": 2.0
            }
        }"##;

        let envelope: Envelope = serde_json::from_str(json).unwrap();
        match envelope {
            Envelope::Draw { user_id, data } => {
                assert_eq!(user_id.as_deref(), Some("spoofed"));
                assert_eq!(data.id, "e1");
            }
            other => panic!("expected draw, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_clear_without_data() {
        let envelope: Envelope = serde_json::from_str(r#"{"type": "clear"}"#).unwrap();
        assert_eq!(envelope, Envelope::Clear { user_id: None });
    }

    #[test]
    fn test_decode_cursor() {
        let json = r##"{"type": "cursor", "data": {"x": 10.5, "y": 20.0, "color": "#3498db"}}"##;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        match envelope {
            Envelope::Cursor { user_id, data } => {
                assert!(user_id.is_none());
                assert_eq!(data.x, 10.5);
            }
            other => panic!("expected cursor, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_tag_is_tolerated() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"type": "emoji_react", "data": {"emoji": "+1"}}"#).unwrap();
        assert_eq!(envelope, Envelope::Unknown);
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        // Right tag, wrong payload shape: decode fails, message gets dropped.
        let result = serde_json::from_str::<Envelope>(r#"{"type": "draw", "data": {"id": 7}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sync_wire_shape() {
        let envelope = Envelope::sync(vec![sample_element()], "bob", "#3498db");
        let json: serde_json::Value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["type"], "sync");
        assert_eq!(json["userId"], "bob");
        assert_eq!(json["data"]["userId"], "bob");
        assert_eq!(json["data"]["color"], "#3498db");
        assert_eq!(json["data"]["elements"][0]["id"], "e1");
    }

    #[test]
    fn test_leave_has_no_data_field() {
        let json: serde_json::Value = serde_json::to_value(Envelope::leave("alice")).unwrap();
        assert_eq!(json["type"], "leave");
        assert_eq!(json["userId"], "alice");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_userlist_wire_shape() {
        let envelope = Envelope::userlist(vec![UserInfo {
            id: "alice".to_string(),
            color: "#e74c3c".to_string(),
        }]);
        let json: serde_json::Value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["type"], "userlist");
        assert_eq!(json["data"][0]["id"], "alice");
    }
}
