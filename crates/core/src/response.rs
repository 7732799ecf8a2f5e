//! Response payloads returned to the surrounding application
//!
//! The engine never renders HTML or owns a wire protocol; it hands back a
//! structured payload the HTTP layer can display however it likes.

use serde::{Deserialize, Serialize};

/// Tag identifying the kind of response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Asking the next intake question
    SlotFilling,
    /// Presenting the incident-type selection menu
    IncidentTypeSelection,
    /// Intake complete, record stored
    IncidentCompleted,
    /// Intake complete but the persistence sink failed; no record id
    IncidentSaveFailed,
    /// Emergency keyword detected, fixed contacts response
    Emergency,
    /// Help menu
    HelpMenu,
    /// SDS library guidance
    SdsLookup,
    /// File attachment acknowledged
    FileReceived,
    /// Anything else
    General,
}

/// Target of a suggested action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionTarget {
    /// Navigate to a route in the surrounding application
    Navigate { route: String },
    /// Resubmit a canned follow-up message to the engine
    Resubmit { message: String },
}

/// A suggested follow-up the UI can render as a button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseAction {
    pub label: String,
    pub target: ActionTarget,
}

impl ResponseAction {
    pub fn navigate(label: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: ActionTarget::Navigate {
                route: route.into(),
            },
        }
    }

    pub fn resubmit(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: ActionTarget::Resubmit {
                message: message.into(),
            },
        }
    }
}

/// Structured response for one processed message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsePayload {
    /// Display text
    pub message: String,
    /// Response kind tag
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    /// Record id, present only on successful completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Suggested follow-up actions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ResponseAction>,
}

impl ResponsePayload {
    pub fn new(kind: ResponseKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            record_id: None,
            actions: Vec::new(),
        }
    }

    pub fn with_record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    pub fn with_action(mut self, action: ResponseAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_actions(mut self, actions: Vec<ResponseAction>) -> Self {
        self.actions = actions;
        self
    }
}

/// Descriptor for a file attached to an inbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFile {
    pub filename: String,
    pub mime_type: String,
}

/// Coarse file classification used for the attachment branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
    Other,
}

impl AttachedFile {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Classify by mime type, falling back to the filename extension
    pub fn kind(&self) -> FileKind {
        let mime = self.mime_type.to_lowercase();
        if mime.starts_with("image/") {
            return FileKind::Image;
        }
        if mime == "application/pdf" {
            return FileKind::Pdf;
        }
        let name = self.filename.to_lowercase();
        if name.ends_with(".pdf") {
            FileKind::Pdf
        } else if [".png", ".jpg", ".jpeg", ".gif", ".webp"]
            .iter()
            .any(|ext| name.ends_with(ext))
        {
            FileKind::Image
        } else {
            FileKind::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serialization_tag() {
        let payload = ResponsePayload::new(ResponseKind::SlotFilling, "Where did this occur?");
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"type\":\"slot_filling\""));
        assert!(!json.contains("record_id"));
    }

    #[test]
    fn test_file_kind_classification() {
        assert_eq!(AttachedFile::new("a.png", "image/png").kind(), FileKind::Image);
        assert_eq!(
            AttachedFile::new("sheet.pdf", "application/pdf").kind(),
            FileKind::Pdf
        );
        assert_eq!(
            AttachedFile::new("notes.txt", "text/plain").kind(),
            FileKind::Other
        );
        // Extension fallback when mime is generic
        assert_eq!(
            AttachedFile::new("photo.jpeg", "application/octet-stream").kind(),
            FileKind::Image
        );
    }

    #[test]
    fn test_action_targets() {
        let nav = ResponseAction::navigate("Open SDS Library", "/sds");
        let json = serde_json::to_string(&nav).unwrap();
        assert!(json.contains("\"type\":\"navigate\""));

        let re = ResponseAction::resubmit("Report an incident", "I need to report an incident");
        assert!(matches!(re.target, ActionTarget::Resubmit { .. }));
    }
}
