//! Intake engine facade
//!
//! Wires the emergency detector, classifier, dialogue manager, and record
//! finalizer behind a single `process_message` entry point. Each call loads
//! the session from the store, handles the message to completion on the
//! calling thread, and writes the session back. The engine performs no
//! locking: callers must serialize concurrent messages for one session id.

use std::sync::Arc;

use ehs_intake_config::{
    EmergencyConfig, EngineSettings, IntentsConfig, RiskConfig, SlotSchemaConfig,
};
use ehs_intake_core::{
    AttachedFile, ConversationSession, FileKind, HistoryEntry, PersistenceSink, ResponseAction,
    ResponseKind, ResponsePayload, SessionStore,
};

use crate::classifier::PatternClassifier;
use crate::dialogue::DialogueManager;
use crate::emergency::EmergencyDetector;
use crate::finalizer::RecordFinalizer;
use crate::EngineError;

/// Static configuration for the engine, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub intents: IntentsConfig,
    pub schemas: SlotSchemaConfig,
    pub emergency: EmergencyConfig,
    pub risk: RiskConfig,
    pub settings: EngineSettings,
}

/// The conversational intake engine
pub struct IntakeEngine {
    classifier: PatternClassifier,
    detector: EmergencyDetector,
    dialogue: DialogueManager,
    settings: EngineSettings,
    sessions: Arc<dyn SessionStore>,
    sink: Arc<dyn PersistenceSink>,
}

impl IntakeEngine {
    /// Build an engine from configuration and the two collaborator seams.
    /// All tables are validated and compiled here; processing never fails
    /// on configuration afterwards.
    pub fn new(
        config: EngineConfig,
        sessions: Arc<dyn SessionStore>,
        sink: Arc<dyn PersistenceSink>,
    ) -> Result<Self, EngineError> {
        config.settings.validate()?;
        config.risk.validate()?;
        config.schemas.validate()?;

        let classifier = PatternClassifier::new(&config.intents)?;
        let detector = EmergencyDetector::new(&config.emergency);
        let dialogue = DialogueManager::new(
            config.schemas,
            RecordFinalizer::new(config.risk),
        );

        tracing::info!("intake engine initialized");

        Ok(Self {
            classifier,
            detector,
            dialogue,
            settings: config.settings,
            sessions,
            sink,
        })
    }

    /// Process one inbound message for a session.
    ///
    /// Never fails on message content: malformed or empty text is a valid
    /// general inquiry, and persistence failures come back as degraded
    /// responses. Only the session-store seam can error this call.
    pub fn process_message(
        &self,
        session_id: &str,
        text: &str,
        attachment: Option<&AttachedFile>,
    ) -> Result<ResponsePayload, EngineError> {
        let mut session = self
            .sessions
            .get(session_id)?
            .unwrap_or_else(|| ConversationSession::new(session_id));

        let (payload, intent) = self.handle_turn(&mut session, text, attachment);

        session.push_history(
            HistoryEntry::new(text, payload.message.clone(), intent),
            self.settings.history_limit,
            self.settings.history_text_limit,
        );
        self.sessions.put(session)?;

        Ok(payload)
    }

    /// Route one turn. Returns the payload plus the classified intent for
    /// the history entry, when classification ran.
    fn handle_turn(
        &self,
        session: &mut ConversationSession,
        text: &str,
        attachment: Option<&AttachedFile>,
    ) -> (ResponsePayload, Option<String>) {
        // Life-safety pre-filter outranks everything. Mode and slot
        // progress stay untouched so a later message resumes the flow.
        if self.detector.is_emergency(text) {
            tracing::warn!(session_id = %session.id, "emergency keyword detected");
            let payload = ResponsePayload::new(
                ResponseKind::Emergency,
                self.detector.contacts_message(),
            );
            return (payload, None);
        }

        // Attachment branch: fixed file-type response, no classification
        // for this turn.
        if let Some(file) = attachment {
            return (file_response(file), None);
        }

        let classification = self.classifier.classify(text);
        tracing::debug!(
            session_id = %session.id,
            intent = %classification.intent,
            confidence = classification.confidence,
            "classified message"
        );

        let payload = self.dialogue.step(
            session,
            text,
            &classification,
            self.classifier.switch_threshold(),
            self.sink.as_ref(),
        );
        (payload, Some(classification.intent))
    }
}

/// Fixed responses for attached files, by coarse file kind
fn file_response(file: &AttachedFile) -> ResponsePayload {
    match file.kind() {
        FileKind::Image => ResponsePayload::new(
            ResponseKind::FileReceived,
            "Thanks for the photo. Would you like to attach it to an incident report or a safety concern?",
        )
        .with_actions(vec![
            ResponseAction::resubmit("Report an incident", "I need to report an incident"),
            ResponseAction::resubmit("Raise a safety concern", "I have a safety concern"),
        ]),
        FileKind::Pdf => ResponsePayload::new(
            ResponseKind::FileReceived,
            "That looks like a document. If it's a safety data sheet, you can add it to the SDS library.",
        )
        .with_action(ResponseAction::navigate("Open SDS Library", "/sds")),
        FileKind::Other => ResponsePayload::new(
            ResponseKind::FileReceived,
            format!(
                "I received {}. Tell me what you'd like to do with it.",
                file.filename
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_response_suggests_intake() {
        let payload = file_response(&AttachedFile::new("photo.png", "image/png"));
        assert_eq!(payload.kind, ResponseKind::FileReceived);
        assert_eq!(payload.actions.len(), 2);
    }

    #[test]
    fn test_pdf_file_response_points_at_sds() {
        let payload = file_response(&AttachedFile::new("sheet.pdf", "application/pdf"));
        assert!(payload.message.contains("SDS"));
    }
}
