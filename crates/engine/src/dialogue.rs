//! Dialogue manager
//!
//! Owns the per-turn state machine: `General`, `IncidentTypeSelection`,
//! `SlotFilling`, `Terminal`. Decides the next prompt or terminal action for
//! a classified text message and mutates the session accordingly. The
//! emergency and file-attachment branches never reach this module.

use ehs_intake_config::SlotSchemaConfig;
use ehs_intake_core::{
    ConversationSession, DialogueState, PersistenceSink, ResponseAction, ResponseKind,
    ResponsePayload, SessionMode,
};

use crate::classifier::Classification;
use crate::finalizer::RecordFinalizer;

/// Mode a high-confidence intent switches the session into, if any
pub fn intent_target_mode(intent: &str) -> Option<SessionMode> {
    match intent {
        "incident_reporting" => Some(SessionMode::IncidentIntake),
        "safety_concern" => Some(SessionMode::SafetyConcernIntake),
        "sds_lookup" => Some(SessionMode::SdsLookup),
        _ => None,
    }
}

/// Slot-filling dialogue manager
pub struct DialogueManager {
    registry: SlotSchemaConfig,
    finalizer: RecordFinalizer,
}

impl DialogueManager {
    pub fn new(registry: SlotSchemaConfig, finalizer: RecordFinalizer) -> Self {
        Self { registry, finalizer }
    }

    pub fn registry(&self) -> &SlotSchemaConfig {
        &self.registry
    }

    /// Advance the state machine by one text turn.
    ///
    /// `switch_threshold` gates mode switches: below it the current mode is
    /// always preserved, which keeps ambiguous mid-conversation phrasing
    /// from thrashing an active intake.
    pub fn step(
        &self,
        session: &mut ConversationSession,
        text: &str,
        classification: &Classification,
        switch_threshold: f32,
        sink: &dyn PersistenceSink,
    ) -> ResponsePayload {
        // A completed session does not stay stuck: the next message
        // re-enters General before normal processing.
        if let DialogueState::Terminal { .. } = session.state {
            session.reset_intake();
            session.mode = SessionMode::General;
        }

        // Finalization failed last turn: all answers are collected, retry
        // before anything else. The message text is not consumed as a slot.
        if let DialogueState::SlotFilling {
            incident_type,
            slots,
            pending_index,
        } = &session.state
        {
            if *pending_index == slots.len() {
                let incident_type = incident_type.clone();
                return self.try_finalize(session, &incident_type, sink);
            }
        }

        // Mode-switch gate: act on the classification only above the
        // threshold, and only when it targets a different mode. Switching
        // discards any partially collected intake.
        if classification.confidence > switch_threshold {
            if let Some(target) = intent_target_mode(&classification.intent) {
                if target != session.mode {
                    tracing::debug!(
                        session_id = %session.id,
                        from = session.mode.display_name(),
                        to = target.display_name(),
                        intent = %classification.intent,
                        "mode switch"
                    );
                    return self.enter_mode(session, target);
                }
            } else if classification.intent == "help"
                && session.state == DialogueState::General
            {
                return help_menu();
            }
        }

        match session.state.clone() {
            DialogueState::General => match session.mode {
                SessionMode::SdsLookup => sds_lookup_response(),
                _ => general_response(),
            },
            DialogueState::IncidentTypeSelection => self.select_incident_type(session, text),
            DialogueState::SlotFilling {
                incident_type,
                slots,
                pending_index,
            } => self.fill_slot(session, text, &incident_type, &slots, pending_index, sink),
            // Reset to General at the top of the turn
            DialogueState::Terminal { .. } => general_response(),
        }
    }

    /// Destructive entry into a new mode
    fn enter_mode(&self, session: &mut ConversationSession, target: SessionMode) -> ResponsePayload {
        session.reset_intake();
        session.mode = target;

        match target {
            SessionMode::IncidentIntake => {
                session.state = DialogueState::IncidentTypeSelection;
                ResponsePayload::new(
                    ResponseKind::IncidentTypeSelection,
                    self.registry.type_selection_menu(),
                )
            }
            SessionMode::SafetyConcernIntake => {
                let slots = self.registry.slots_for("safety_concern");
                let prompt = self.registry.prompt_for(&slots[0]);
                session.state = DialogueState::SlotFilling {
                    incident_type: "safety_concern".to_string(),
                    slots,
                    pending_index: 0,
                };
                ResponsePayload::new(
                    ResponseKind::SlotFilling,
                    format!("I'll record your safety concern. {prompt}"),
                )
            }
            SessionMode::SdsLookup => {
                // No slot filling here; the session answers SDS queries
                // until the classifier switches it elsewhere.
                session.state = DialogueState::General;
                sds_lookup_response()
            }
            SessionMode::General => {
                session.state = DialogueState::General;
                general_response()
            }
        }
    }

    /// Type-selection turn: match against the keyword sets, or re-prompt.
    /// The user is never silently dropped on an unrecognized answer.
    fn select_incident_type(
        &self,
        session: &mut ConversationSession,
        text: &str,
    ) -> ResponsePayload {
        match self.registry.match_incident_type(text) {
            Some(incident_type) => {
                let incident_type = incident_type.to_string();
                let slots = self.registry.slots_for(&incident_type);
                let prompt = self.registry.prompt_for(&slots[0]);

                tracing::debug!(session_id = %session.id, incident_type, "intake started");

                session.state = DialogueState::SlotFilling {
                    incident_type: incident_type.clone(),
                    slots,
                    pending_index: 0,
                };
                ResponsePayload::new(
                    ResponseKind::SlotFilling,
                    format!(
                        "Got it, a {} report. {prompt}",
                        incident_type.replace('_', " ")
                    ),
                )
            }
            None => ResponsePayload::new(
                ResponseKind::IncidentTypeSelection,
                format!(
                    "I didn't recognize that incident type.\n{}",
                    self.registry.type_selection_menu()
                ),
            ),
        }
    }

    /// Store one answer and advance. Any non-empty text is accepted
    /// verbatim; slot content is free text, not typed fields. Blank
    /// messages re-prompt the pending slot without storing or advancing.
    fn fill_slot(
        &self,
        session: &mut ConversationSession,
        text: &str,
        incident_type: &str,
        slots: &[String],
        pending_index: usize,
        sink: &dyn PersistenceSink,
    ) -> ResponsePayload {
        if text.trim().is_empty() {
            let prompt = self.registry.prompt_for(&slots[pending_index]);
            return ResponsePayload::new(ResponseKind::SlotFilling, prompt);
        }

        session.record_slot(slots[pending_index].clone(), text.to_string());
        let next_index = pending_index + 1;
        session.state = DialogueState::SlotFilling {
            incident_type: incident_type.to_string(),
            slots: slots.to_vec(),
            pending_index: next_index,
        };

        if next_index == slots.len() {
            self.try_finalize(session, incident_type, sink)
        } else {
            let prompt = self.registry.prompt_for(&slots[next_index]);
            ResponsePayload::new(ResponseKind::SlotFilling, prompt)
        }
    }

    /// Finalize the intake and hand the record to the sink (exactly once
    /// per attempt). On failure the session stays in `SlotFilling` with all
    /// answers collected, so the user is never told "done" for a record
    /// that was not stored.
    fn try_finalize(
        &self,
        session: &mut ConversationSession,
        incident_type: &str,
        sink: &dyn PersistenceSink,
    ) -> ResponsePayload {
        let record = self.finalizer.finalize(
            incident_type,
            session.active_context.clone(),
            &self.registry,
        );
        let risk = record.risk_level;

        match sink.store(&record) {
            Ok(record_id) => {
                session.active_context.clear();
                session.state = DialogueState::Terminal {
                    record_id: record_id.clone(),
                };
                ResponsePayload::new(
                    ResponseKind::IncidentCompleted,
                    format!(
                        "Your {} report has been submitted. Reference: {record_id} (risk level: {risk}). The EHS team will follow up as needed.",
                        incident_type.replace('_', " ")
                    ),
                )
                .with_record_id(record_id)
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session.id,
                    incident_type,
                    error = %e,
                    "persistence sink failed, keeping intake for retry"
                );
                ResponsePayload::new(
                    ResponseKind::IncidentSaveFailed,
                    "I couldn't save your report just now. Your answers are safe; send any message and I'll try again.",
                )
            }
        }
    }
}

/// Fixed SDS-library guidance
fn sds_lookup_response() -> ResponsePayload {
    ResponsePayload::new(
        ResponseKind::SdsLookup,
        "You can search the SDS library for safety data sheets by product or chemical name. Which chemical are you looking for?",
    )
    .with_action(ResponseAction::navigate("Open SDS Library", "/sds"))
}

/// Help menu listing everything the assistant can do
fn help_menu() -> ResponsePayload {
    ResponsePayload::new(
        ResponseKind::HelpMenu,
        "Here's what I can help with:\n\
         - Report an incident (injury, environmental, vehicle, near miss, property)\n\
         - Raise a safety concern\n\
         - Look up a safety data sheet (SDS)",
    )
    .with_actions(vec![
        ResponseAction::resubmit("Report an incident", "I need to report an incident"),
        ResponseAction::resubmit("Raise a safety concern", "I have a safety concern"),
        ResponseAction::navigate("Open SDS Library", "/sds"),
    ])
}

/// Default response for unmatched general conversation
fn general_response() -> ResponsePayload {
    ResponsePayload::new(
        ResponseKind::General,
        "I can help you report incidents, raise safety concerns, or look up safety data sheets. Type 'help' to see everything I can do.",
    )
    .with_action(ResponseAction::resubmit("Show help", "help"))
}
