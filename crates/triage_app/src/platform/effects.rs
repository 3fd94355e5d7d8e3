use triage_core::{Effect, FailureClass, Msg, SubmissionInput};
use triage_engine::{
    DispatchSettings, EmailSource, EngineEvent, EngineHandle, FailureKind,
};
use triage_logging::{triage_info, triage_warn};

use super::persistence::DraftStore;

/// Executes the effects the pure core asks for: engine dispatches, draft
/// writes, and clipboard copies.
pub struct EffectRunner {
    engine: EngineHandle,
    drafts: DraftStore,
}

impl EffectRunner {
    pub fn new(settings: DispatchSettings, drafts: DraftStore) -> Self {
        Self {
            engine: EngineHandle::new(settings),
            drafts,
        }
    }

    pub fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch { request_id, input } => {
                    self.engine.dispatch(request_id, map_input(input));
                }
                Effect::SaveDraft { text } => {
                    self.drafts.save(&text);
                }
                Effect::ClearDraft => {
                    self.drafts.clear();
                }
                Effect::CopyToClipboard { text } => {
                    copy_to_clipboard(&text);
                }
            }
        }
    }

    /// Drains completed dispatches into core messages.
    pub fn poll_engine(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::DispatchCompleted { request_id, result } => match result {
                    Ok(classification) => {
                        triage_info!(
                            "request {} classified as {}",
                            request_id,
                            classification.label
                        );
                        msgs.push(Msg::ClassificationArrived {
                            request_id,
                            classification: classification.label,
                            auto_reply: classification.auto_reply,
                        });
                    }
                    Err(failure) => {
                        triage_warn!(
                            "request {} failed ({}): {}",
                            request_id,
                            failure.kind,
                            failure.message
                        );
                        msgs.push(Msg::ClassificationFailed {
                            request_id,
                            class: map_failure_class(&failure.kind),
                            message: failure.message,
                        });
                    }
                },
            }
        }
        msgs
    }
}

fn map_input(input: SubmissionInput) -> EmailSource {
    match input {
        SubmissionInput::Text(text) => EmailSource::Text(text),
        SubmissionInput::File { path, name, .. } => EmailSource::File {
            path: path.into(),
            name,
        },
    }
}

fn map_failure_class(kind: &FailureKind) -> FailureClass {
    if kind.is_application() {
        FailureClass::Application
    } else {
        FailureClass::Transport
    }
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(err) = clipboard.set_text(text.to_owned()) {
                triage_warn!("Failed to copy reply to clipboard: {}", err);
            }
        }
        Err(err) => {
            triage_warn!("Clipboard unavailable: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_failures_map_to_application_class() {
        assert_eq!(
            map_failure_class(&FailureKind::Service { status: 400 }),
            FailureClass::Application
        );
    }

    #[test]
    fn non_service_failures_map_to_transport_class() {
        for kind in [
            FailureKind::Network,
            FailureKind::Timeout,
            FailureKind::MalformedResponse { status: 200 },
            FailureKind::Attachment,
        ] {
            assert_eq!(map_failure_class(&kind), FailureClass::Transport);
        }
    }

    #[test]
    fn file_input_keeps_the_original_name() {
        let source = map_input(SubmissionInput::File {
            path: "/tmp/mail.txt".to_owned(),
            name: "mail.txt".to_owned(),
            size: 42,
        });

        assert_eq!(
            source,
            EmailSource::File {
                path: "/tmp/mail.txt".into(),
                name: "mail.txt".to_owned(),
            }
        );
    }
}
