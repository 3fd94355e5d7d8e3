use crate::{
    collect, AppState, AttachedFile, ClassificationResult, CursorMove, Effect, Msg,
    SubmissionPhase,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CharTyped(ch) => {
            leave_terminal_phase(&mut state);
            if state.composer_mut().insert_char(ch) {
                state.schedule_draft_write();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::BackspacePressed => {
            leave_terminal_phase(&mut state);
            if state.composer_mut().delete_char_before() {
                state.schedule_draft_write();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeletePressed => {
            leave_terminal_phase(&mut state);
            if state.composer_mut().delete_char_at() {
                state.schedule_draft_write();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CursorMoved(direction) => {
            match direction {
                CursorMove::Left => state.composer_mut().move_cursor_left(),
                CursorMove::Right => state.composer_mut().move_cursor_right(),
                CursorMove::Home => state.composer_mut().move_cursor_home(),
                CursorMove::End => state.composer_mut().move_cursor_end(),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::FileAttached { path, name, size } => {
            leave_terminal_phase(&mut state);
            state.set_attachment(Some(AttachedFile { path, name, size }));
            Vec::new()
        }
        Msg::AttachmentCleared => {
            leave_terminal_phase(&mut state);
            if state.attachment().is_some() {
                state.set_attachment(None);
            }
            Vec::new()
        }
        Msg::SubmitRequested => submit(&mut state),
        Msg::ClassificationArrived {
            request_id,
            classification,
            auto_reply,
        } => {
            // Stale completions (a request no longer in flight) are dropped.
            if state.phase() != SubmissionPhase::Loading || !state.is_current_request(request_id)
            {
                return (state, Vec::new());
            }
            state.finish_request();
            state.set_result(Some(ClassificationResult {
                classification,
                auto_reply,
            }));
            state.set_error(None);
            state.set_phase(SubmissionPhase::Success);
            // A pending debounced write would resurrect the draft we are
            // about to clear.
            state.cancel_draft_write();
            vec![Effect::ClearDraft]
        }
        Msg::ClassificationFailed {
            request_id,
            class: _,
            message,
        } => {
            if state.phase() != SubmissionPhase::Loading || !state.is_current_request(request_id)
            {
                return (state, Vec::new());
            }
            state.finish_request();
            state.set_result(None);
            state.set_error(Some(message));
            state.set_phase(SubmissionPhase::Error);
            Vec::new()
        }
        Msg::DraftRestored(text) => {
            if state.phase() == SubmissionPhase::Idle
                && state.composer().is_empty()
                && !text.is_empty()
            {
                state.composer_mut().set_text(text);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CopyReplyRequested => {
            let reply = state.result().map(|result| result.auto_reply.clone());
            match reply {
                Some(text) => {
                    state.show_toast("Reply copied to clipboard");
                    vec![Effect::CopyToClipboard { text }]
                }
                None => Vec::new(),
            }
        }
        Msg::Tick => {
            let mut effects = Vec::new();
            if state.tick_draft_countdown() {
                if state.composer().is_empty() {
                    effects.push(Effect::ClearDraft);
                } else {
                    effects.push(Effect::SaveDraft {
                        text: state.composer().text().to_owned(),
                    });
                }
            }
            state.tick_toast();
            effects
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Success and Error are terminal for one attempt; the next edit returns
/// the form to Idle and discards the previous outcome.
fn leave_terminal_phase(state: &mut AppState) {
    if matches!(
        state.phase(),
        SubmissionPhase::Success | SubmissionPhase::Error
    ) {
        state.set_result(None);
        state.set_error(None);
        state.set_phase(SubmissionPhase::Idle);
    }
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    // The submit control is disabled while Loading; ignore the message if
    // it arrives anyway.
    if state.phase() == SubmissionPhase::Loading {
        return Vec::new();
    }

    state.set_phase(SubmissionPhase::Validating);
    state.set_result(None);
    state.set_error(None);

    match collect(state.composer().text(), state.attachment()) {
        Err(err) => {
            state.set_error(Some(err.to_string()));
            state.set_phase(SubmissionPhase::Error);
            Vec::new()
        }
        Ok(input) => {
            let request_id = state.begin_request();
            state.set_phase(SubmissionPhase::Loading);
            vec![Effect::Dispatch { request_id, input }]
        }
    }
}
