use std::sync::Once;

use triage_core::{
    update, AppState, Effect, FailureClass, Msg, RequestId, SubmissionInput, SubmissionPhase,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(triage_logging::initialize_for_tests);
}

fn type_text(mut state: AppState, text: &str) -> AppState {
    for ch in text.chars() {
        let (next, _) = update(state, Msg::CharTyped(ch));
        state = next;
    }
    state
}

fn submit(state: AppState) -> (AppState, RequestId, SubmissionInput) {
    let (state, effects) = update(state, Msg::SubmitRequested);
    let (request_id, input) = effects
        .into_iter()
        .find_map(|effect| match effect {
            Effect::Dispatch { request_id, input } => Some((request_id, input)),
            _ => None,
        })
        .expect("dispatch effect");
    (state, request_id, input)
}

#[test]
fn valid_text_submission_enters_loading_and_dispatches() {
    init_logging();
    let state = type_text(AppState::new(), "urgent: server down");

    let (mut state, request_id, input) = submit(state);
    let view = state.view();

    assert_eq!(view.phase, SubmissionPhase::Loading);
    assert!(!view.submit_enabled);
    assert_eq!(request_id, 1);
    assert_eq!(
        input,
        SubmissionInput::Text("urgent: server down".to_owned())
    );
    assert!(state.consume_dirty());
}

#[test]
fn classification_arrival_moves_to_success_and_clears_draft() {
    init_logging();
    let state = type_text(AppState::new(), "urgent: server down");
    let (state, request_id, _) = submit(state);

    let (state, effects) = update(
        state,
        Msg::ClassificationArrived {
            request_id,
            classification: "Produtivo".to_owned(),
            auto_reply: "Recebemos seu e-mail.".to_owned(),
        },
    );
    let view = state.view();

    assert_eq!(effects, vec![Effect::ClearDraft]);
    assert_eq!(view.phase, SubmissionPhase::Success);
    assert!(view.submit_enabled);
    let result = view.result.expect("classification result");
    assert_eq!(result.classification, "Produtivo");
    assert_eq!(result.auto_reply, "Recebemos seu e-mail.");
    assert_eq!(view.error, None);
}

#[test]
fn transport_failure_moves_to_error_and_reenables_submit() {
    init_logging();
    let state = type_text(AppState::new(), "hello");
    let (state, request_id, _) = submit(state);

    let (state, effects) = update(
        state,
        Msg::ClassificationFailed {
            request_id,
            class: FailureClass::Transport,
            message: "Could not reach the classification service.".to_owned(),
        },
    );
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.phase, SubmissionPhase::Error);
    assert!(view.submit_enabled);
    assert_eq!(view.result, None);
    assert_eq!(
        view.error.as_deref(),
        Some("Could not reach the classification service.")
    );
}

#[test]
fn application_failure_surfaces_service_message() {
    init_logging();
    let state = type_text(AppState::new(), "hello");
    let (state, request_id, _) = submit(state);

    let (state, _) = update(
        state,
        Msg::ClassificationFailed {
            request_id,
            class: FailureClass::Application,
            message: "bad input".to_owned(),
        },
    );
    let view = state.view();

    assert_eq!(view.phase, SubmissionPhase::Error);
    assert!(view.error.unwrap().contains("bad input"));
    assert_eq!(view.result, None);
}

#[test]
fn submit_while_loading_is_ignored() {
    init_logging();
    let state = type_text(AppState::new(), "hello");
    let (state, _, _) = submit(state);

    let (state, effects) = update(state, Msg::SubmitRequested);

    assert!(effects.is_empty());
    assert_eq!(state.view().phase, SubmissionPhase::Loading);
}

#[test]
fn stale_completion_is_dropped() {
    init_logging();
    let state = type_text(AppState::new(), "hello");
    let (state, request_id, _) = submit(state);

    let (state, effects) = update(
        state,
        Msg::ClassificationArrived {
            request_id: request_id + 1,
            classification: "Produtivo".to_owned(),
            auto_reply: "late".to_owned(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().phase, SubmissionPhase::Loading);
    assert_eq!(state.view().result, None);
}

#[test]
fn editing_after_success_returns_to_idle_and_discards_result() {
    init_logging();
    let state = type_text(AppState::new(), "hello");
    let (state, request_id, _) = submit(state);
    let (state, _) = update(
        state,
        Msg::ClassificationArrived {
            request_id,
            classification: "Produtivo".to_owned(),
            auto_reply: "ok".to_owned(),
        },
    );

    let (state, _) = update(state, Msg::CharTyped('!'));
    let view = state.view();

    assert_eq!(view.phase, SubmissionPhase::Idle);
    assert_eq!(view.result, None);
    assert_eq!(view.error, None);
}

#[test]
fn editing_after_error_returns_to_idle() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SubmitRequested);
    assert_eq!(state.view().phase, SubmissionPhase::Error);

    let (state, _) = update(state, Msg::CharTyped('h'));
    let view = state.view();

    assert_eq!(view.phase, SubmissionPhase::Idle);
    assert_eq!(view.error, None);
    assert_eq!(view.composer_text, "h");
}

#[test]
fn second_submission_gets_a_fresh_request_id() {
    init_logging();
    let state = type_text(AppState::new(), "first");
    let (state, first_id, _) = submit(state);
    let (state, _) = update(
        state,
        Msg::ClassificationFailed {
            request_id: first_id,
            class: FailureClass::Transport,
            message: "down".to_owned(),
        },
    );

    let (_, second_id, _) = submit(state);

    assert_eq!(first_id, 1);
    assert_eq!(second_id, 2);
}

#[test]
fn copy_reply_emits_clipboard_effect_and_toast() {
    init_logging();
    let state = type_text(AppState::new(), "hello");
    let (state, request_id, _) = submit(state);
    let (state, _) = update(
        state,
        Msg::ClassificationArrived {
            request_id,
            classification: "Produtivo".to_owned(),
            auto_reply: "Obrigado pelo contato.".to_owned(),
        },
    );

    let (state, effects) = update(state, Msg::CopyReplyRequested);

    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "Obrigado pelo contato.".to_owned(),
        }]
    );
    assert_eq!(
        state.view().toast.as_deref(),
        Some("Reply copied to clipboard")
    );
}

#[test]
fn copy_reply_without_result_is_a_noop() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::CopyReplyRequested);

    assert!(effects.is_empty());
    assert_eq!(state.view().toast, None);
}
