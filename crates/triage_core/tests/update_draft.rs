use std::sync::Once;

use triage_core::{
    update, AppState, Effect, Msg, SubmissionPhase, DRAFT_DEBOUNCE_TICKS,
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

fn tick(mut state: AppState, count: u8) -> (AppState, Vec<Effect>) {
    let mut collected = Vec::new();
    for _ in 0..count {
        let (next, effects) = update(state, Msg::Tick);
        state = next;
        collected.extend(effects);
    }
    (state, collected)
}

#[test]
fn draft_is_written_once_the_debounce_elapses() {
    init_logging();
    let state = type_text(AppState::new(), "meeting notes");

    let (_, effects) = tick(state, DRAFT_DEBOUNCE_TICKS);

    assert_eq!(
        effects,
        vec![Effect::SaveDraft {
            text: "meeting notes".to_owned(),
        }]
    );
}

#[test]
fn no_draft_write_before_the_debounce_elapses() {
    init_logging();
    let state = type_text(AppState::new(), "meeting notes");

    let (_, effects) = tick(state, DRAFT_DEBOUNCE_TICKS - 1);

    assert!(effects.is_empty());
}

#[test]
fn each_edit_restarts_the_debounce_window() {
    init_logging();
    let state = type_text(AppState::new(), "a");
    let (state, effects) = tick(state, DRAFT_DEBOUNCE_TICKS - 1);
    assert!(effects.is_empty());

    // A new keystroke arrives just before the window closes.
    let state = type_text(state, "b");
    let (state, effects) = tick(state, DRAFT_DEBOUNCE_TICKS - 1);
    assert!(effects.is_empty());

    let (_, effects) = tick(state, 1);
    assert_eq!(
        effects,
        vec![Effect::SaveDraft {
            text: "ab".to_owned(),
        }]
    );
}

#[test]
fn emptying_the_composer_clears_the_draft() {
    init_logging();
    let state = type_text(AppState::new(), "x");
    let (state, _) = tick(state, DRAFT_DEBOUNCE_TICKS);

    let (state, _) = update(state, Msg::BackspacePressed);
    let (_, effects) = tick(state, DRAFT_DEBOUNCE_TICKS);

    assert_eq!(effects, vec![Effect::ClearDraft]);
}

#[test]
fn successful_submission_clears_the_draft_and_cancels_pending_writes() {
    init_logging();
    let state = type_text(AppState::new(), "urgent");
    let (state, effects) = update(state, Msg::SubmitRequested);
    let request_id = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Dispatch { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("dispatch effect");

    let (state, effects) = update(
        state,
        Msg::ClassificationArrived {
            request_id,
            classification: "Produtivo".to_owned(),
            auto_reply: "ok".to_owned(),
        },
    );
    assert_eq!(effects, vec![Effect::ClearDraft]);

    // The debounce that started while typing must not fire afterwards.
    let (_, effects) = tick(state, DRAFT_DEBOUNCE_TICKS);
    assert!(effects.is_empty());
}

#[test]
fn restored_draft_fills_an_empty_composer() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::DraftRestored("unfinished reply".to_owned()),
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().composer_text, "unfinished reply");
    assert_eq!(state.view().phase, SubmissionPhase::Idle);
}

#[test]
fn restored_draft_never_overwrites_typed_text() {
    init_logging();
    let state = type_text(AppState::new(), "fresh");

    let (state, _) = update(state, Msg::DraftRestored("stale".to_owned()));

    assert_eq!(state.view().composer_text, "fresh");
}

#[test]
fn restoring_a_draft_does_not_schedule_a_write() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DraftRestored("saved".to_owned()));

    let (_, effects) = tick(state, DRAFT_DEBOUNCE_TICKS);

    assert!(effects.is_empty());
}
