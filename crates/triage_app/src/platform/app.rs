use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use triage_core::{update, AppState, CursorMove, Msg};
use triage_engine::DispatchSettings;
use triage_logging::{triage_info, triage_warn};

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::persistence::DraftStore;
use super::ui::{self, render::ShellChrome, terminal::TerminalSession, Focus};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// What a key press means for the shell. Core-bound messages are wrapped in
/// `Forward`; the rest only touch shell-local chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellAction {
    Quit,
    Forward(Msg),
    FocusNext,
    PathChar(char),
    PathBackspace,
    ConfirmPath,
}

pub fn run_app() -> Result<()> {
    logging::initialize(LogDestination::File);
    triage_info!("triage_app starting");

    let runner = EffectRunner::new(DispatchSettings::default(), DraftStore::at_default_location());

    let mut state = AppState::new();
    if let Some(text) = runner.drafts().load() {
        state = apply(state, Msg::DraftRestored(text), &runner);
    }

    let mut terminal = TerminalSession::new()?;
    let mut focus = Focus::default();
    let mut path_input = String::new();
    let mut attach_notice: Option<String> = None;
    let mut needs_redraw = true;

    loop {
        for msg in runner.poll_engine() {
            state = apply(state, msg, &runner);
        }
        if state.consume_dirty() {
            needs_redraw = true;
        }

        if needs_redraw {
            let view = state.view();
            let chrome = ShellChrome {
                focus,
                path_input: &path_input,
                attach_notice: attach_notice.as_deref(),
            };
            terminal.draw(|frame| ui::render::render(frame, &view, &chrome))?;
            needs_redraw = false;
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            state = apply(state, Msg::Tick, &runner);
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(action) = map_key(focus, key) else {
                    continue;
                };
                match action {
                    ShellAction::Quit => break,
                    ShellAction::Forward(msg) => {
                        state = apply(state, msg, &runner);
                    }
                    ShellAction::FocusNext => {
                        focus = focus.next();
                        needs_redraw = true;
                    }
                    ShellAction::PathChar(ch) => {
                        path_input.push(ch);
                        attach_notice = None;
                        needs_redraw = true;
                    }
                    ShellAction::PathBackspace => {
                        path_input.pop();
                        attach_notice = None;
                        needs_redraw = true;
                    }
                    ShellAction::ConfirmPath => {
                        match stage_attachment(&path_input) {
                            Ok(msg) => {
                                path_input.clear();
                                attach_notice = None;
                                focus = Focus::Composer;
                                state = apply(state, msg, &runner);
                            }
                            Err(notice) => {
                                attach_notice = Some(notice);
                            }
                        }
                        needs_redraw = true;
                    }
                }
            }
            Event::Resize(_, _) => {
                needs_redraw = true;
            }
            _ => {}
        }
    }

    triage_info!("triage_app shutting down");
    Ok(())
}

fn apply(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

/// Keyboard bindings: global chords first, then per-focus editing keys.
fn map_key(focus: Focus, key: KeyEvent) -> Option<ShellAction> {
    if key.code == KeyCode::Esc {
        return Some(ShellAction::Quit);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(ShellAction::Quit),
            KeyCode::Char('s') => Some(ShellAction::Forward(Msg::SubmitRequested)),
            KeyCode::Char('y') => Some(ShellAction::Forward(Msg::CopyReplyRequested)),
            KeyCode::Char('u') => Some(ShellAction::Forward(Msg::AttachmentCleared)),
            _ => None,
        };
    }

    if key.code == KeyCode::Tab {
        return Some(ShellAction::FocusNext);
    }

    match focus {
        Focus::Composer => match key.code {
            KeyCode::Char(ch) => Some(ShellAction::Forward(Msg::CharTyped(ch))),
            KeyCode::Enter => Some(ShellAction::Forward(Msg::CharTyped('\n'))),
            KeyCode::Backspace => Some(ShellAction::Forward(Msg::BackspacePressed)),
            KeyCode::Delete => Some(ShellAction::Forward(Msg::DeletePressed)),
            KeyCode::Left => Some(ShellAction::Forward(Msg::CursorMoved(CursorMove::Left))),
            KeyCode::Right => Some(ShellAction::Forward(Msg::CursorMoved(CursorMove::Right))),
            KeyCode::Home => Some(ShellAction::Forward(Msg::CursorMoved(CursorMove::Home))),
            KeyCode::End => Some(ShellAction::Forward(Msg::CursorMoved(CursorMove::End))),
            _ => None,
        },
        Focus::Attachment => match key.code {
            KeyCode::Char(ch) => Some(ShellAction::PathChar(ch)),
            KeyCode::Backspace => Some(ShellAction::PathBackspace),
            KeyCode::Enter => Some(ShellAction::ConfirmPath),
            _ => None,
        },
    }
}

/// Stats the typed path and turns it into an attachment message. Terminals
/// paste dropped files as a (possibly quoted) path, so quotes are stripped.
fn stage_attachment(raw_path: &str) -> Result<Msg, String> {
    let trimmed = raw_path.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            trimmed
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        })
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        return Err("Type or paste a file path first.".to_owned());
    }

    let path = Path::new(unquoted);
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => {
            triage_warn!("Cannot stage attachment {:?}: {}", path, err);
            return Err(format!("Cannot read {unquoted}: {err}"));
        }
    };
    if !metadata.is_file() {
        return Err(format!("{unquoted} is not a file."));
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| unquoted.to_owned());

    Ok(Msg::FileAttached {
        path: unquoted.to_owned(),
        name,
        size: metadata.len(),
    })
}
