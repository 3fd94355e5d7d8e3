use crate::composer::ComposerState;
use crate::input::{AttachedFile, MAX_TEXT_CHARS};
use crate::view_model::{AppViewModel, AttachmentView};

pub type RequestId = u64;

/// Ticks between the last composer edit and the draft write.
/// At the shell's 100 ms cadence this is roughly one second.
pub const DRAFT_DEBOUNCE_TICKS: u8 = 10;

/// Ticks a confirmation toast stays visible.
pub const TOAST_TICKS: u8 = 20;

/// Stage of the current submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Loading,
    Success,
    Error,
}

/// Outcome of a successful classification, kept until the next attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub classification: String,
    pub auto_reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Toast {
    text: String,
    ticks_left: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: SubmissionPhase,
    composer: ComposerState,
    attachment: Option<AttachedFile>,
    result: Option<ClassificationResult>,
    error: Option<String>,
    toast: Option<Toast>,
    /// Ticks remaining before the pending draft write fires.
    draft_countdown: Option<u8>,
    next_request_id: RequestId,
    in_flight: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            phase: self.phase,
            composer_text: self.composer.text().to_owned(),
            cursor_position: self.composer.cursor_position(),
            char_count: self.composer.char_count(),
            char_limit: MAX_TEXT_CHARS,
            attachment: self.attachment.as_ref().map(|file| AttachmentView {
                name: file.name.clone(),
                size: file.size,
            }),
            result: self.result.clone(),
            error: self.error.clone(),
            toast: self.toast.as_ref().map(|toast| toast.text.clone()),
            submit_enabled: !matches!(
                self.phase,
                SubmissionPhase::Validating | SubmissionPhase::Loading
            ),
            dirty: self.dirty,
        }
    }

    /// Returns whether a redraw is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was_dirty = self.dirty;
        self.dirty = false;
        was_dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: SubmissionPhase) {
        self.phase = phase;
        self.dirty = true;
    }

    pub(crate) fn composer(&self) -> &ComposerState {
        &self.composer
    }

    pub(crate) fn composer_mut(&mut self) -> &mut ComposerState {
        &mut self.composer
    }

    pub(crate) fn attachment(&self) -> Option<&AttachedFile> {
        self.attachment.as_ref()
    }

    pub(crate) fn set_attachment(&mut self, file: Option<AttachedFile>) {
        self.attachment = file;
        self.dirty = true;
    }

    pub(crate) fn set_result(&mut self, result: Option<ClassificationResult>) {
        self.result = result;
        self.dirty = true;
    }

    pub(crate) fn result(&self) -> Option<&ClassificationResult> {
        self.result.as_ref()
    }

    pub(crate) fn set_error(&mut self, message: Option<String>) {
        self.error = message;
        self.dirty = true;
    }

    pub(crate) fn show_toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            ticks_left: TOAST_TICKS,
        });
        self.dirty = true;
    }

    /// Counts the toast down one tick; expires it at zero.
    pub(crate) fn tick_toast(&mut self) {
        if let Some(toast) = self.toast.as_mut() {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
            if toast.ticks_left == 0 {
                self.toast = None;
            }
            self.dirty = true;
        }
    }

    /// Restarts the draft debounce window after an edit.
    pub(crate) fn schedule_draft_write(&mut self) {
        self.draft_countdown = Some(DRAFT_DEBOUNCE_TICKS);
    }

    pub(crate) fn cancel_draft_write(&mut self) {
        self.draft_countdown = None;
    }

    /// Counts the debounce down one tick; returns true when it fires.
    pub(crate) fn tick_draft_countdown(&mut self) -> bool {
        match self.draft_countdown.as_mut() {
            Some(ticks) => {
                *ticks = ticks.saturating_sub(1);
                if *ticks == 0 {
                    self.draft_countdown = None;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Allocates the id for a new dispatch and marks it in flight.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.in_flight = Some(self.next_request_id);
        self.next_request_id
    }

    pub(crate) fn finish_request(&mut self) {
        self.in_flight = None;
    }

    /// True when the event belongs to the request currently in flight.
    pub(crate) fn is_current_request(&self, request_id: RequestId) -> bool {
        self.in_flight == Some(request_id)
    }
}
