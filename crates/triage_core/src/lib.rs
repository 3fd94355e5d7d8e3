//! Triage core: pure submission state machine and view-model helpers.
mod composer;
mod effect;
mod input;
mod msg;
mod state;
mod update;
mod view_model;

pub use composer::ComposerState;
pub use effect::Effect;
pub use input::{
    collect, AttachedFile, SubmissionInput, ValidationError, ACCEPTED_EXTENSIONS, MAX_FILE_BYTES,
    MAX_TEXT_CHARS,
};
pub use msg::{CursorMove, FailureClass, Msg};
pub use state::{
    AppState, ClassificationResult, RequestId, SubmissionPhase, DRAFT_DEBOUNCE_TICKS, TOAST_TICKS,
};
pub use update::update;
pub use view_model::{AppViewModel, AttachmentView};
