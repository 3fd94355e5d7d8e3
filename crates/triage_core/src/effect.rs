use crate::{RequestId, SubmissionInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one classification request for the validated input.
    Dispatch {
        request_id: RequestId,
        input: SubmissionInput,
    },
    /// Persist the composer text as the local draft.
    SaveDraft { text: String },
    /// Remove the persisted draft.
    ClearDraft,
    /// Put text on the system clipboard.
    CopyToClipboard { text: String },
}
