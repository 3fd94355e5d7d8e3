#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Home,
    End,
}

/// Broad class of a dispatch failure, for logging and message framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The service was reached and declined or failed the request.
    Application,
    /// The service was unreachable or its response was unusable.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User typed a character into the composer.
    CharTyped(char),
    /// Backspace in the composer.
    BackspacePressed,
    /// Delete in the composer.
    DeletePressed,
    /// Cursor movement inside the composer.
    CursorMoved(CursorMove),
    /// User staged a file for submission (size from filesystem metadata).
    FileAttached {
        path: String,
        name: String,
        size: u64,
    },
    /// User removed the staged file.
    AttachmentCleared,
    /// User asked to submit the current input.
    SubmitRequested,
    /// Engine delivered a classification for an in-flight request.
    ClassificationArrived {
        request_id: crate::RequestId,
        classification: String,
        auto_reply: String,
    },
    /// Engine reported a failed dispatch.
    ClassificationFailed {
        request_id: crate::RequestId,
        class: FailureClass,
        message: String,
    },
    /// Draft text recovered from disk at startup.
    DraftRestored(String),
    /// User asked to copy the suggested reply to the clipboard.
    CopyReplyRequested,
    /// Shell tick driving debounce and toast expiry.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
