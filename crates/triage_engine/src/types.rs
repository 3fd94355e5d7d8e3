use std::fmt;
use std::path::PathBuf;

pub type RequestId = u64;

/// One submission's email content, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSource {
    /// Free-form text, sent as the `email_text` field.
    Text(String),
    /// A file on disk, sent as the `email_file` part. Bytes are read at
    /// dispatch time.
    File { path: PathBuf, name: String },
}

/// Decoded success payload from the classification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: String,
    pub auto_reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    DispatchCompleted {
        request_id: RequestId,
        result: Result<Classification, DispatchFailure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl DispatchFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// No response received at all.
    Network,
    /// The connection or response timed out.
    Timeout,
    /// A response arrived but its body was not the expected shape.
    MalformedResponse { status: u16 },
    /// The service answered and declined or failed the request.
    Service { status: u16 },
    /// The staged attachment could not be read from disk.
    Attachment,
}

impl FailureKind {
    /// True when the failure came from the service itself rather than the
    /// path to it.
    pub fn is_application(&self) -> bool {
        matches!(self, FailureKind::Service { .. })
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedResponse { status } => {
                write!(f, "malformed response (http status {status})")
            }
            FailureKind::Service { status } => write!(f, "service error (http status {status})"),
            FailureKind::Attachment => write!(f, "attachment unreadable"),
        }
    }
}
