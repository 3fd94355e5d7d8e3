//! Input collection: turns the current form state into a dispatchable
//! submission or a validation failure.

use std::fmt;

/// Maximum accepted email text length, in characters.
pub const MAX_TEXT_CHARS: usize = 10_000;

/// Maximum accepted attachment size, in bytes.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Attachment extensions the service understands. Advisory only; the
/// service re-checks on its side.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["txt", "pdf"];

/// A file the user has staged for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub path: String,
    pub name: String,
    pub size: u64,
}

/// Exactly one source of email content per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    Text(String),
    File { path: String, name: String, size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BothProvided,
    NothingProvided,
    TextTooLong { chars: usize, max: usize },
    FileTooLarge { bytes: u64, max: u64 },
    UnsupportedExtension { name: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BothProvided => {
                write!(f, "Provide email text or a file, not both.")
            }
            ValidationError::NothingProvided => {
                write!(f, "Provide email text or upload a file.")
            }
            ValidationError::TextTooLong { chars, max } => {
                write!(f, "Email text is too long ({chars} of {max} characters).")
            }
            ValidationError::FileTooLarge { bytes, max } => {
                write!(f, "Attachment is too large ({bytes} bytes, maximum {max}).")
            }
            ValidationError::UnsupportedExtension { name } => {
                write!(f, "Unsupported file type for {name}. Use .txt or .pdf.")
            }
        }
    }
}

/// Validates the form state and produces the input to dispatch.
///
/// Rules are checked in order: both populated, neither populated, text
/// length, attachment size, attachment extension. Whitespace-only text
/// counts as absent, but accepted text is sent as typed.
pub fn collect(
    text: &str,
    attachment: Option<&AttachedFile>,
) -> Result<SubmissionInput, ValidationError> {
    let has_text = !text.trim().is_empty();

    match (has_text, attachment) {
        (true, Some(_)) => Err(ValidationError::BothProvided),
        (false, None) => Err(ValidationError::NothingProvided),
        (true, None) => {
            let chars = text.chars().count();
            if chars > MAX_TEXT_CHARS {
                Err(ValidationError::TextTooLong {
                    chars,
                    max: MAX_TEXT_CHARS,
                })
            } else {
                Ok(SubmissionInput::Text(text.to_owned()))
            }
        }
        (false, Some(file)) => {
            if file.size > MAX_FILE_BYTES {
                Err(ValidationError::FileTooLarge {
                    bytes: file.size,
                    max: MAX_FILE_BYTES,
                })
            } else if !has_accepted_extension(&file.name) {
                Err(ValidationError::UnsupportedExtension {
                    name: file.name.clone(),
                })
            } else {
                Ok(SubmissionInput::File {
                    path: file.path.clone(),
                    name: file.name.clone(),
                    size: file.size,
                })
            }
        }
    }
}

fn has_accepted_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}
