//! Triage engine: classification dispatch and draft storage IO.
mod dispatch;
mod engine;
mod interpret;
mod store;
mod types;

pub use dispatch::{Dispatcher, DispatchSettings, ReqwestDispatcher, DEFAULT_ENDPOINT};
pub use engine::EngineHandle;
pub use interpret::interpret_response;
pub use store::{ensure_state_dir, AtomicFileWriter, StoreError};
pub use types::{
    Classification, DispatchFailure, EmailSource, EngineEvent, FailureKind, RequestId,
};
