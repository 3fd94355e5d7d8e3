use std::sync::{mpsc, Arc};
use std::thread;

use crate::dispatch::{DispatchSettings, Dispatcher, ReqwestDispatcher};
use crate::{EmailSource, EngineEvent, RequestId};

enum EngineCommand {
    Dispatch {
        request_id: RequestId,
        source: EmailSource,
    },
}

/// Shell-side handle to the IO thread. Commands go in, completion events
/// come out; the shell drains events on its own cadence.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: DispatchSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let dispatcher = Arc::new(ReqwestDispatcher::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let dispatcher = dispatcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(dispatcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn dispatch(&self, request_id: RequestId, source: EmailSource) {
        let _ = self.cmd_tx.send(EngineCommand::Dispatch { request_id, source });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    dispatcher: &dyn Dispatcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Dispatch { request_id, source } => {
            let result = dispatcher.dispatch(request_id, &source).await;
            let _ = event_tx.send(EngineEvent::DispatchCompleted { request_id, result });
        }
    }
}
