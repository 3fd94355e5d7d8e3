use reqwest::multipart::{Form, Part};
use triage_logging::{triage_debug, triage_info};

use crate::interpret::interpret_response;
use crate::{Classification, DispatchFailure, EmailSource, FailureKind, RequestId};

/// Default endpoint of the classification service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/classify-email";

#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub endpoint: String,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(
        &self,
        request_id: RequestId,
        source: &EmailSource,
    ) -> Result<Classification, DispatchFailure>;
}

/// Issues one multipart POST per submission. No retries; timeouts are
/// whatever the client defaults to.
#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    settings: DispatchSettings,
}

impl ReqwestDispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, DispatchFailure> {
        reqwest::Client::builder()
            .build()
            .map_err(|err| DispatchFailure::new(FailureKind::Network, err.to_string()))
    }

    async fn build_form(&self, source: &EmailSource) -> Result<Form, DispatchFailure> {
        match source {
            EmailSource::Text(text) => Ok(Form::new().text("email_text", text.clone())),
            EmailSource::File { path, name } => {
                let bytes = tokio::fs::read(path).await.map_err(|err| {
                    DispatchFailure::new(
                        FailureKind::Attachment,
                        format!("Could not read {name}: {err}."),
                    )
                })?;
                let part = Part::bytes(bytes).file_name(name.clone());
                Ok(Form::new().part("email_file", part))
            }
        }
    }
}

#[async_trait::async_trait]
impl Dispatcher for ReqwestDispatcher {
    async fn dispatch(
        &self,
        request_id: RequestId,
        source: &EmailSource,
    ) -> Result<Classification, DispatchFailure> {
        match source {
            EmailSource::Text(text) => {
                triage_info!(
                    "dispatch request_id={} source=text chars={}",
                    request_id,
                    text.chars().count()
                );
            }
            EmailSource::File { name, .. } => {
                triage_info!(
                    "dispatch request_id={} source=file name={}",
                    request_id,
                    name
                );
            }
        }

        let client = self.build_client()?;
        let form = self.build_form(source).await?;

        let response = client
            .post(&self.settings.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        triage_debug!(
            "response request_id={} status={} body_len={}",
            request_id,
            status,
            body.len()
        );

        interpret_response(status, &body)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DispatchFailure {
    if err.is_timeout() {
        return DispatchFailure::new(
            FailureKind::Timeout,
            "The classification service took too long to answer.",
        );
    }
    DispatchFailure::new(
        FailureKind::Network,
        "Could not reach the classification service.",
    )
}
