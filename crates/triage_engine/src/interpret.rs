use serde::Deserialize;

use crate::{Classification, DispatchFailure, FailureKind};

/// Canonical response shape of the classification service. Fields are all
/// optional so error bodies without a `status` flag still decode.
#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    classification: Option<String>,
    #[serde(default)]
    auto_reply: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Maps a received response to a classification or a failure.
///
/// The HTTP status takes precedence over the body's own `status` flag when
/// the two disagree: a non-2xx response is a service failure even if the
/// body claims success.
pub fn interpret_response(
    status: u16,
    body: &[u8],
) -> Result<Classification, DispatchFailure> {
    let parsed: ResponseBody = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(_) => {
            return Err(DispatchFailure::new(
                FailureKind::MalformedResponse { status },
                format!("Unexpected response from the service (HTTP {status})."),
            ));
        }
    };

    if !(200..300).contains(&status) {
        let message = parsed
            .message
            .unwrap_or_else(|| format!("The service rejected the request (HTTP {status})."));
        return Err(DispatchFailure::new(
            FailureKind::Service { status },
            message,
        ));
    }

    match parsed.status.as_deref() {
        Some("success") => match (parsed.classification, parsed.auto_reply) {
            (Some(label), Some(auto_reply)) => Ok(Classification { label, auto_reply }),
            _ => Err(DispatchFailure::new(
                FailureKind::MalformedResponse { status },
                "The service reported success without a classification.",
            )),
        },
        Some(_) => {
            let message = parsed
                .message
                .unwrap_or_else(|| "The service reported an error.".to_owned());
            Err(DispatchFailure::new(
                FailureKind::Service { status },
                message,
            ))
        }
        None => match parsed.message {
            Some(message) => Err(DispatchFailure::new(
                FailureKind::Service { status },
                message,
            )),
            None => Err(DispatchFailure::new(
                FailureKind::MalformedResponse { status },
                format!("Unexpected response from the service (HTTP {status})."),
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn success_body_decodes_both_fields() {
        let body = br#"{"status":"success","classification":"Produtivo","auto_reply":"Recebido."}"#;

        let result = interpret_response(200, body).expect("success");

        assert_eq!(result.label, "Produtivo");
        assert_eq!(result.auto_reply, "Recebido.");
    }

    #[test]
    fn error_status_field_carries_the_service_message() {
        let body = br#"{"status":"error","message":"empty email content"}"#;

        let err = interpret_response(200, body).unwrap_err();

        assert_eq!(err.kind, FailureKind::Service { status: 200 });
        assert_eq!(err.message, "empty email content");
    }

    #[test]
    fn http_status_wins_over_body_success_flag() {
        let body = br#"{"status":"success","classification":"Produtivo","auto_reply":"ok"}"#;

        let err = interpret_response(500, body).unwrap_err();

        assert_eq!(err.kind, FailureKind::Service { status: 500 });
    }

    #[test]
    fn error_status_without_body_flag_uses_message_field() {
        let body = br#"{"message":"bad input"}"#;

        let err = interpret_response(400, body).unwrap_err();

        assert_eq!(err.kind, FailureKind::Service { status: 400 });
        assert_eq!(err.message, "bad input");
    }

    #[test]
    fn error_status_without_message_derives_one_from_the_code() {
        let err = interpret_response(503, b"{}").unwrap_err();

        assert_eq!(err.kind, FailureKind::Service { status: 503 });
        assert!(err.message.contains("503"));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = interpret_response(200, b"<html>proxy error</html>").unwrap_err();

        assert_eq!(err.kind, FailureKind::MalformedResponse { status: 200 });
        assert!(err.message.contains("200"));
    }

    #[test]
    fn success_flag_without_fields_is_malformed() {
        let err = interpret_response(200, br#"{"status":"success"}"#).unwrap_err();

        assert_eq!(err.kind, FailureKind::MalformedResponse { status: 200 });
    }

    #[test]
    fn parseable_body_with_nothing_expected_is_malformed() {
        let err = interpret_response(200, br#"{"data":42}"#).unwrap_err();

        assert_eq!(err.kind, FailureKind::MalformedResponse { status: 200 });
    }
}
