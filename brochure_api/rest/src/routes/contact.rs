use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use brochure_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, SubmissionRejection,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    errors::{error, internal_server_error, ApiError, ErrorPolicy},
    middlewares::client_ip::ClientIp,
    models::contact::ApiContactSubmitted,
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(submit).fallback(super::not_found),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Extension(client_ip): Extension<ClientIp>,
    Extension(policy): Extension<ErrorPolicy>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        // the body is not parsed at all, as if the form was empty
        Err(JsonRejection::MissingJsonContentType(err)) => {
            debug!("contact form payload without json content type: {err}");
            Value::Object(Default::default())
        }
        Err(err) => return invalid_payload(err),
    };

    match service.submit(payload.into(), client_ip.0.to_string()).await {
        Ok(receipt) => Json(ApiContactSubmitted::from(receipt)).into_response(),
        Err(ContactSubmitError::Rejected(rejection)) => rejected(rejection),
        Err(ContactSubmitError::Other(err)) => internal_server_error(err, policy),
    }
}

fn rejected(rejection: SubmissionRejection) -> Response {
    error(
        StatusCode::BAD_REQUEST,
        ApiError::new(rejection.to_string())
            .with_code(rejection.reason().as_str())
            .with_details(Some(rejection.details())),
    )
}

fn invalid_payload(err: JsonRejection) -> Response {
    debug!("invalid contact form payload: {err}");
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        error(
            StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::new("Request body too large"),
        )
    } else {
        error(StatusCode::BAD_REQUEST, ApiError::new("Invalid JSON body"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use axum::http::Method;
    use brochure_core_contact_contracts::{MockContactFeatureService, SubmissionValidator};
    use brochure_core_contact_impl::{validate::SubmissionValidatorImpl, ContactFeatureServiceImpl};
    use brochure_core_health_contracts::MockHealthFeatureService;
    use brochure_models::contact::{
        ContactSubmission, ContactSubmissionReceipt, RawContactSubmission, SubmissionField,
        SubmissionId,
    };
    use brochure_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::{
        tests::{config, request, send, CLIENT},
        RestServer, RestServerConfig,
    };

    const ID: Uuid = Uuid::from_u128(0x0192_a8f0_7c3e_7000_8000_0000_0000_0001);

    fn server(
        contact: MockContactFeatureService,
    ) -> RestServer<MockHealthFeatureService, MockContactFeatureService> {
        server_with_config(contact, config())
    }

    fn server_with_config(
        contact: MockContactFeatureService,
        config: RestServerConfig,
    ) -> RestServer<MockHealthFeatureService, MockContactFeatureService> {
        RestServer {
            health: MockHealthFeatureService::new(),
            contact,
            config,
        }
    }

    fn submission() -> Value {
        json!({
            "name": "John Doe",
            "email": "john@example.com",
            "message": "Test",
            "services": ["housing"],
        })
    }

    fn all_missing() -> ContactSubmitError {
        SubmissionRejection::MissingRequiredFields(SubmissionField::REQUIRED.into()).into()
    }

    fn post(body: &str) -> axum::http::Request<axum::body::Body> {
        request(Method::POST, "/api/contact", Some(body))
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            RawContactSubmission::from(submission()),
            CLIENT.ip().to_string(),
            Ok(ContactSubmissionReceipt {
                id: SubmissionId::from(ID),
                submitted_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap(),
            }),
        );

        // Act
        let (status, body) = send(server(contact), post(&submission().to_string())).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "Thank you for your inquiry. We will respond within 24 hours.",
                "data": {
                    "submissionId": ID.to_string(),
                    "timestamp": "2026-10-18T09:30:00Z",
                },
            })
        );
    }

    #[tokio::test]
    async fn missing_fields() {
        // Arrange
        let payload = json!({"email": "john@example.com"});
        let contact = MockContactFeatureService::new().with_submit(
            RawContactSubmission::from(payload.clone()),
            CLIENT.ip().to_string(),
            Err(SubmissionRejection::MissingRequiredFields(vec![
                SubmissionField::Name,
                SubmissionField::Message,
            ])
            .into()),
        );

        // Act
        let (status, body) = send(server(contact), post(&payload.to_string())).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "success": false,
                "code": "missing-required-field",
                "error": "Missing required fields",
                "details": {
                    "name": "Name is required",
                    "message": "Message is required",
                },
            })
        );
    }

    #[tokio::test]
    async fn invalid_email() {
        // Arrange
        let payload = json!({"name": "John", "email": "not-an-email", "message": "Test"});
        let contact = MockContactFeatureService::new().with_submit(
            RawContactSubmission::from(payload.clone()),
            CLIENT.ip().to_string(),
            Err(SubmissionRejection::InvalidEmailFormat.into()),
        );

        // Act
        let (status, body) = send(server(contact), post(&payload.to_string())).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "success": false,
                "code": "invalid-email-format",
                "error": "Invalid email format",
                "details": {"email": "Please provide a valid email address"},
            })
        );
    }

    #[tokio::test]
    async fn name_too_long() {
        // Arrange
        let payload = json!({"name": "A".repeat(150), "email": "a@b.co", "message": "ok"});
        let contact = MockContactFeatureService::new().with_submit(
            RawContactSubmission::from(payload.clone()),
            CLIENT.ip().to_string(),
            Err(SubmissionRejection::FieldTooLong {
                field: SubmissionField::Name,
                max_length: 100,
            }
            .into()),
        );

        // Act
        let (status, body) = send(server(contact), post(&payload.to_string())).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "field-too-long");
        assert_eq!(body["error"], "Name too long (max 100 characters)");
        assert_eq!(body["details"]["name"], "Name too long (max 100 characters)");
    }

    #[tokio::test]
    async fn not_an_object() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            RawContactSubmission::default(),
            CLIENT.ip().to_string(),
            Err(all_missing()),
        );

        // Act
        let (status, body) = send(server(contact), post("[1, 2, 3]")).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "missing-required-field");
    }

    #[tokio::test]
    async fn missing_content_type() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            RawContactSubmission::default(),
            CLIENT.ip().to_string(),
            Err(all_missing()),
        );
        let mut request = post(&submission().to_string());
        request.headers_mut().remove(axum::http::header::CONTENT_TYPE);

        // Act
        let (status, body) = send(server(contact), request).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "missing-required-field");
    }

    #[tokio::test]
    async fn invalid_json() {
        // Act
        let (status, body) = send(
            server(MockContactFeatureService::new()),
            post("{\"name\": \"John\""),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"success": false, "error": "Invalid JSON body"})
        );
    }

    #[tokio::test]
    async fn body_too_large() {
        // Arrange
        let config = RestServerConfig {
            body_limit: 64,
            ..config()
        };
        let payload = json!({"name": "J", "email": "a@b.co", "message": "m".repeat(100)});

        // Act
        let (status, body) = send(
            server_with_config(MockContactFeatureService::new(), config),
            post(&payload.to_string()),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "Request body too large");
    }

    #[tokio::test]
    async fn internal_error_hidden() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            RawContactSubmission::from(submission()),
            CLIENT.ip().to_string(),
            Err(anyhow!("notification service unavailable").into()),
        );

        // Act
        let (status, body) = send(server(contact), post(&submission().to_string())).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Internal server error. Please try again later.",
            })
        );
    }

    #[tokio::test]
    async fn internal_error_exposed() {
        // Arrange
        let contact = MockContactFeatureService::new().with_submit(
            RawContactSubmission::from(submission()),
            CLIENT.ip().to_string(),
            Err(anyhow!("notification service unavailable").into()),
        );
        let config = RestServerConfig {
            expose_internal_errors: true,
            ..config()
        };

        // Act
        let (status, body) = send(
            server_with_config(contact, config),
            post(&submission().to_string()),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["details"], "notification service unavailable");
    }

    /// Runs the real validator and keeps every submission it accepted.
    #[derive(Debug, Clone, Default)]
    struct RecordingValidator {
        inner: SubmissionValidatorImpl<TimeServiceImpl>,
        accepted: Arc<Mutex<Vec<ContactSubmission>>>,
    }

    impl SubmissionValidator for RecordingValidator {
        fn validate(
            &self,
            raw: &RawContactSubmission,
            source_address: String,
        ) -> Result<ContactSubmission, SubmissionRejection> {
            let submission = self.inner.validate(raw, source_address)?;
            self.accepted.lock().unwrap().push(submission.clone());
            Ok(submission)
        }
    }

    type RealContact = ContactFeatureServiceImpl<IdServiceImpl, RecordingValidator>;

    fn real_server(
        validator: RecordingValidator,
    ) -> RestServer<MockHealthFeatureService, RealContact> {
        RestServer {
            health: MockHealthFeatureService::new(),
            contact: ContactFeatureServiceImpl {
                id: IdServiceImpl,
                validator,
            },
            config: config(),
        }
    }

    #[tokio::test]
    async fn validator_outcomes() {
        for (payload, expected_status, expected_code) in [
            (submission(), StatusCode::OK, None),
            (
                json!({"name": "", "email": "john@example.com", "message": "Test"}),
                StatusCode::BAD_REQUEST,
                Some("missing-required-field"),
            ),
            (
                json!({"name": "John", "email": "not-an-email", "message": "Test"}),
                StatusCode::BAD_REQUEST,
                Some("invalid-email-format"),
            ),
            (
                json!({"name": "J", "email": "a@b.co", "message": "<script>hi</script>"}),
                StatusCode::OK,
                None,
            ),
            (
                json!({"name": "A".repeat(150), "email": "a@b.co", "message": "ok"}),
                StatusCode::BAD_REQUEST,
                Some("field-too-long"),
            ),
        ] {
            // Arrange
            let validator = RecordingValidator::default();

            // Act
            let (status, body) =
                send(real_server(validator.clone()), post(&payload.to_string())).await;

            // Assert
            assert_eq!(status, expected_status, "{payload}");
            assert_eq!(body["success"], expected_code.is_none(), "{payload}");
            assert_eq!(
                body.get("code").and_then(Value::as_str),
                expected_code,
                "{payload}"
            );
            assert_eq!(
                validator.accepted.lock().unwrap().len(),
                usize::from(expected_code.is_none())
            );
        }
    }

    #[tokio::test]
    async fn accepted_submission_is_sanitized_and_attributed() {
        // Arrange
        let validator = RecordingValidator::default();
        let payload = json!({
            "name": "J",
            "email": "a@b.co",
            "message": "<script>hi</script>",
            "services": ["housing"],
        });

        // Act
        let (status, body) =
            send(real_server(validator.clone()), post(&payload.to_string())).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["submissionId"]
            .as_str()
            .unwrap()
            .parse::<Uuid>()
            .is_ok());

        let accepted = validator.accepted.lock().unwrap();
        let [submission] = accepted.as_slice() else {
            panic!("expected one accepted submission, got {accepted:?}");
        };
        assert_eq!(*submission.message, "scripthi/script");
        assert_eq!(submission.services, ["housing"]);
        assert_eq!(submission.source_address, CLIENT.ip().to_string());
    }
}
