//! Emailing a summary to an address of the caller's choosing.

use axum::{Json, extract::State};
use lettre::message::Mailbox;
use serde::Deserialize;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::{
    app_state::AppState,
    auth::{AuthenticatedUser, dtos::MessageResponse},
    error::{ApiError, ApiResult, ErrorResponse, JsonBody},
    summaries::dtos::present,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub to_email: Option<String>,
    pub summary: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/email/send",
    tag = "email",
    request_body = SendEmailRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Email handed to the relay", body = MessageResponse),
        (status = 400, description = "Missing fields or invalid address", body = ErrorResponse),
        (status = 500, description = "Relay failure", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn send_summary_email(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SendEmailRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (Some(to), Some(summary)) = (present(&payload.to_email), present(&payload.summary)) else {
        return Err(ApiError::Validation(
            "Email and summary are required.".to_string(),
        ));
    };
    if to.parse::<Mailbox>().is_err() {
        return Err(ApiError::Validation("Invalid email address.".to_string()));
    }

    state.mailer.send_summary(to, summary).await.map_err(|e| {
        error!(error = %e, "summary email failed");
        ApiError::Upstream("Failed to send email.".to_string())
    })?;

    info!("summary emailed");
    Ok(Json(MessageResponse::new("Email sent successfully.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app_state::test_support::{TestState, bearer},
        mailer::MailError,
    };
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header::AUTHORIZATION},
        routing::post,
    };
    use mockall::predicate::eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn send(test: TestState, body: Value) -> (StatusCode, Value) {
        let app = Router::new()
            .route("/email/send", post(send_summary_email))
            .with_state(test.build());
        let request = Request::builder()
            .method("POST")
            .uri("/email/send")
            .header(AUTHORIZATION, bearer(Uuid::new_v4()))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_send_success() {
        let mut test = TestState::new();
        test.mailer
            .expect_send_summary()
            .with(eq("reader@example.com"), eq("The gist."))
            .times(1)
            .returning(|_, _| Ok(()));

        let (status, body) = send(
            test,
            json!({"toEmail": "reader@example.com", "summary": "The gist."}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Email sent successfully.");
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let mut test = TestState::new();
        test.mailer.expect_send_summary().never();

        let (status, body) = send(test, json!({"toEmail": "reader@example.com"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email and summary are required.");
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let mut test = TestState::new();
        test.mailer.expect_send_summary().never();

        let (status, _) = send(test, json!({"toEmail": "not an address", "summary": "x"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_relay_failure() {
        let mut test = TestState::new();
        test.mailer
            .expect_send_summary()
            .returning(|_, _| Err(MailError::Send("550 rejected".into())));

        let (status, body) = send(
            test,
            json!({"toEmail": "reader@example.com", "summary": "x"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to send email.");
    }
}
