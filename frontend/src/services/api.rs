use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    ActivateRequest, ApiErrorBody, Appointment, AuthResponse, BookRequest, ChangePasswordRequest,
    CheckStudentRequest, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest,
    RejectRequest, ResetPasswordRequest, SlotRelease, UserProfile,
};
use thiserror::Error;

use crate::services::session;

/// Typed failure of a gateway call. Components switch on the variant and
/// never inspect server wording themselves; classification happens once,
/// here, from the HTTP status plus the server's loose error envelope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("credentials rejected or session expired")]
    Unauthorized,
    #[error("administrator privileges required")]
    Forbidden,
    #[error("weekly booking quota exceeded")]
    QuotaExceeded,
    #[error("slot was just taken")]
    SlotTaken,
    #[error("{0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Map a non-2xx response to an `ApiError`. Status codes decide the
/// authentication/authorization variants; the conflict kinds are still only
/// reported as prose by the server, so those two fall back to substring
/// checks on the envelope message (see DESIGN.md, open questions).
fn classify_error(status: u16, message: &str) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        _ if message.contains("Quota exceeded") || message.contains("Maximum 1") => {
            ApiError::QuotaExceeded
        }
        _ if message.contains("taken") => ApiError::SlotTaken,
        400 => ApiError::Validation(message.to_string()),
        _ => ApiError::Server(message.to_string()),
    }
}

async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|envelope| envelope.message().map(str::to_string))
        .unwrap_or(body);
    classify_error(status, &message)
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(error_from(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn expect_ok(response: Response) -> Result<(), ApiError> {
    if !response.ok() {
        return Err(error_from(response).await);
    }
    Ok(())
}

fn network(e: gloo::net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

/// Gateway translating domain operations into authenticated REST calls.
/// Attaches the bearer credential from the session store when present and
/// performs no retries; failures propagate as `ApiError` for UI handling.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(builder: RequestBuilder) -> RequestBuilder {
        match session::access_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    // --- appointments ---

    /// All appointments visible to the caller's role.
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        let response = Self::authorized(Request::get(&self.url("/appointments/")))
            .send()
            .await
            .map_err(network)?;
        parse_json(response).await
    }

    /// Appointments filtered server-side to `available` status.
    pub async fn list_available(&self) -> Result<Vec<Appointment>, ApiError> {
        let response = Self::authorized(Request::get(&self.url("/appointments/?status=available")))
            .send()
            .await
            .map_err(network)?;
        parse_json(response).await
    }

    /// Admin-only bulk creation of `available` slots.
    pub async fn release_batch(&self, slots: &[SlotRelease]) -> Result<(), ApiError> {
        let response = Self::authorized(Request::post(&self.url("/appointments/")))
            .json(slots)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }

    /// Transition one slot from `available` to `scheduled`.
    pub async fn book(&self, id: i64, reason: &str) -> Result<(), ApiError> {
        let path = format!("/appointments/{}/book/", id);
        let response = Self::authorized(Request::patch(&self.url(&path)))
            .json(&BookRequest {
                reason: reason.to_string(),
            })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }

    /// Student-initiated cancellation of an own scheduled/confirmed slot.
    pub async fn cancel(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/appointments/{}/cancel/", id);
        let response = Self::authorized(Request::put(&self.url(&path)))
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }

    /// Admin view, optionally bounded by an inclusive date range.
    pub async fn list_all_admin(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<Appointment>, ApiError> {
        let mut url = self.url("/appointments/admin_list/");
        let mut params = Vec::new();
        if let Some(start) = start_date.filter(|s| !s.is_empty()) {
            params.push(format!("start_date={}", start));
        }
        if let Some(end) = end_date.filter(|s| !s.is_empty()) {
            params.push(format!("end_date={}", end));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }
        let response = Self::authorized(Request::get(&url))
            .send()
            .await
            .map_err(network)?;
        parse_json(response).await
    }

    pub async fn confirm(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("/appointments/{}/confirm/", id);
        let response = Self::authorized(Request::post(&self.url(&path)))
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }

    /// Reject requires a non-empty reason; the server echoes it back to the
    /// student as `rejection_reason`.
    pub async fn reject(&self, id: i64, reason: &str) -> Result<(), ApiError> {
        let path = format!("/appointments/{}/reject/", id);
        let response = Self::authorized(Request::post(&self.url(&path)))
            .json(&RejectRequest {
                reason: reason.to_string(),
            })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }

    // --- auth ---

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response = Request::post(&self.url("/auth/login/"))
            .json(credentials)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        parse_json(response).await
    }

    /// Best-effort server notification; callers swallow the error and clear
    /// local state regardless.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = Self::authorized(Request::post(&self.url("/auth/logout/")))
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        let response = Self::authorized(Request::get(&self.url("/auth/profile/")))
            .send()
            .await
            .map_err(network)?;
        parse_json(response).await
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        let response = Self::authorized(Request::put(&self.url("/auth/change-password/")))
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }

    /// Eligibility probe for the two-step account activation flow.
    pub async fn check_student(&self, student_id: &str) -> Result<(), ApiError> {
        let response = Request::post(&self.url("/auth/check-student/"))
            .json(&CheckStudentRequest {
                student_id: student_id.to_string(),
            })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }

    pub async fn activate(&self, request: &ActivateRequest) -> Result<(), ApiError> {
        let response = Request::post(&self.url("/auth/activate/"))
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }

    pub async fn forgot_password(
        &self,
        student_id: &str,
    ) -> Result<ForgotPasswordResponse, ApiError> {
        let response = Request::post(&self.url("/auth/forgot-password/"))
            .json(&ForgotPasswordRequest {
                student_id: student_id.to_string(),
            })
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        parse_json(response).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        let response = Request::post(&self.url("/auth/reset-password/"))
            .json(request)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        expect_ok(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn status_codes_win_over_message_content() {
        assert_eq!(classify_error(401, "whatever"), ApiError::Unauthorized);
        assert_eq!(classify_error(403, "Quota exceeded"), ApiError::Forbidden);
    }

    #[wasm_bindgen_test]
    fn conflict_kinds_come_from_the_envelope_message() {
        assert_eq!(
            classify_error(400, "Quota exceeded: Maximum 1 booking per week"),
            ApiError::QuotaExceeded
        );
        assert_eq!(classify_error(409, "Maximum 1 slot"), ApiError::QuotaExceeded);
        assert_eq!(
            classify_error(409, "This slot was just taken"),
            ApiError::SlotTaken
        );
    }

    #[wasm_bindgen_test]
    fn remaining_statuses_split_validation_from_server_errors() {
        assert_eq!(
            classify_error(400, "date: invalid format"),
            ApiError::Validation("date: invalid format".to_string())
        );
        assert_eq!(
            classify_error(500, "boom"),
            ApiError::Server("boom".to_string())
        );
    }
}
