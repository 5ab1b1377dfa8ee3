use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of an appointment slot.
///
/// A slot is created as `Available` by an administrator, becomes `Scheduled`
/// when a student books it, and is then either `Confirmed` or `Cancelled` by
/// an administrator. `Completed` is set server-side after the meeting took
/// place. Cancelled slots are terminal and never return to the bookable pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Available,
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Whether a student may still revoke this appointment.
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed)
    }

    /// Whether an administrator may confirm this appointment.
    pub fn can_confirm(&self) -> bool {
        matches!(self, Self::Scheduled)
    }

    /// Whether an administrator may reject this appointment.
    pub fn can_reject(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed)
    }

    /// Whether a student may book this slot.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Available => "Available",
            Self::Scheduled => "Scheduled",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        };
        write!(f, "{}", label)
    }
}

/// One bookable (date, time) unit as exposed by the appointments API.
///
/// Identity is `id`; `(date, time_slot)` is unique among non-cancelled
/// records, enforced server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    /// Half-hour label; the server may store a longer `HH:MM:SS` form
    pub time_slot: String,
    pub status: AppointmentStatus,
    /// Consultation subject supplied by the student at booking time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Set when an administrator rejects the booking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_email: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Appointment {
    /// Calendar day as a typed date; `None` when the server sent a
    /// malformed day string.
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Chronological sort key: calendar day first, then the time label
    /// (half-hour labels are zero-padded, so lexical order is time order).
    pub fn chronological_key(&self) -> (Option<NaiveDate>, String) {
        (self.date_naive(), self.time_slot.clone())
    }
}

/// One element of an administrator batch release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRelease {
    pub date: String,
    pub time_slot: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRequest {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// Authenticated identity as cached client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl UserProfile {
    /// Display name falling back to the student ID.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => &self.student_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
}

/// Token pair plus identity returned by `/auth/login/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckStudentRequest {
    pub student_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivateRequest {
    pub student_id: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub student_id: String,
}

/// Response to a forgot-password request; `email` is a masked hint
/// (e.g. `b1****@mail.example.edu`), never the full address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub uidb64: String,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    pub new_password: String,
}

/// Loose error envelope the API uses for non-2xx responses. Either field may
/// be present depending on the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    /// The server's message, whichever field carried it.
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().or(self.detail.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrips_lowercase_wire_form() {
        let json = serde_json::to_string(&AppointmentStatus::Scheduled).unwrap();
        assert_eq!(json, "\"scheduled\"");
        let back: AppointmentStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(back, AppointmentStatus::Confirmed);
    }

    #[test]
    fn action_gates_follow_lifecycle() {
        assert!(AppointmentStatus::Scheduled.can_cancel());
        assert!(AppointmentStatus::Confirmed.can_cancel());
        assert!(!AppointmentStatus::Cancelled.can_cancel());
        assert!(!AppointmentStatus::Completed.can_cancel());

        assert!(AppointmentStatus::Scheduled.can_confirm());
        assert!(!AppointmentStatus::Confirmed.can_confirm());

        assert!(AppointmentStatus::Scheduled.can_reject());
        assert!(AppointmentStatus::Confirmed.can_reject());
        assert!(!AppointmentStatus::Available.can_reject());

        assert!(AppointmentStatus::Available.is_bookable());
        assert!(!AppointmentStatus::Scheduled.is_bookable());
    }

    #[test]
    fn appointment_deserializes_with_optional_fields_absent() {
        let json = r#"{
            "id": 42,
            "date": "2025-03-10",
            "time_slot": "09:30:00",
            "status": "available"
        }"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.id, 42);
        assert_eq!(appt.time_slot, "09:30:00");
        assert!(appt.reason.is_none());
        assert!(appt.student_id.is_none());
        assert_eq!(appt.status, AppointmentStatus::Available);
    }

    #[test]
    fn chronological_key_orders_by_day_then_time() {
        let json = |id: i64, date: &str, time: &str| -> Appointment {
            serde_json::from_str(&format!(
                r#"{{"id": {}, "date": "{}", "time_slot": "{}", "status": "scheduled"}}"#,
                id, date, time
            ))
            .unwrap()
        };
        let mut records = vec![
            json(1, "2025-03-11", "09:00"),
            json(2, "2025-03-10", "17:30"),
            json(3, "2025-03-10", "09:30"),
        ];
        records.sort_by_key(|a| a.chronological_key());
        let ids: Vec<i64> = records.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn date_naive_rejects_malformed_days() {
        let appt: Appointment = serde_json::from_str(
            r#"{"id": 1, "date": "not-a-date", "time_slot": "09:00", "status": "available"}"#,
        )
        .unwrap();
        assert!(appt.date_naive().is_none());
    }

    #[test]
    fn error_body_prefers_error_over_detail() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error": "Slot already taken", "detail": "conflict"}"#)
                .unwrap();
        assert_eq!(body.message(), Some("Slot already taken"));

        let detail_only: ApiErrorBody =
            serde_json::from_str(r#"{"detail": "Not found"}"#).unwrap();
        assert_eq!(detail_only.message(), Some("Not found"));
    }

    #[test]
    fn display_name_falls_back_to_student_id() {
        let user = UserProfile {
            student_id: "B11209000".to_string(),
            name: None,
            email: None,
            is_staff: false,
            is_superuser: false,
        };
        assert_eq!(user.display_name(), "B11209000");
    }
}
