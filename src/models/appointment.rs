use serde::{Deserialize, Serialize};
use std::fmt;

use super::{deserialize_id, deserialize_nullable_string};

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppointmentStatus {
    #[default]
    Confirmed,
    Cancelled,
    Completed,
    /// A status this client does not know about yet
    Other(String),
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Other(s) => s,
        }
    }

    /// Reviews may only be written for completed appointments.
    pub fn accepts_review(&self) -> bool {
        matches!(self, AppointmentStatus::Completed)
    }
}

impl From<&str> for AppointmentStatus {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "confirmed" => AppointmentStatus::Confirmed,
            "cancelled" => AppointmentStatus::Cancelled,
            "completed" => AppointmentStatus::Completed,
            _ => AppointmentStatus::Other(s.to_string()),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .map(|s| AppointmentStatus::from(s.as_str()))
            .unwrap_or_default())
    }
}

/// An entry in a patient's appointment history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub appointment_id: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub doctor_name: String,
    #[serde(default)]
    pub doctor_profile_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub appointment_date: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub appointment_time: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub specialty: String,
}

/// A single appointment from `GET /api/appointments/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub doctor_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub doctor_name: String,
    #[serde(default)]
    pub doctor_profile_image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub specialty: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub appointment_date: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub appointment_time: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(AppointmentStatus::from("confirmed"), AppointmentStatus::Confirmed);
        assert_eq!(AppointmentStatus::from("Completed"), AppointmentStatus::Completed);
        assert_eq!(AppointmentStatus::from("cancelled"), AppointmentStatus::Cancelled);
        assert_eq!(
            AppointmentStatus::from("rescheduled"),
            AppointmentStatus::Other("rescheduled".to_string())
        );
    }

    #[test]
    fn test_only_completed_accepts_review() {
        assert!(AppointmentStatus::Completed.accepts_review());
        assert!(!AppointmentStatus::Confirmed.accepts_review());
        assert!(!AppointmentStatus::Cancelled.accepts_review());
        assert!(!AppointmentStatus::Other("pending".into()).accepts_review());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&AppointmentStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
    }

    #[test]
    fn test_summary_from_profile_payload() {
        let json = r#"{
            "appointmentId": 88,
            "status": "completed",
            "doctorName": "Dr. Osei",
            "doctorProfileImage": null,
            "appointmentDate": "2025-03-02",
            "appointmentTime": "09:00",
            "specialty": "Cardiology"
        }"#;
        let summary: AppointmentSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.appointment_id, "88");
        assert_eq!(summary.status, AppointmentStatus::Completed);
        assert!(summary.doctor_profile_image.is_none());
    }

    #[test]
    fn test_detail_with_reason() {
        let json = r#"{
            "id": "a1",
            "doctorId": "5",
            "doctorName": "Dr. Osei",
            "specialty": "Cardiology",
            "appointmentDate": "2025-03-02T00:00:00.000Z",
            "appointmentTime": "09:00",
            "status": "confirmed",
            "reason": "Checkup"
        }"#;
        let detail: AppointmentDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.doctor_id, "5");
        assert_eq!(detail.reason.as_deref(), Some("Checkup"));
        assert!(!detail.status.accepts_review());
    }
}
