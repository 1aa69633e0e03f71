use serde::{Deserialize, Deserializer, Serialize};

use super::{deserialize_id, deserialize_nullable_string};

/// A bookable interval for a doctor on a date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_id")]
    pub doctor_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub start_time: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub end_time: String,
    #[serde(default, deserialize_with = "deserialize_nullable_bool")]
    pub is_booked: bool,
}

/// Slot detail with doctor information, from `GET /api/time-slots/book/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotBooking {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub start_time: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub end_time: String,
    #[serde(default, deserialize_with = "deserialize_nullable_id")]
    pub doctor_id: String,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub doctor_image: Option<String>,
    #[serde(default)]
    pub doctor_qualifications: Option<String>,
    #[serde(default)]
    pub doctor_specialty: Option<String>,
}

fn deserialize_nullable_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

fn deserialize_nullable_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Id(#[serde(deserialize_with = "deserialize_id")] String);

    Option::<Id>::deserialize(deserializer).map(|opt| opt.map(|id| id.0).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_null_is_booked_means_free() {
        let json = r#"{"id":17,"doctorId":5,"date":"2025-03-02","startTime":"09:00","endTime":"09:30","isBooked":null}"#;
        let slot: TimeSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.id, "17");
        assert_eq!(slot.doctor_id, "5");
        assert!(!slot.is_booked);
    }

    #[test]
    fn test_slot_booked() {
        let json = r#"{"id":"1","doctorId":"5","date":"2025-03-02","startTime":"09:00","endTime":"09:30","isBooked":true}"#;
        let slot: TimeSlot = serde_json::from_str(json).unwrap();
        assert!(slot.is_booked);
    }

    #[test]
    fn test_slot_booking_nullable_doctor_fields() {
        let json = r#"{
            "id":"17","date":"2025-03-02","startTime":"09:00","endTime":"09:30",
            "doctorId":"5","doctorName":null,"doctorImage":null,
            "doctorQualifications":"MBBS","doctorSpecialty":null
        }"#;
        let booking: SlotBooking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.doctor_id, "5");
        assert!(booking.doctor_name.is_none());
        assert_eq!(booking.doctor_qualifications.as_deref(), Some("MBBS"));
    }
}
