//! Read models returned by the MediCare backend, and the request bodies
//! sent to it.
//!
//! Models are passed through verbatim. Identifiers are strings; ids that
//! arrive as JSON numbers are normalised to strings on the way in.

mod appointment;
mod blog;
mod doctor;
mod profile;
mod requests;
mod slot;
mod specialty;

pub use appointment::{AppointmentDetail, AppointmentStatus, AppointmentSummary};
pub use blog::BlogPost;
pub use doctor::{Doctor, DoctorDetails};
pub use profile::UserProfile;
pub use requests::{
    CreateAppointmentRequest, CreateReviewRequest, LoginRequest, MarkSlotBookedRequest,
    OAuthExchangeRequest, SignupRequest, TokenResponse,
};
pub use slot::{SlotBooking, TimeSlot};
pub use specialty::{Specialty, SpecialtyDoctor};

use serde::{Deserialize, Deserializer};

/// Helper to deserialize id as either string or integer
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E>(self, value: &str) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<String, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Helper to deserialize nullable strings as empty string
/// Handles both missing fields and explicit null values
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_nullable_string")]
        name: String,
    }

    #[test]
    fn test_deserialize_id_from_string_and_number() {
        let a: WithId = serde_json::from_str(r#"{"id":"17","name":"x"}"#).unwrap();
        let b: WithId = serde_json::from_str(r#"{"id":17,"name":"x"}"#).unwrap();
        assert_eq!(a.id, "17");
        assert_eq!(b.id, "17");
    }

    #[test]
    fn test_nullable_string() {
        let a: WithId = serde_json::from_str(r#"{"id":"1","name":null}"#).unwrap();
        let b: WithId = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert_eq!(a.name, "");
        assert_eq!(b.name, "");
    }

    #[test]
    fn test_deserialize_id_rejects_objects() {
        let result = serde_json::from_str::<WithId>(r#"{"id":{"nested":1}}"#);
        assert!(result.is_err());
    }
}
