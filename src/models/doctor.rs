use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_nullable_string};

/// A doctor as listed by `GET /api/doctors`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub experience: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Doctor {
    /// The qualification line, whichever spelling the backend used.
    pub fn qualification_text(&self) -> Option<&str> {
        self.qualifications
            .as_deref()
            .or(self.qualification.as_deref())
            .filter(|q| !q.is_empty())
    }
}

/// The doctor record returned by `GET /api/doctors/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDetails {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub experience: Option<f64>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
}
