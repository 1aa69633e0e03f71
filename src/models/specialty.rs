use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_nullable_string};

/// A medical specialty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specialty {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub specialty: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// A doctor as listed under a specialty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyDoctor {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub years_experience: Option<f64>,
    #[serde(default)]
    pub qualifications: Option<String>,
}
