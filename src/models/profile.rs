use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_nullable_string};

/// The signed-in patient's profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl UserProfile {
    /// Upper-cased first letter of the name, used as an avatar.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}
