use serde::{Deserialize, Serialize};

/// A bundled health article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u32,
    #[serde(default)]
    pub image: Option<String>,
    pub title: String,
    pub category: String,
    pub publisher_name: String,
    /// Article body, in Markdown
    pub description: String,
}
