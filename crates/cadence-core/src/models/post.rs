//! Social post model definition.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Channel a post is written for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Facebook
    #[serde(rename = "FB")]
    Facebook,

    /// Instagram
    #[serde(rename = "IG")]
    Instagram,
}

impl Platform {
    /// Wire value used in the response schema and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "FB",
            Platform::Instagram => "IG",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fb" | "facebook" => Ok(Platform::Facebook),
            "ig" | "instagram" => Ok(Platform::Instagram),
            _ => Err(format!("Invalid platform: {s}")),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated social update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub platform: Platform,

    /// Post body, ending with the contact call-to-action
    pub content: String,

    /// Short description used to synthesize the post's visual
    pub image_prompt: String,

    #[serde(default)]
    pub hashtags: Vec<String>,

    /// Publication date, when the model provided one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Weekday label, when the model provided one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,

    /// Local completion flag; never sent to or taken from the model
    #[serde(default)]
    pub is_completed: bool,
}

impl SocialPost {
    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.is_completed = !self.is_completed;
        self.is_completed
    }
}
