//! Session-level state: who is using the tool and which view is active.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Display name the user logged in with. There is no authentication behind
/// it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

/// Screen the presentation layer should show.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// The configuration form
    #[default]
    Generator,

    /// The current plan
    Dashboard,

    /// Past plans
    History,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Generator => "generator",
            View::Dashboard => "dashboard",
            View::History => "history",
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generator" | "form" => Ok(View::Generator),
            "dashboard" | "plan" => Ok(View::Dashboard),
            "history" => Ok(View::History),
            _ => Err(format!("Invalid view: {s}")),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
