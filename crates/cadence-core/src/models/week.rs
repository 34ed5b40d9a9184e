//! Weekly plan model definition.

use serde::{Deserialize, Serialize};

use super::SocialPost;

/// Strategy narrative produced for the preparation week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrepPhase {
    /// Markdown persona insight table
    pub persona: String,

    /// Brand positioning and value recommendations
    pub brand_positioning: String,
}

/// One week of a plan.
///
/// Week 1 carries a [`PrepPhase`]; weeks 2 to 12 carry posts. Both fields
/// are allowed to be present at once since the response schema does not
/// forbid it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    /// 1-based week number
    pub week_number: u32,

    /// Calendar date the week starts on
    pub start_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_phase: Option<PrepPhase>,

    #[serde(default)]
    pub posts: Vec<SocialPost>,
}

impl WeeklyPlan {
    /// Whether the narrative, rather than the posts, is this week's content.
    pub fn is_prep_week(&self) -> bool {
        self.prep_phase.is_some() && self.posts.is_empty()
    }

    /// Number of completed posts in the week.
    pub fn completed_posts(&self) -> usize {
        self.posts.iter().filter(|post| post.is_completed).count()
    }
}
