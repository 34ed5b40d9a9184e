//! Marketing plan model definition.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{MarketingInput, SocialPost, WeeklyPlan};

/// Opaque identifier assigned to each generated plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    /// Creates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PlanId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlanId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A complete 12-week generation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketingPlan {
    /// Unique identifier for the plan
    pub id: PlanId,

    /// When the plan was generated (UTC)
    pub timestamp: Timestamp,

    /// The input that produced the plan
    pub input: MarketingInput,

    /// Weeks in order, starting at week 1
    pub weeks: Vec<WeeklyPlan>,
}

impl MarketingPlan {
    /// Wraps freshly generated weeks with a new id and timestamp.
    pub fn new(input: MarketingInput, weeks: Vec<WeeklyPlan>) -> Self {
        Self {
            id: PlanId::generate(),
            timestamp: Timestamp::now(),
            input,
            weeks,
        }
    }

    /// Title shown in history lists.
    pub fn title(&self) -> &str {
        self.input.display_name()
    }

    /// Looks up a post by 0-based week and post index.
    pub fn post(&self, week_index: usize, post_index: usize) -> Option<&SocialPost> {
        self.weeks.get(week_index)?.posts.get(post_index)
    }

    pub(crate) fn post_mut(&mut self, week_index: usize, post_index: usize) -> Option<&mut SocialPost> {
        self.weeks.get_mut(week_index)?.posts.get_mut(post_index)
    }

    /// Completed and total post counts across all weeks.
    pub fn completion(&self) -> (usize, usize) {
        self.weeks.iter().fold((0, 0), |(done, total), week| {
            (done + week.completed_posts(), total + week.posts.len())
        })
    }
}
