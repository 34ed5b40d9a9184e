//! Strict decoding of the plan returned by the model.
//!
//! The raw text must parse as the response schema, contain a `weeks` array
//! of exactly [`WEEKS_PER_PLAN`] entries numbered 1..=12 in order, and every
//! post comes back with `isCompleted = false` whatever the model wrote.
//! Nothing is repaired: any mismatch fails the whole response.

use log::warn;
use serde::Deserialize;

use super::prompt::forbidden_terms_in;
use crate::{
    error::{CadenceError, Result},
    models::{Platform, PrepPhase, SocialPost, WeeklyPlan, WEEKS_PER_PLAN},
};

#[derive(Debug, Deserialize)]
struct PlanResponse {
    weeks: Option<Vec<WeekResponse>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekResponse {
    week_number: u32,
    start_date: String,
    #[serde(default)]
    prep_phase: Option<PrepResponse>,
    #[serde(default)]
    posts: Vec<PostResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrepResponse {
    #[serde(default)]
    persona: String,
    #[serde(default)]
    brand_positioning: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostResponse {
    platform: Platform,
    content: String,
    image_prompt: String,
    hashtags: Vec<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    day_of_week: Option<String>,
}

impl From<PostResponse> for SocialPost {
    fn from(post: PostResponse) -> Self {
        SocialPost {
            platform: post.platform,
            content: post.content,
            image_prompt: post.image_prompt,
            hashtags: post.hashtags,
            date: post.date.filter(|d| !d.trim().is_empty()),
            day_of_week: post.day_of_week.filter(|d| !d.trim().is_empty()),
            is_completed: false,
        }
    }
}

impl From<WeekResponse> for WeeklyPlan {
    fn from(week: WeekResponse) -> Self {
        WeeklyPlan {
            week_number: week.week_number,
            start_date: week.start_date,
            prep_phase: week.prep_phase.map(|prep| PrepPhase {
                persona: prep.persona,
                brand_positioning: prep.brand_positioning,
            }),
            posts: week.posts.into_iter().map(SocialPost::from).collect(),
        }
    }
}

/// Decodes and validates the model's JSON text into weekly plans.
pub fn decode_weeks(text: &str) -> Result<Vec<WeeklyPlan>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CadenceError::EmptyResponse);
    }

    let response: PlanResponse = serde_json::from_str(text)
        .map_err(|e| CadenceError::malformed(format!("response is not valid plan JSON: {e}")))?;

    let weeks: Vec<WeeklyPlan> = response
        .weeks
        .ok_or_else(|| CadenceError::malformed("response has no 'weeks' field"))?
        .into_iter()
        .map(WeeklyPlan::from)
        .collect();

    validate_weeks(&weeks)?;
    report_content_issues(&weeks);
    Ok(weeks)
}

/// Checks week count and numbering.
pub fn validate_weeks(weeks: &[WeeklyPlan]) -> Result<()> {
    if weeks.len() != WEEKS_PER_PLAN {
        return Err(CadenceError::malformed(format!(
            "expected {WEEKS_PER_PLAN} weeks, got {}",
            weeks.len()
        )));
    }

    for (index, week) in weeks.iter().enumerate() {
        let expected = index as u32 + 1;
        if week.week_number != expected {
            return Err(CadenceError::malformed(format!(
                "week at position {expected} is numbered {}",
                week.week_number
            )));
        }
    }

    Ok(())
}

/// Logs weeks without content and forbidden vocabulary. Content is never
/// rewritten.
fn report_content_issues(weeks: &[WeeklyPlan]) {
    for week in weeks {
        if week.week_number > 1 && week.posts.is_empty() {
            warn!("Week {} came back without posts", week.week_number);
        }
        if week.week_number == 1 && week.prep_phase.is_none() {
            warn!("Week 1 came back without a preparation narrative");
        }

        let texts = week
            .prep_phase
            .iter()
            .flat_map(|prep| [prep.persona.as_str(), prep.brand_positioning.as_str()])
            .chain(week.posts.iter().map(|post| post.content.as_str()));

        for text in texts {
            let hits = forbidden_terms_in(text);
            if !hits.is_empty() {
                warn!(
                    "Week {} mentions forbidden terms: {}",
                    week.week_number,
                    hits.join(", ")
                );
            }
        }
    }
}
