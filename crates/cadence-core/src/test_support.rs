//! Fixtures shared by the unit test modules.

use crate::models::{
    MarketingInput, MarketingPlan, Platform, PrepPhase, SocialPost, WeeklyPlan, WEEKS_PER_PLAN,
};

pub(crate) fn sample_input(industry: &str) -> MarketingInput {
    MarketingInput {
        industry: industry.to_string(),
        ..MarketingInput::default()
    }
}

pub(crate) fn sample_post(platform: Platform, week: u32) -> SocialPost {
    SocialPost {
        platform,
        content: format!("Week {week} {platform} post"),
        image_prompt: format!("latte art on a wooden table, week {week}"),
        hashtags: vec!["#coffee".to_string(), "#taipei".to_string()],
        date: None,
        day_of_week: None,
        is_completed: false,
    }
}

pub(crate) fn sample_weeks() -> Vec<WeeklyPlan> {
    (1..=WEEKS_PER_PLAN as u32)
        .map(|week_number| {
            if week_number == 1 {
                WeeklyPlan {
                    week_number,
                    start_date: "2026-10-19".to_string(),
                    prep_phase: Some(PrepPhase {
                        persona: "| 背景 | 目標 |\n|---|---|\n| 上班族 | 提神 |".to_string(),
                        brand_positioning: "Neighbourhood specialty coffee".to_string(),
                    }),
                    posts: Vec::new(),
                }
            } else {
                WeeklyPlan {
                    week_number,
                    start_date: format!("week-{week_number}"),
                    prep_phase: None,
                    posts: vec![
                        sample_post(Platform::Facebook, week_number),
                        sample_post(Platform::Instagram, week_number),
                    ],
                }
            }
        })
        .collect()
}

pub(crate) fn sample_plan(industry: &str) -> MarketingPlan {
    MarketingPlan::new(sample_input(industry), sample_weeks())
}
