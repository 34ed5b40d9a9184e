#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use cadence_core::{
    Controller, ControllerBuilder, GeneratedImage, ImageGenerator, MarketingInput,
    MarketingPlan, Platform, PlanGenerator, PrepPhase, Result, SocialPost, SqliteStore,
    WeeklyPlan,
};
use tempfile::TempDir;

/// Twelve weeks: a preparation week followed by two posts a week.
pub fn canned_weeks() -> Vec<WeeklyPlan> {
    (1..=12)
        .map(|week_number| WeeklyPlan {
            week_number,
            start_date: format!("2026-W{week_number:02}"),
            prep_phase: (week_number == 1).then(|| PrepPhase {
                persona: "| 背景 | 目標 |".to_string(),
                brand_positioning: "街角的溫暖咖啡".to_string(),
            }),
            posts: if week_number == 1 {
                Vec::new()
            } else {
                [Platform::Facebook, Platform::Instagram]
                    .into_iter()
                    .map(|platform| SocialPost {
                        platform,
                        content: format!("第 {week_number} 週 {platform}"),
                        image_prompt: "pour-over coffee, morning light".to_string(),
                        hashtags: vec!["#咖啡".to_string()],
                        date: None,
                        day_of_week: None,
                        is_completed: false,
                    })
                    .collect()
            },
        })
        .collect()
}

/// Generator that never leaves the process.
pub struct CannedGenerator;

#[async_trait]
impl PlanGenerator for CannedGenerator {
    async fn generate_plan(&self, input: &MarketingInput) -> Result<MarketingPlan> {
        Ok(MarketingPlan::new(input.clone(), canned_weeks()))
    }
}

#[async_trait]
impl ImageGenerator for CannedGenerator {
    async fn generate_image(&self, _prompt: &str) -> Result<GeneratedImage> {
        Ok(GeneratedImage {
            mime_type: "image/png".to_string(),
            data: "iVBORw==".to_string(),
        })
    }
}

/// Helper function to create a controller over a SQLite file in `temp_dir`.
pub async fn open_controller(temp_dir: &TempDir) -> Controller {
    let store = SqliteStore::open(temp_dir.path().join("test.db"))
        .await
        .expect("Failed to open store");
    let generator = Arc::new(CannedGenerator);
    ControllerBuilder::new()
        .with_store(Arc::new(store))
        .with_plan_generator(generator.clone())
        .with_image_generator(generator)
        .build()
        .await
        .expect("Failed to create controller")
}

pub fn input(industry: &str) -> MarketingInput {
    MarketingInput {
        industry: industry.to_string(),
        ..MarketingInput::default()
    }
}
