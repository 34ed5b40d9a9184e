//! Core library for the Cadence content planner.
//!
//! Cadence turns a short marketing brief ([`MarketingInput`]) into a 12-week
//! social content calendar ([`MarketingPlan`]) using a generative model, and
//! keeps a small history of generated plans with per-post completion
//! tracking.
//!
//! # Layers
//!
//! - [`models`]: plain data types, serialized in camelCase
//! - [`controller`]: the [`Controller`] owning all session state
//! - [`store`]: the persistence seam ([`SqliteStore`], [`MemoryStore`])
//! - [`generation`]: plan and image generation ([`GeminiClient`])
//! - [`display`]: markdown [`std::fmt::Display`] output
//! - [`config`]: TOML file plus environment overrides
//!
//! # Quick Start
//!
//! ```rust
//! use cadence_core::{Config, ControllerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = ControllerBuilder::new()
//!     .with_config(Config::load(None))
//!     .with_data_file(Some("cadence.db"))
//!     .build()
//!     .await?;
//!
//! let mut input = controller.form().await;
//! input.set_field("industry", "咖啡廳")?;
//!
//! let plan = controller.generate_plan(input).await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod db;
pub mod display;
pub mod error;
pub mod generation;
pub mod models;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::Config;
pub use controller::{Controller, ControllerBuilder, Settings};
pub use db::Database;
pub use display::{History, LocalDateTime, OperationStatus};
pub use error::{CadenceError, Remedy, Result, ServiceFailure};
pub use generation::{GeminiClient, GeneratedImage, ImageGenerator, PlanGenerator};
pub use models::{
    Audience, Identity, MarketingGoal, MarketingInput, MarketingPlan, Platform, PlanId, PrepPhase,
    SocialPost, StrategyFocus, Style, View, WeeklyPlan, HISTORY_CAP, WEEKS_PER_PLAN,
};
pub use store::{MemoryStore, SqliteStore, Store, StoreExt, StoreKey};
