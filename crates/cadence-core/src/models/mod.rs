//! Data models for marketing plans.
//!
//! A [`MarketingPlan`] is produced from one [`MarketingInput`] and holds
//! twelve [`WeeklyPlan`]s: week 1 carries a [`PrepPhase`] narrative and
//! weeks 2 to 12 carry [`SocialPost`]s. Display implementations live in
//! [`crate::display::models`].
//!
//! Every model serializes with camelCase field names; this is the layout the
//! store persists and the generation service is asked to produce.
//!
//! # Examples
//!
//! ```rust
//! use cadence_core::models::{MarketingInput, Style};
//!
//! let mut input = MarketingInput::default();
//! assert!(input.validate().is_err());
//!
//! input.set_field("industry", "咖啡廳").unwrap();
//! input.set_field("style", "industrial").unwrap();
//! assert_eq!(input.style, Style::Industrial);
//! assert!(input.validate().is_ok());
//! ```

pub mod choices;
pub mod input;
pub mod plan;
pub mod post;
pub mod session;
pub mod week;


pub use choices::{Audience, MarketingGoal, StrategyFocus, Style};
pub use input::{MarketingInput, DEFAULT_CONTACT_INFO};
pub use plan::{MarketingPlan, PlanId};
pub use post::{Platform, SocialPost};
pub use session::{Identity, View};
pub use week::{PrepPhase, WeeklyPlan};

/// Maximum number of plans kept in history.
pub const HISTORY_CAP: usize = 15;

/// Number of weeks in every generated plan.
pub const WEEKS_PER_PLAN: usize = 12;
