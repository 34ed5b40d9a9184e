//! Application state controller.
//!
//! The [`Controller`] owns the in-memory session (identity, form memo, plan
//! history, current plan, active view, usage counter) and is the only place
//! that changes it. Every mutation that matters across restarts is written
//! through the injected [`Store`]; generation goes through the injected
//! [`PlanGenerator`] and [`ImageGenerator`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Presentation   │    │   Controller    │───▶│      Store      │
//! │   (CLI, ...)    │───▶│ session_ops,    │    └─────────────────┘
//! │                 │    │ plan_ops        │    ┌─────────────────┐
//! └─────────────────┘    └─────────────────┘───▶│   Generators    │
//!                                               └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: wires store, generators and settings, then rehydrates
//! - `session_ops`: login, logout, form memo and view handling
//! - `plan_ops`: generation, completion toggling, history navigation, images
//! - `rehydrate`: best-effort restore of the session from the store
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cadence_core::{ControllerBuilder, MemoryStore, View};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = ControllerBuilder::new()
//!     .with_store(Arc::new(MemoryStore::new()))
//!     .build()
//!     .await?;
//!
//! controller.login("小明").await?;
//! let mut form = controller.form().await;
//! form.industry = "咖啡廳".to_string();
//! controller.update_form(form.clone()).await?;
//!
//! let plan = controller.generate_plan(form).await?;
//! assert_eq!(controller.view().await, View::Dashboard);
//! controller.toggle_completion(1, 0).await?;
//! # let _ = plan;
//! # Ok(())
//! # }
//! ```

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::{CadenceError, Result},
    generation::{ImageGenerator, PlanGenerator},
    models::{Identity, MarketingInput, MarketingPlan, View, HISTORY_CAP},
    store::Store,
};

pub mod builder;
mod plan_ops;
mod rehydrate;
mod session_ops;


pub use builder::ControllerBuilder;

/// Limits applied by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Maximum number of plans kept in history
    pub history_cap: usize,
    /// Maximum number of generations; `None` means unlimited
    pub usage_quota: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_cap: HISTORY_CAP,
            usage_quota: None,
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            history_cap: config.history_cap.max(1),
            usage_quota: config.usage_quota,
        }
    }
}

/// In-memory application state.
#[derive(Debug, Clone, Default)]
pub(crate) struct Session {
    pub(crate) user: Option<Identity>,
    pub(crate) form: MarketingInput,
    /// Most recent first
    pub(crate) history: Vec<MarketingPlan>,
    pub(crate) current: Option<MarketingPlan>,
    pub(crate) view: View,
    pub(crate) usage: u32,
}

/// Central coordinator between presentation, storage and generation.
pub struct Controller {
    store: Arc<dyn Store>,
    plan_generator: Arc<dyn PlanGenerator>,
    image_generator: Arc<dyn ImageGenerator>,
    settings: Settings,
    session: Mutex<Session>,
    loading: AtomicBool,
}

impl Controller {
    pub(crate) fn new(
        store: Arc<dyn Store>,
        plan_generator: Arc<dyn PlanGenerator>,
        image_generator: Arc<dyn ImageGenerator>,
        settings: Settings,
        session: Session,
    ) -> Self {
        Self {
            store,
            plan_generator,
            image_generator,
            settings,
            session: Mutex::new(session),
            loading: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a plan generation is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

/// Holds the loading flag for the lifetime of one generation.
///
/// Dropping the guard clears the flag, which also covers a generation
/// future that is dropped before it completes.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| CadenceError::GenerationInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
