//! Display formatting for plans, history and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and command feedback go through small wrapper types. All of
//! it is markdown, rendered by the CLI's terminal renderer or written
//! verbatim by `export`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (MarketingPlan) │───▶│ (History, ...)  │───▶│ (terminal/file) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: [`History`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`], [`LocalDate`]
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use cadence_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Logged in as 小明".to_string());
//! assert_eq!(status.to_string(), "Success: Logged in as 小明\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod status;

pub use collections::History;
pub use datetime::{LocalDate, LocalDateTime};
pub use status::OperationStatus;
