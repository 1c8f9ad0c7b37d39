//! `velodash-core` -- domain model and pricing presentation engine.
//!
//! The interesting machinery lives in [`pricing`]: an hour-boundary
//! scheduler, a sequence-guarded view model, and pure derivations from
//! raw rates to plan cards. [`model`] holds the domain types converted
//! from `velodash-api` wire shapes; [`i18n`] and [`money`] are small
//! presentation helpers shared with the TUI.

pub mod config;
pub mod error;
pub mod i18n;
pub mod model;
pub mod money;
pub mod pricing;

pub use config::ServiceConfig;
pub use error::CoreError;
pub use model::{CompanyInfo, PricingPlan, PricingSnapshot, Review, ReviewDraft, Role, Session};
pub use pricing::{PricingFeed, PricingView};
