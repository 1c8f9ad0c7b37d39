//! The dynamic pricing presentation engine.
//!
//! Flow is strictly one-way: the scheduler triggers a fetch, the engine
//! applies the result, the view projection is published, the screen
//! re-renders. Nothing writes back to the snapshot source.

pub mod derive;
pub mod engine;
pub mod feed;
pub mod schedule;

pub use derive::{Badge, Savings};
pub use engine::{FetchTicket, Phase, PlanCard, PricingBoard, PricingEngine, PricingView};
pub use feed::PricingFeed;
pub use schedule::{Clock, HourBoundaryScheduler, SystemClock, delay_until_next_hour, next_hour_boundary};
