//! Domain model -- the types screens and the pricing engine work with.
//!
//! Wire shapes from `velodash-api` are converted here and never leak
//! further up.

mod company;
mod pricing;
mod review;
mod session;

pub use company::CompanyInfo;
pub use pricing::{AppliedRule, DiscountType, PricingPlan, PricingSnapshot, Promotion};
pub use review::{Review, ReviewDraft};
pub use session::{Role, Session};
