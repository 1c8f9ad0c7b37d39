//! Pricing domain types.
//!
//! A [`PricingSnapshot`] is one immutable, fully-formed pricing response
//! as of a point in time. Refresh replaces the whole snapshot -- nothing
//! is ever patched in place.

use velodash_api::types::{
    AppliedRuleResponse, DiscountTypeResponse, PlanResponse, PricingResponse, PromotionResponse,
};

/// How a promotion's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountType {
    /// `discount_value` is a percentage in 0..=100.
    Percentage,
    /// `discount_value` is a fixed amount in FCFA.
    Fixed,
}

/// A discrete promotion attached to a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    pub name: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
}

/// A named dynamic-pricing rule in effect for the whole snapshot
/// (e.g., a peak-hour multiplier). Distinct from per-plan promotions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRule {
    pub name: String,
}

/// One tariff tier.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingPlan {
    /// Stable identifier; older snapshots may omit it, in which case the
    /// plan's position is used as a fallback key.
    pub id: Option<String>,
    pub name: String,
    pub hourly_rate: u64,
    pub daily_rate: u64,
    pub weekly_rate: u64,
    pub monthly_rate: u64,
    /// Undiscounted reference rate; present only when a promotion alters
    /// `hourly_rate`.
    pub original_hourly_rate: Option<u64>,
    pub minimum_hours: u32,
    /// Inactive plans are excluded from display entirely.
    pub is_active: bool,
    pub applied_promotions: Vec<Promotion>,
    /// Per-plan dynamic pricing rule currently in effect, if any.
    pub applied_rule: Option<String>,
}

/// The full server response for a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingSnapshot {
    pub plans: Vec<PricingPlan>,
    pub applied_rule: Option<AppliedRule>,
    pub multiplier: f64,
    /// Server-declared time of the next tariff change. When absent the
    /// client derives the next wall-clock hour boundary itself.
    pub next_update: Option<chrono::DateTime<chrono::Utc>>,
    pub unlock_fee: u64,
}

// ── Wire conversions ────────────────────────────────────────────────

impl From<DiscountTypeResponse> for DiscountType {
    fn from(wire: DiscountTypeResponse) -> Self {
        match wire {
            DiscountTypeResponse::Percentage => Self::Percentage,
            DiscountTypeResponse::Fixed => Self::Fixed,
        }
    }
}

impl From<PromotionResponse> for Promotion {
    fn from(wire: PromotionResponse) -> Self {
        Self {
            name: wire.name,
            discount_type: wire.discount_type.into(),
            discount_value: wire.discount_value,
        }
    }
}

impl From<AppliedRuleResponse> for AppliedRule {
    fn from(wire: AppliedRuleResponse) -> Self {
        Self { name: wire.name }
    }
}

impl From<PlanResponse> for PricingPlan {
    fn from(wire: PlanResponse) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            hourly_rate: wire.hourly_rate,
            daily_rate: wire.daily_rate,
            weekly_rate: wire.weekly_rate,
            monthly_rate: wire.monthly_rate,
            original_hourly_rate: wire.original_hourly_rate,
            minimum_hours: wire.minimum_hours,
            is_active: wire.is_active,
            applied_promotions: wire
                .applied_promotions
                .into_iter()
                .map(Promotion::from)
                .collect(),
            applied_rule: wire.applied_rule,
        }
    }
}

impl From<PricingResponse> for PricingSnapshot {
    fn from(wire: PricingResponse) -> Self {
        Self {
            plans: wire.plans.into_iter().map(PricingPlan::from).collect(),
            applied_rule: wire.applied_rule.map(AppliedRule::from),
            multiplier: wire.multiplier,
            next_update: wire.next_update,
            unlock_fee: wire.unlock_fee,
        }
    }
}
