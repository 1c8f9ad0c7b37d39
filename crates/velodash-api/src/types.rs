//! Wire types for the rental service API.
//!
//! Field names mirror the service's JSON (camelCase). These are transport
//! shapes only -- `velodash-core` converts them into domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Pricing ─────────────────────────────────────────────────────────

/// One tariff tier as served by `/api/pricing/calculate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Stable identifier; older snapshots may omit it.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub hourly_rate: u64,
    #[serde(default)]
    pub daily_rate: u64,
    #[serde(default)]
    pub weekly_rate: u64,
    #[serde(default)]
    pub monthly_rate: u64,
    /// Undiscounted reference rate; present only when a promotion
    /// alters `hourly_rate`.
    #[serde(default)]
    pub original_hourly_rate: Option<u64>,
    #[serde(default = "default_minimum_hours")]
    pub minimum_hours: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub applied_promotions: Vec<PromotionResponse>,
    #[serde(default)]
    pub applied_rule: Option<String>,
}

fn default_minimum_hours() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// A discrete promotion attached to a plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionResponse {
    pub name: String,
    pub discount_type: DiscountTypeResponse,
    #[serde(default)]
    pub discount_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountTypeResponse {
    Percentage,
    Fixed,
}

/// A named dynamic-pricing rule in effect for the whole snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedRuleResponse {
    pub name: String,
}

/// Full pricing snapshot for a point in time.
///
/// A malformed or partial body (missing `plans`) deserializes to an
/// empty plan list rather than failing -- the UI treats that as the
/// Empty state, not an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    #[serde(default)]
    pub plans: Vec<PlanResponse>,
    #[serde(default)]
    pub applied_rule: Option<AppliedRuleResponse>,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Server-declared time of the next tariff change, if known.
    #[serde(default)]
    pub next_update: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unlock_fee: u64,
}

fn default_multiplier() -> f64 {
    1.0
}

// ── Company ─────────────────────────────────────────────────────────

/// Branding fields for the landing screen.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub name: String,
    #[serde(default)]
    pub slogan: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// ── Reviews ─────────────────────────────────────────────────────────

/// A published customer review.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub author: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for submitting a new review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreate {
    pub author: String,
    pub rating: u8,
    pub comment: String,
}

// ── Authentication ──────────────────────────────────────────────────

/// Credential submission body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Session issued on successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub role: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
