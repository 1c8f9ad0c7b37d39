//! The pricing view model.
//!
//! A sans-IO state machine: the feed asks it for a [`FetchTicket`],
//! performs the network call, and hands the outcome back with the
//! ticket's sequence number. Only the most-recently-issued sequence is
//! accepted, so a slow response can never overwrite a newer one.

use std::sync::Arc;

use chrono::{DateTime, Local, Timelike, Utc};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{PricingPlan, PricingSnapshot};
use crate::money::format_fcfa;
use crate::pricing::derive::{self, Badge, Savings};
use crate::pricing::schedule::next_hour_boundary;

// ── State machine ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Populated,
    Failed,
}

/// Everything the IO layer needs to perform one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonically increasing request id; stale results are rejected.
    pub seq: u64,
    pub at: DateTime<Utc>,
    pub hour_of_day: u32,
}

/// Owns the fetched snapshot and the loading/error state.
///
/// Long-lived while the pricing screen is mounted; there is no terminal
/// state. A failed refresh keeps the previous snapshot -- stale data
/// beats a blanked screen.
#[derive(Debug, Default)]
pub struct PricingEngine {
    phase: Phase,
    snapshot: Option<Arc<PricingSnapshot>>,
    last_issued: u64,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snapshot(&self) -> Option<&Arc<PricingSnapshot>> {
        self.snapshot.as_ref()
    }

    /// Start a refresh: transition to Loading and issue a new ticket.
    pub fn begin_refresh(&mut self, now: DateTime<Local>) -> FetchTicket {
        self.last_issued += 1;
        self.phase = Phase::Loading;

        FetchTicket {
            seq: self.last_issued,
            at: now.with_timezone(&Utc),
            hour_of_day: now.hour(),
        }
    }

    /// Apply a successful fetch. Returns `false` when the result was
    /// stale (a newer ticket has been issued) and was discarded.
    pub fn apply_success(&mut self, seq: u64, snapshot: PricingSnapshot) -> bool {
        if seq != self.last_issued {
            debug!(seq, newest = self.last_issued, "discarding stale pricing response");
            return false;
        }

        self.snapshot = Some(Arc::new(snapshot));
        self.phase = Phase::Populated;
        true
    }

    /// Apply a failed fetch. The previous snapshot, if any, is retained;
    /// the error is logged and absorbed -- it never reaches the screen
    /// as a hard failure. Returns `false` for stale results.
    pub fn apply_failure(&mut self, seq: u64, error: &CoreError) -> bool {
        if seq != self.last_issued {
            debug!(seq, newest = self.last_issued, "discarding stale pricing failure");
            return false;
        }

        warn!(error = %error, "pricing refresh failed; keeping last snapshot");
        self.phase = Phase::Failed;
        true
    }

    /// Project the current state into its presentation-ready form.
    ///
    /// `now` feeds the fallback "next update" display when the server
    /// did not declare one.
    pub fn view(&self, now: DateTime<Local>) -> PricingView {
        let Some(snapshot) = &self.snapshot else {
            // Never-loaded covers Idle, first Loading, and a failure with
            // no prior data: the skeleton persists, errors stay in logs.
            return PricingView::Loading;
        };

        let active = derive::active_plans(snapshot);
        if active.is_empty() {
            return PricingView::Empty;
        }

        let cards = active
            .into_iter()
            .enumerate()
            .map(|(index, plan)| build_card(index, plan, snapshot.unlock_fee))
            .collect();

        let (next_update, server_scheduled) = match snapshot.next_update {
            Some(at) => (at.with_timezone(&Local), true),
            None => (next_hour_boundary(now), false),
        };

        PricingView::Populated(PricingBoard {
            cards,
            rule: snapshot.applied_rule.as_ref().map(|r| r.name.clone()),
            multiplier: snapshot.multiplier,
            unlock_fee: snapshot.unlock_fee,
            next_update,
            server_scheduled,
        })
    }
}

// ── Presentation types ──────────────────────────────────────────────

/// What the pricing screen renders: exactly one of three states.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PricingView {
    /// No snapshot yet -- skeleton placeholder.
    #[default]
    Loading,
    /// Snapshot loaded but zero active plans. Not an error.
    Empty,
    Populated(PricingBoard),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingBoard {
    pub cards: Vec<PlanCard>,
    /// Global dynamic-pricing rule, if one is in effect.
    pub rule: Option<String>,
    pub multiplier: f64,
    pub unlock_fee: u64,
    /// When the displayed tariffs change next. Display only -- the
    /// scheduler keeps its own cadence.
    pub next_update: DateTime<Local>,
    /// Whether `next_update` came from the server rather than being
    /// derived client-side.
    pub server_scheduled: bool,
}

/// One plan, fully derived for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCard {
    /// Stable key: the plan id, or its index when the id is absent.
    pub key: String,
    pub name: String,
    pub hourly_display: String,
    /// Struck-through reference rate; present only alongside `savings`.
    pub original_display: Option<String>,
    pub savings: Option<Savings>,
    pub savings_label: Option<String>,
    pub daily_display: String,
    pub weekly_display: String,
    pub monthly_display: String,
    pub features: Vec<String>,
    /// Per-plan rule annotation.
    pub rule: Option<String>,
    pub badge: Badge,
}

fn build_card(index: usize, plan: &PricingPlan, unlock_fee: u64) -> PlanCard {
    let savings = derive::savings(plan);
    let savings_label = savings
        .map(|s| format!("Économisez {}% ({})", s.percentage, format_fcfa(s.amount)));
    let original_display = savings
        .and_then(|_| plan.original_hourly_rate)
        .map(crate::money::format_grouped);

    PlanCard {
        key: plan
            .id
            .clone()
            .unwrap_or_else(|| format!("plan-{index}")),
        name: plan.name.clone(),
        hourly_display: format_fcfa(plan.hourly_rate),
        original_display,
        savings,
        savings_label,
        daily_display: format_fcfa(plan.daily_rate),
        weekly_display: format_fcfa(plan.weekly_rate),
        monthly_display: format_fcfa(plan.monthly_rate),
        features: derive::features_for(plan, unlock_fee),
        rule: plan.applied_rule.clone(),
        badge: derive::classify(plan),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use crate::model::{DiscountType, Promotion};

    use super::*;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 5, 14, 23, 10).unwrap()
    }

    fn horaire() -> PricingPlan {
        PricingPlan {
            id: Some("plan-hourly".into()),
            name: "Horaire".into(),
            hourly_rate: 500,
            daily_rate: 3500,
            weekly_rate: 18_000,
            monthly_rate: 60_000,
            original_hourly_rate: Some(625),
            minimum_hours: 1,
            is_active: true,
            applied_promotions: Vec::new(),
            applied_rule: None,
        }
    }

    fn snapshot(plans: Vec<PricingPlan>) -> PricingSnapshot {
        PricingSnapshot {
            plans,
            applied_rule: None,
            multiplier: 1.0,
            next_update: None,
            unlock_fee: 100,
        }
    }

    // ── State machine ───────────────────────────────────────────────

    #[test]
    fn refresh_moves_through_loading_to_populated() {
        let mut engine = PricingEngine::new();
        assert_eq!(engine.phase(), Phase::Idle);

        let ticket = engine.begin_refresh(now());
        assert_eq!(engine.phase(), Phase::Loading);
        assert_eq!(ticket.hour_of_day, 14);

        assert!(engine.apply_success(ticket.seq, snapshot(vec![horaire()])));
        assert_eq!(engine.phase(), Phase::Populated);
    }

    #[test]
    fn failure_keeps_previous_snapshot() {
        let mut engine = PricingEngine::new();
        let ticket = engine.begin_refresh(now());
        engine.apply_success(ticket.seq, snapshot(vec![horaire()]));

        let ticket = engine.begin_refresh(now());
        assert!(engine.apply_failure(ticket.seq, &CoreError::Timeout));

        assert_eq!(engine.phase(), Phase::Failed);
        // Stale-but-available: the earlier data is still there and the
        // view still renders it.
        assert!(engine.snapshot().is_some());
        assert!(matches!(engine.view(now()), PricingView::Populated(_)));
    }

    #[test]
    fn failure_with_no_data_stays_on_skeleton() {
        let mut engine = PricingEngine::new();
        let ticket = engine.begin_refresh(now());
        assert!(engine.apply_failure(ticket.seq, &CoreError::Timeout));

        assert_eq!(engine.view(now()), PricingView::Loading);
    }

    // ── Stale-response guard ────────────────────────────────────────

    #[test]
    fn stale_success_is_discarded() {
        let mut engine = PricingEngine::new();

        let ticket_a = engine.begin_refresh(now());
        let ticket_b = engine.begin_refresh(now());

        // B resolves first, then A arrives late.
        assert!(engine.apply_success(ticket_b.seq, snapshot(vec![horaire()])));
        let mut other = horaire();
        other.name = "Périmé".into();
        assert!(!engine.apply_success(ticket_a.seq, snapshot(vec![other])));

        let PricingView::Populated(board) = engine.view(now()) else {
            panic!("expected populated view");
        };
        assert_eq!(board.cards[0].name, "Horaire");
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_success() {
        let mut engine = PricingEngine::new();

        let ticket_a = engine.begin_refresh(now());
        let ticket_b = engine.begin_refresh(now());

        assert!(engine.apply_success(ticket_b.seq, snapshot(vec![horaire()])));
        assert!(!engine.apply_failure(ticket_a.seq, &CoreError::Timeout));

        assert_eq!(engine.phase(), Phase::Populated);
    }

    // ── View projection ─────────────────────────────────────────────

    #[test]
    fn never_loaded_shows_skeleton() {
        let engine = PricingEngine::new();
        assert_eq!(engine.view(now()), PricingView::Loading);
    }

    #[test]
    fn zero_active_plans_is_empty_state() {
        let mut engine = PricingEngine::new();
        let ticket = engine.begin_refresh(now());
        engine.apply_success(ticket.seq, snapshot(Vec::new()));

        assert_eq!(engine.view(now()), PricingView::Empty);
    }

    #[test]
    fn populated_card_carries_derived_labels() {
        let mut engine = PricingEngine::new();
        let ticket = engine.begin_refresh(now());
        engine.apply_success(ticket.seq, snapshot(vec![horaire()]));

        let PricingView::Populated(board) = engine.view(now()) else {
            panic!("expected populated view");
        };
        let card = &board.cards[0];

        assert_eq!(card.hourly_display, "500 FCFA");
        assert_eq!(card.original_display.as_deref(), Some("625"));
        assert_eq!(
            card.savings_label.as_deref(),
            Some("Économisez 20% (125 FCFA)")
        );
        assert_eq!(card.badge, Badge::Popular);
        assert_eq!(card.daily_display, "3 500 FCFA");
    }

    #[test]
    fn promoted_plan_lists_promotion_last_and_wins_badge() {
        let mut plan = horaire();
        plan.applied_promotions.push(Promotion {
            name: "Été".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
        });

        let mut engine = PricingEngine::new();
        let ticket = engine.begin_refresh(now());
        engine.apply_success(ticket.seq, snapshot(vec![plan]));

        let PricingView::Populated(board) = engine.view(now()) else {
            panic!("expected populated view");
        };
        let card = &board.cards[0];

        assert_eq!(card.badge, Badge::Promoted);
        assert_eq!(card.features.last().map(String::as_str), Some("Été : -10%"));
    }

    #[test]
    fn next_update_prefers_server_declared_time() {
        let mut with_server = snapshot(vec![horaire()]);
        with_server.next_update = Some(Utc.with_ymd_and_hms(2026, 8, 5, 18, 30, 0).unwrap());

        let mut engine = PricingEngine::new();
        let ticket = engine.begin_refresh(now());
        engine.apply_success(ticket.seq, with_server);

        let PricingView::Populated(board) = engine.view(now()) else {
            panic!("expected populated view");
        };
        assert!(board.server_scheduled);
        assert_eq!(
            board.next_update.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2026, 8, 5, 18, 30, 0).unwrap()
        );
    }

    #[test]
    fn next_update_falls_back_to_hour_boundary() {
        let mut engine = PricingEngine::new();
        let ticket = engine.begin_refresh(now());
        engine.apply_success(ticket.seq, snapshot(vec![horaire()]));

        let PricingView::Populated(board) = engine.view(now()) else {
            panic!("expected populated view");
        };
        assert!(!board.server_scheduled);
        assert_eq!(
            board.next_update,
            Local.with_ymd_and_hms(2026, 8, 5, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_plan_id_uses_index_key() {
        let mut plan = horaire();
        plan.id = None;

        let mut engine = PricingEngine::new();
        let ticket = engine.begin_refresh(now());
        engine.apply_success(ticket.seq, snapshot(vec![plan]));

        let PricingView::Populated(board) = engine.view(now()) else {
            panic!("expected populated view");
        };
        assert_eq!(board.cards[0].key, "plan-0");
    }
}
