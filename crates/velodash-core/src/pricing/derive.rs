//! Pure derivations from a pricing snapshot to presentation values.
//!
//! Everything here is a deterministic function of its arguments so the
//! display rules are testable without any rendering or IO.

use crate::model::{DiscountType, PricingPlan, PricingSnapshot, Promotion};
use crate::money::format_fcfa;

/// Plan-name fragments that mark the entry-level hourly tier. The
/// marketing names are French; "hourly" covers the English catalog.
const POPULAR_TOKENS: &[&str] = &["heure", "horaire", "hourly"];

/// Promotional saving on the hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Savings {
    /// Absolute reduction in FCFA.
    pub amount: u64,
    /// Rounded-half-up share of the original rate, 0..=100.
    pub percentage: u32,
}

/// Visual badge for a plan card. Promoted wins over Popular when both
/// would apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Badge {
    #[default]
    Standard,
    Popular,
    Promoted,
}

/// Active plans in source order. Inactive plans never render.
pub fn active_plans(snapshot: &PricingSnapshot) -> Vec<&PricingPlan> {
    snapshot.plans.iter().filter(|p| p.is_active).collect()
}

/// Savings on a plan's hourly rate, if any.
///
/// `None` when no reference rate exists or it does not exceed the
/// current rate. A non-zero amount whose percentage rounds to zero still
/// yields `Some` -- the badge shows "0%" rather than disappearing.
pub fn savings(plan: &PricingPlan) -> Option<Savings> {
    let original = plan.original_hourly_rate?;
    if original <= plan.hourly_rate {
        return None;
    }

    let amount = original - plan.hourly_rate;
    // Round half up in integer arithmetic: floor((200a + o) / 2o).
    let percentage = u32::try_from((200 * amount + original) / (2 * original)).unwrap_or(100);

    Some(Savings { amount, percentage })
}

/// Badge classification for a plan.
pub fn classify(plan: &PricingPlan) -> Badge {
    if !plan.applied_promotions.is_empty() {
        return Badge::Promoted;
    }

    let name = plan.name.to_lowercase();
    if POPULAR_TOKENS.iter().any(|token| name.contains(token)) {
        Badge::Popular
    } else {
        Badge::Standard
    }
}

/// The ordered feature list for a plan card.
///
/// Fixed template lines first (minimum duration, unlock fee, the
/// always-on service lines), then one synthesized line per promotion in
/// list order.
pub fn features_for(plan: &PricingPlan, unlock_fee: u64) -> Vec<String> {
    let mut features = vec![
        format!("Durée minimum : {}h", plan.minimum_hours),
        format!("Déblocage : {}", format_fcfa(unlock_fee)),
        "Vélos disponibles 24h/24".to_owned(),
        "Assistance 7j/7".to_owned(),
        "Application mobile incluse".to_owned(),
    ];

    for promo in &plan.applied_promotions {
        features.push(promotion_line(promo));
    }

    features
}

fn promotion_line(promo: &Promotion) -> String {
    match promo.discount_type {
        DiscountType::Percentage => {
            format!("{} : -{}%", promo.name, format_value(promo.discount_value))
        }
        DiscountType::Fixed => {
            // Fixed discounts are whole francs on the wire.
            let amount = promo.discount_value.max(0.0).round();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let amount = amount as u64;
            format!("{} : -{}", promo.name, format_fcfa(amount))
        }
    }
}

/// Render a discount value without a trailing ".0" for whole numbers.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn plan(name: &str) -> PricingPlan {
        PricingPlan {
            id: Some(name.to_lowercase()),
            name: name.to_owned(),
            hourly_rate: 500,
            daily_rate: 3500,
            weekly_rate: 18_000,
            monthly_rate: 60_000,
            original_hourly_rate: None,
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

    // ── Active filter ───────────────────────────────────────────────

    #[test]
    fn active_filter_preserves_source_order() {
        let mut inactive = plan("Journalier");
        inactive.is_active = false;
        let snap = snapshot(vec![plan("Horaire"), inactive, plan("Mensuel")]);

        let active = active_plans(&snap);

        assert_eq!(active.len(), 2);
        assert_eq!(active[0].name, "Horaire");
        assert_eq!(active[1].name, "Mensuel");
    }

    #[test]
    fn all_inactive_yields_empty_not_error() {
        let mut a = plan("Horaire");
        a.is_active = false;
        let snap = snapshot(vec![a]);

        assert!(active_plans(&snap).is_empty());
    }

    // ── Savings ─────────────────────────────────────────────────────

    #[test]
    fn savings_from_reference_rate() {
        let mut p = plan("Horaire");
        p.original_hourly_rate = Some(625);

        let s = savings(&p).expect("savings expected");
        assert_eq!(s.amount, 125);
        assert_eq!(s.percentage, 20);
    }

    #[test]
    fn no_savings_without_reference_or_when_not_cheaper() {
        let p = plan("Horaire");
        assert_eq!(savings(&p), None);

        let mut equal = plan("Horaire");
        equal.original_hourly_rate = Some(500);
        assert_eq!(savings(&equal), None);

        let mut worse = plan("Horaire");
        worse.original_hourly_rate = Some(400);
        assert_eq!(savings(&worse), None);
    }

    #[test]
    fn savings_percentage_stays_in_range() {
        for (original, current) in [(625, 500), (1000, 999), (1000, 1), (3, 2)] {
            let mut p = plan("Horaire");
            p.hourly_rate = current;
            p.original_hourly_rate = Some(original);

            let s = savings(&p).expect("savings expected");
            assert!(s.amount > 0);
            assert!(s.percentage <= 100, "{original}/{current} -> {}", s.percentage);
        }
    }

    #[test]
    fn percentage_rounds_half_up() {
        // 125 / 1000 = 12.5% → 13.
        let mut p = plan("Horaire");
        p.hourly_rate = 875;
        p.original_hourly_rate = Some(1000);
        assert_eq!(savings(&p).map(|s| s.percentage), Some(13));
    }

    #[test]
    fn tiny_amount_keeps_badge_at_zero_percent() {
        // 1 / 1000 rounds to 0% but the saving is real: still Some.
        let mut p = plan("Horaire");
        p.hourly_rate = 999;
        p.original_hourly_rate = Some(1000);

        let s = savings(&p).expect("badge must not disappear");
        assert_eq!(s.amount, 1);
        assert_eq!(s.percentage, 0);
    }

    // ── Classification ──────────────────────────────────────────────

    #[test]
    fn hourly_names_are_popular() {
        assert_eq!(classify(&plan("Horaire")), Badge::Popular);
        assert_eq!(classify(&plan("Pass HEURE")), Badge::Popular);
        assert_eq!(classify(&plan("Hourly ride")), Badge::Popular);
        assert_eq!(classify(&plan("Mensuel")), Badge::Standard);
    }

    #[test]
    fn promotions_win_over_popular() {
        let mut p = plan("Horaire");
        p.applied_promotions.push(Promotion {
            name: "Été".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
        });

        assert_eq!(classify(&p), Badge::Promoted);
    }

    // ── Feature list ────────────────────────────────────────────────

    #[test]
    fn fixed_lines_precede_promotion_lines() {
        let mut p = plan("Horaire");
        p.minimum_hours = 2;
        p.applied_promotions.push(Promotion {
            name: "Été".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
        });
        p.applied_promotions.push(Promotion {
            name: "Fidélité".into(),
            discount_type: DiscountType::Fixed,
            discount_value: 50.0,
        });

        let features = features_for(&p, 100);

        assert_eq!(features[0], "Durée minimum : 2h");
        assert_eq!(features[1], "Déblocage : 100 FCFA");
        assert_eq!(features[2], "Vélos disponibles 24h/24");
        assert_eq!(features[3], "Assistance 7j/7");
        assert_eq!(features[4], "Application mobile incluse");
        assert_eq!(features[5], "Été : -10%");
        assert_eq!(features[6], "Fidélité : -50 FCFA");
        assert_eq!(features.len(), 7);
    }

    #[test]
    fn no_promotions_means_template_only() {
        let features = features_for(&plan("Mensuel"), 100);
        assert_eq!(features.len(), 5);
    }

    #[test]
    fn fractional_percentage_values_keep_their_fraction() {
        let mut p = plan("Horaire");
        p.applied_promotions.push(Promotion {
            name: "Flash".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 12.5,
        });

        let features = features_for(&p, 0);
        assert_eq!(features.last().map(String::as_str), Some("Flash : -12.5%"));
    }
}
