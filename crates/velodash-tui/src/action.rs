//! All possible UI actions. Actions are the sole mechanism for state
//! mutation in the TUI.

use velodash_core::model::{CompanyInfo, Review, ReviewDraft, Session};
use velodash_core::pricing::PricingView;

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

/// A transient status-bar notice.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

#[allow(dead_code)]
impl Notice {
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NoticeLevel::Warning,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── Data events (from the data bridge) ────────────────────────
    PricingUpdated(PricingView),
    CompanyLoaded(CompanyInfo),
    ReviewsLoaded(Vec<Review>),
    ReviewAccepted(Review),
    LoggedIn(Session),

    // ── Commands (routed to the data bridge) ──────────────────────
    RefreshPricing,
    SubmitReview(ReviewDraft),
    SubmitLogin { username: String, password: String },

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notice),
}
