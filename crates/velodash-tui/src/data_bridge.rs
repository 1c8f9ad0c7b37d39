//! Data bridge -- connects the service client and pricing feed to TUI
//! actions.
//!
//! Runs as a background task: starts the pricing feed, performs the
//! one-shot collaborator fetches (company, reviews), then loops
//! forwarding every pricing view change and command result as an
//! [`Action`] through the TUI's action channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use velodash_api::RentalClient;
use velodash_core::model::{CompanyInfo, Review, ReviewDraft, Session};
use velodash_core::pricing::PricingFeed;

use crate::action::{Action, Notice};

/// Commands the screens route through the bridge. Each resolves into
/// one or more follow-up actions.
#[derive(Debug, Clone)]
pub enum BridgeCommand {
    RefreshPricing,
    FetchReviews,
    SubmitReview(ReviewDraft),
    Login { username: String, password: String },
}

/// Spawn the data bridge task.
///
/// Shuts down cleanly on cancellation: the pricing feed is stopped
/// (scheduler cancelled, in-flight fetch dropped) before the task exits.
pub async fn spawn_data_bridge(
    client: Arc<RentalClient>,
    feed: PricingFeed,
    action_tx: mpsc::UnboundedSender<Action>,
    mut cmd_rx: mpsc::UnboundedReceiver<BridgeCommand>,
    cancel: CancellationToken,
) {
    feed.start().await;
    let mut views = feed.subscribe();

    // Push the current projection so the pricing screen has a state
    // before the first change notification.
    let _ = action_tx.send(Action::PricingUpdated(views.borrow_and_update().clone()));

    // One-shot collaborator fetches for the landing and reviews screens.
    fetch_company(&client, &action_tx).await;
    fetch_reviews(&client, &action_tx).await;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                let _ = action_tx.send(Action::PricingUpdated(view));
            }

            Some(cmd) = cmd_rx.recv() => {
                handle_command(cmd, &client, &feed, &action_tx).await;
            }
        }
    }

    feed.stop().await;
    debug!("data bridge shut down");
}

async fn handle_command(
    cmd: BridgeCommand,
    client: &RentalClient,
    feed: &PricingFeed,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    match cmd {
        BridgeCommand::RefreshPricing => {
            feed.refresh().await;
        }

        BridgeCommand::FetchReviews => {
            fetch_reviews(client, action_tx).await;
        }

        BridgeCommand::SubmitReview(draft) => {
            let body = velodash_api::types::ReviewCreate::from(&draft);
            match client.submit_review(&body).await {
                Ok(created) => {
                    let _ = action_tx.send(Action::ReviewAccepted(Review::from(created)));
                }
                Err(e) => {
                    warn!(error = %e, "review submission failed");
                    let _ = action_tx.send(Action::Notify(Notice::warning(
                        "L'envoi de l'avis a échoué, réessayez plus tard",
                    )));
                }
            }
        }

        BridgeCommand::Login { username, password } => {
            match client.login(&username, &password).await {
                Ok(session) => {
                    let _ = action_tx.send(Action::LoggedIn(Session::from(session)));
                }
                Err(e) => {
                    warn!(error = %e, "login failed");
                    let _ = action_tx.send(Action::Notify(Notice::warning(
                        "Connexion refusée, vérifiez vos identifiants",
                    )));
                }
            }
        }
    }
}

/// Company branding is decorative: a failure is logged and the landing
/// screen keeps its fallback copy.
async fn fetch_company(client: &RentalClient, action_tx: &mpsc::UnboundedSender<Action>) {
    match client.company_info().await {
        Ok(company) => {
            let _ = action_tx.send(Action::CompanyLoaded(CompanyInfo::from(company)));
        }
        Err(e) => warn!(error = %e, "company info fetch failed"),
    }
}

async fn fetch_reviews(client: &RentalClient, action_tx: &mpsc::UnboundedSender<Action>) {
    match client.list_reviews().await {
        Ok(reviews) => {
            let reviews: Vec<Review> = reviews.into_iter().map(Review::from).collect();
            let _ = action_tx.send(Action::ReviewsLoaded(reviews));
        }
        Err(e) => warn!(error = %e, "reviews fetch failed"),
    }
}
