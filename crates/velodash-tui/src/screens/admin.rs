//! Administrative shell -- visible to staff roles only.
//!
//! A thin overview: who is signed in, what the live tariff board looks
//! like from the service's side. Management operations live in the web
//! back-office; this screen is read-only.

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;

use velodash_core::model::{Role, Session};
use velodash_core::pricing::PricingView;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct AdminScreen {
    focused: bool,
    session: Option<Session>,
    pricing: PricingView,
}

impl AdminScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            session: None,
            pricing: PricingView::Loading,
        }
    }

    fn pricing_lines(&self) -> Vec<Line<'_>> {
        match &self.pricing {
            PricingView::Loading => vec![Line::from(Span::styled(
                "  Tarifs : chargement…",
                theme::muted(),
            ))],
            PricingView::Empty => vec![Line::from(Span::styled(
                "  Tarifs : aucune formule active",
                theme::muted(),
            ))],
            PricingView::Populated(board) => {
                let mut lines = vec![Line::from(Span::styled(
                    format!("  Formules actives : {}", board.cards.len()),
                    theme::body(),
                ))];
                if let Some(ref rule) = board.rule {
                    lines.push(Line::from(Span::styled(
                        format!("  Règle en vigueur : {rule} (×{:.2})", board.multiplier),
                        theme::body(),
                    )));
                }
                lines.push(Line::from(Span::styled(
                    format!(
                        "  Prochain changement : {}{}",
                        board.next_update.format("%H:%M"),
                        if board.server_scheduled {
                            " (annoncé par le serveur)"
                        } else {
                            " (heure pleine)"
                        }
                    ),
                    theme::muted(),
                )));
                lines
            }
        }
    }
}

impl Component for AdminScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::LoggedIn(session) => self.session = Some(session.clone()),
            Action::PricingUpdated(view) => self.pricing = view.clone(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(" Administration ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from("")];

        match &self.session {
            Some(session) => {
                let role = match session.role {
                    Role::Admin => "administrateur",
                    Role::Staff => "équipe",
                    Role::Visitor => "visiteur",
                };
                lines.push(Line::from(vec![
                    Span::styled("  Session : ", theme::muted()),
                    Span::styled(
                        session.display_name.clone().unwrap_or_else(|| "—".into()),
                        theme::body(),
                    ),
                    Span::styled(format!(" ({role})"), theme::muted()),
                ]));
            }
            None => lines.push(Line::from(Span::styled(
                "  Aucune session active",
                theme::muted(),
            ))),
        }

        lines.push(Line::from(""));
        lines.extend(self.pricing_lines());

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Admin"
    }
}
