//! Pricing screen -- the dynamic tariff grid.
//!
//! Renders exactly one of three states from the engine's projection:
//! a loading skeleton (no data yet), an explicit empty message (zero
//! active plans), or the populated card grid. Fetch failures never
//! surface here; the feed keeps the last good view.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tokio::sync::mpsc::UnboundedSender;

use velodash_core::i18n::Translator;
use velodash_core::money::format_fcfa;
use velodash_core::pricing::{Badge, PlanCard, PricingBoard, PricingView};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

/// Pricing screen state.
pub struct PricingScreen {
    focused: bool,
    translator: Translator,
    view: PricingView,
    /// Index of the highlighted card in the populated grid.
    selected: usize,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl PricingScreen {
    pub fn new(translator: Translator) -> Self {
        Self {
            focused: false,
            translator,
            view: PricingView::Loading,
            selected: 0,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn card_count(&self) -> usize {
        match &self.view {
            PricingView::Populated(board) => board.cards.len(),
            _ => 0,
        }
    }

    // ── State renderers ─────────────────────────────────────────────

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let throbber = throbber_widgets_tui::Throbber::default()
            .label(self.translator.t("pricing.loading"))
            .style(theme::muted())
            .throbber_style(theme::title_style())
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
            .use_type(throbber_widgets_tui::WhichUse::Spin);

        let centered = center_line(area);
        let mut state = self.throbber_state.clone();
        frame.render_stateful_widget(throbber, centered, &mut state);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let message = Paragraph::new(self.translator.t("pricing.empty"))
            .style(theme::muted())
            .alignment(Alignment::Center);
        frame.render_widget(message, center_line(area));
    }

    fn render_populated(&self, frame: &mut Frame, area: Rect, board: &PricingBoard) {
        let layout = Layout::vertical([
            Constraint::Length(2), // header strip
            Constraint::Min(10),   // card grid
        ])
        .split(area);

        self.render_header(frame, layout[0], board);
        self.render_cards(frame, layout[1], board);
    }

    /// Global rule, unlock fee, and "next update" strip above the grid.
    fn render_header(&self, frame: &mut Frame, area: Rect, board: &PricingBoard) {
        let mut spans = vec![Span::styled(
            format!(
                " {} : {}",
                self.translator.t("pricing.unlock_fee"),
                format_fcfa(board.unlock_fee)
            ),
            theme::body(),
        )];

        if let Some(ref rule) = board.rule {
            spans.push(Span::styled("  │  ", theme::muted()));
            spans.push(Span::styled(
                format!("{rule} ×{:.2}", board.multiplier),
                theme::savings_style(),
            ));
        }

        spans.push(Span::styled("  │  ", theme::muted()));
        spans.push(Span::styled(
            format!(
                "{} {}",
                self.translator.t("pricing.next_update"),
                board.next_update.format("%H:%M")
            ),
            theme::muted(),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, board: &PricingBoard) {
        if board.cards.is_empty() {
            return;
        }

        // Evenly split the row; narrow terminals collapse to the
        // selected card only.
        let per_card = area.width / u16::try_from(board.cards.len()).unwrap_or(1).max(1);
        if per_card < 26 {
            if let Some(card) = board.cards.get(self.selected) {
                self.render_card(frame, area, card, true);
            }
            return;
        }

        let constraints =
            vec![Constraint::Ratio(1, u32::try_from(board.cards.len()).unwrap_or(1)); board.cards.len()];
        let columns = Layout::horizontal(constraints).split(area);

        for (i, card) in board.cards.iter().enumerate() {
            self.render_card(frame, columns[i], card, i == self.selected);
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, card: &PlanCard, selected: bool) {
        let border_style = if card.badge == Badge::Promoted {
            theme::savings_style()
        } else if selected && self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };

        let badge_span = match card.badge {
            Badge::Promoted => Span::styled(
                format!(" {} ", self.translator.t("pricing.promoted")),
                theme::badge_promoted(),
            ),
            Badge::Popular => Span::styled(
                format!(" {} ", self.translator.t("pricing.popular")),
                theme::badge_popular(),
            ),
            Badge::Standard => Span::raw(""),
        };

        let title = Line::from(vec![
            Span::styled(format!(" {} ", card.name), theme::title_style()),
            badge_span,
        ]);

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from("")];

        // Current rate, struck-through reference rate when discounted.
        let mut price_spans = vec![Span::styled(card.hourly_display.clone(), theme::price_style())];
        if let Some(ref original) = card.original_display {
            price_spans.push(Span::raw("  "));
            price_spans.push(Span::styled(original.clone(), theme::strike_style()));
        }
        price_spans.push(Span::styled(
            self.translator.t("pricing.per_hour").to_owned(),
            theme::muted(),
        ));
        lines.push(Line::from(price_spans));

        if let Some(ref label) = card.savings_label {
            lines.push(Line::from(Span::styled(label.clone(), theme::savings_style())));
        }

        lines.push(Line::from(""));
        for (key, value) in [
            ("pricing.day", &card.daily_display),
            ("pricing.week", &card.weekly_display),
            ("pricing.month", &card.monthly_display),
        ] {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", self.translator.t(key)), theme::muted()),
                Span::styled(value.clone(), theme::body()),
            ]));
        }

        lines.push(Line::from(""));
        for feature in &card.features {
            lines.push(Line::from(Span::styled(
                format!("• {feature}"),
                theme::body(),
            )));
        }

        if let Some(ref rule) = card.rule {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("⚡ {rule}"),
                theme::muted(),
            )));
        }

        let cta_key = if card.badge == Badge::Promoted {
            "pricing.cta_promoted"
        } else {
            "pricing.cta"
        };
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                format!("[ {} ]", self.translator.t(cta_key)),
                if card.badge == Badge::Promoted {
                    theme::badge_promoted()
                } else {
                    theme::tab_active()
                },
            ))
            .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl Component for PricingScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let max = self.card_count().saturating_sub(1);
                self.selected = (self.selected + 1).min(max);
            }
            KeyCode::Char('r') => return Ok(Some(Action::RefreshPricing)),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PricingUpdated(view) => {
                self.view = view.clone();
                let max = self.card_count().saturating_sub(1);
                self.selected = self.selected.min(max);
            }
            Action::Tick => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.translator.t("pricing.title")),
                theme::title_style(),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.view {
            PricingView::Loading => self.render_loading(frame, inner),
            PricingView::Empty => self.render_empty(frame, inner),
            PricingView::Populated(board) => self.render_populated(frame, inner, board),
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Pricing"
    }
}

/// A one-line rect vertically centered in `area`.
fn center_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x + 2, y, area.width.saturating_sub(4), 1)
}
