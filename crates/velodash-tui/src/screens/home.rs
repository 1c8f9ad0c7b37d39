//! Landing screen -- hero block and company contact details.
//!
//! Purely decorative: everything renders from the one-shot company
//! fetch, with fallback copy until (or in case) it arrives.

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tokio::sync::mpsc::UnboundedSender;

use velodash_core::i18n::Translator;
use velodash_core::model::CompanyInfo;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const FALLBACK_NAME: &str = "Velocité";
const FALLBACK_SLOGAN: &str = "La ville à vélo, à votre rythme";

pub struct HomeScreen {
    focused: bool,
    translator: Translator,
    company: Option<CompanyInfo>,
}

impl HomeScreen {
    pub fn new(translator: Translator) -> Self {
        Self {
            focused: false,
            translator,
            company: None,
        }
    }

    fn render_hero(&self, frame: &mut Frame, area: Rect) {
        let name = self
            .company
            .as_ref()
            .map_or(FALLBACK_NAME, |c| c.name.as_str());
        let slogan = self
            .company
            .as_ref()
            .and_then(|c| c.slogan.as_deref())
            .unwrap_or(FALLBACK_SLOGAN);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!("🚲  {name}"), theme::title_style()))
                .alignment(Alignment::Center),
            Line::from(""),
            Line::from(Span::styled(slogan, theme::body())).alignment(Alignment::Center),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }

    fn render_highlights(&self, frame: &mut Frame, area: Rect) {
        let highlights = [
            "Stations en libre-service dans toute la ville",
            "Tarification dynamique, ajustée heure par heure",
            "Déblocage instantané depuis l'application",
        ];

        let columns = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

        for (text, column) in highlights.iter().zip(columns.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            let inner = block.inner(*column);
            frame.render_widget(block, *column);
            frame.render_widget(
                Paragraph::new(*text)
                    .style(theme::body())
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
        }
    }

    fn render_contact(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![Line::from(Span::styled(
            format!("{} :", self.translator.t("home.contact")),
            theme::muted(),
        ))];

        if let Some(ref company) = self.company {
            for value in [&company.phone, &company.email, &company.address]
                .into_iter()
                .flatten()
            {
                lines.push(Line::from(Span::styled(format!("  {value}"), theme::body())));
            }
        } else {
            lines.push(Line::from(Span::styled("  —", theme::muted())));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Component for HomeScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::CompanyLoaded(company) = action {
            self.company = Some(company.clone());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.translator.t("nav.home")),
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

        let layout = Layout::vertical([
            Constraint::Length(5), // hero
            Constraint::Length(5), // highlight trio
            Constraint::Min(3),   // contact
        ])
        .split(inner);

        self.render_hero(frame, layout[0]);
        self.render_highlights(frame, layout[1]);
        self.render_contact(frame, layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Home"
    }
}
