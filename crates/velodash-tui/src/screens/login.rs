//! Login screen -- credential entry for the administrative area.
//!
//! Submits through the data bridge; a failure surfaces as a status-bar
//! notice and the form stays put. On success the app unlocks the
//! staff-only navigation entries.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use velodash_core::i18n::Translator;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

pub struct LoginScreen {
    focused: bool,
    translator: Translator,
    field: Field,
    username_input: Input,
    password_input: Input,
    /// Set while a submission is in flight; cleared on any outcome.
    submitting: bool,
    /// Display name once signed in.
    signed_in_as: Option<String>,
}

impl LoginScreen {
    pub fn new(translator: Translator) -> Self {
        Self {
            focused: false,
            translator,
            field: Field::Username,
            username_input: Input::default(),
            password_input: Input::default(),
            submitting: false,
            signed_in_as: None,
        }
    }

    fn submit(&mut self) -> Option<Action> {
        let username = self.username_input.value().trim().to_owned();
        let password = self.password_input.value().to_owned();
        if username.is_empty() || password.is_empty() {
            return None;
        }

        self.submitting = true;
        Some(Action::SubmitLogin { username, password })
    }
}

impl Component for LoginScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.signed_in_as.is_some() {
            return Ok(None);
        }

        match key.code {
            KeyCode::Esc => return Ok(Some(Action::GoBack)),
            KeyCode::Tab => {
                self.field = match self.field {
                    Field::Username => Field::Password,
                    Field::Password => Field::Username,
                };
            }
            KeyCode::Enter => {
                return Ok(match self.field {
                    Field::Username => {
                        self.field = Field::Password;
                        None
                    }
                    Field::Password => self.submit(),
                });
            }
            _ => match self.field {
                Field::Username => {
                    self.username_input
                        .handle_event(&crossterm::event::Event::Key(key));
                }
                Field::Password => {
                    self.password_input
                        .handle_event(&crossterm::event::Event::Key(key));
                }
            },
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::LoggedIn(session) => {
                self.submitting = false;
                self.password_input.reset();
                self.signed_in_as = Some(
                    session
                        .display_name
                        .clone()
                        .unwrap_or_else(|| self.username_input.value().to_owned()),
                );
            }
            Action::Notify(_) => {
                // Any notice while submitting means the attempt resolved.
                self.submitting = false;
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.translator.t("login.title")),
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

        // Narrow centered column, like a web login card.
        let card_width = 46u16.min(inner.width.saturating_sub(2));
        let x = inner.x + (inner.width.saturating_sub(card_width)) / 2;
        let card = Rect::new(x, inner.y + inner.height / 4, card_width, 9);
        let card = card.intersection(inner);

        if let Some(ref name) = self.signed_in_as {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("✓ Connecté en tant que {name}"),
                        theme::tab_active(),
                    ))
                    .alignment(Alignment::Center),
                ]),
                card,
            );
            return;
        }

        let field_style = |field: Field| {
            if self.field == field {
                theme::tab_active()
            } else {
                theme::muted()
            }
        };
        let masked = "•".repeat(self.password_input.value().chars().count());

        let layout = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(card);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{:<14}", self.translator.t("login.username")),
                    field_style(Field::Username),
                ),
                Span::styled(self.username_input.value().to_owned(), theme::body()),
            ])),
            layout[1],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("{:<14}", self.translator.t("login.password")),
                    field_style(Field::Password),
                ),
                Span::styled(masked, theme::body()),
            ])),
            layout[2],
        );

        let hint = if self.submitting {
            Line::from(Span::styled("…", theme::muted()))
        } else {
            Line::from(vec![
                Span::styled("Entrée ", theme::key_hint_key()),
                Span::styled(
                    self.translator.t("login.submit").to_owned(),
                    theme::key_hint(),
                ),
            ])
        };
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), layout[3]);
    }

    fn wants_text_input(&self) -> bool {
        self.signed_in_as.is_none()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Login"
    }
}
