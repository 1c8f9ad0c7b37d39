//! Reviews screen -- published customer reviews plus a submission form.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tokio::sync::mpsc::UnboundedSender;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use velodash_core::i18n::Translator;
use velodash_core::model::{Review, ReviewDraft};

use crate::action::{Action, Notice};
use crate::component::Component;
use crate::theme;
use crate::widgets::stars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Author,
    Rating,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browsing,
    Editing(FormField),
}

pub struct ReviewsScreen {
    focused: bool,
    translator: Translator,
    reviews: Vec<Review>,
    scroll: usize,
    mode: Mode,
    author_input: Input,
    comment_input: Input,
    rating: u8,
    form_error: Option<String>,
}

impl ReviewsScreen {
    pub fn new(translator: Translator) -> Self {
        Self {
            focused: false,
            translator,
            reviews: Vec::new(),
            scroll: 0,
            mode: Mode::Browsing,
            author_input: Input::default(),
            comment_input: Input::default(),
            rating: 5,
            form_error: None,
        }
    }

    fn draft(&self) -> ReviewDraft {
        ReviewDraft {
            author: self.author_input.value().to_owned(),
            rating: self.rating,
            comment: self.comment_input.value().to_owned(),
        }
    }

    fn reset_form(&mut self) {
        self.author_input.reset();
        self.comment_input.reset();
        self.rating = 5;
        self.form_error = None;
        self.mode = Mode::Browsing;
    }

    fn submit(&mut self) -> Option<Action> {
        let draft = self.draft();
        match draft.validate() {
            Ok(()) => {
                self.reset_form();
                Some(Action::SubmitReview(draft))
            }
            Err(message) => {
                self.form_error = Some(message);
                None
            }
        }
    }

    fn handle_editing_key(&mut self, field: FormField, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Browsing;
                return None;
            }
            KeyCode::Tab => {
                self.mode = Mode::Editing(match field {
                    FormField::Author => FormField::Rating,
                    FormField::Rating => FormField::Comment,
                    FormField::Comment => FormField::Author,
                });
                return None;
            }
            KeyCode::Enter => {
                return match field {
                    FormField::Author => {
                        self.mode = Mode::Editing(FormField::Rating);
                        None
                    }
                    FormField::Rating => {
                        self.mode = Mode::Editing(FormField::Comment);
                        None
                    }
                    FormField::Comment => self.submit(),
                };
            }
            _ => {}
        }

        match field {
            FormField::Author => {
                self.author_input
                    .handle_event(&crossterm::event::Event::Key(key));
            }
            FormField::Comment => {
                self.comment_input
                    .handle_event(&crossterm::event::Event::Key(key));
            }
            FormField::Rating => match key.code {
                KeyCode::Left => self.rating = self.rating.saturating_sub(1).max(1),
                KeyCode::Right => self.rating = (self.rating + 1).min(5),
                KeyCode::Char(c @ '1'..='5') => {
                    self.rating = c.to_digit(10).and_then(|d| u8::try_from(d).ok()).unwrap_or(5);
                }
                _ => {}
            },
        }

        None
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.translator.t("reviews.title")),
                theme::title_style(),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused && self.mode == Mode::Browsing {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.reviews.is_empty() {
            frame.render_widget(
                Paragraph::new(self.translator.t("reviews.empty")).style(theme::muted()),
                inner,
            );
            return;
        }

        let mut lines = Vec::new();
        for review in self.reviews.iter().skip(self.scroll) {
            let date = review
                .created_at
                .map(|t| t.format("%d/%m/%Y").to_string())
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(review.author.clone(), theme::body()),
                Span::raw("  "),
                Span::styled(stars::fmt_stars(review.rating), theme::savings_style()),
                Span::raw("  "),
                Span::styled(date, theme::muted()),
            ]));
            if !review.comment.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", review.comment),
                    theme::muted(),
                )));
            }
            lines.push(Line::from(""));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let editing = matches!(self.mode, Mode::Editing(_));
        let block = Block::default()
            .title(Span::styled(" Votre avis ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if editing {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let field_style = |field: FormField| {
            if self.mode == Mode::Editing(field) {
                theme::tab_active()
            } else {
                theme::muted()
            }
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Nom      ", field_style(FormField::Author)),
                Span::styled(self.author_input.value().to_owned(), theme::body()),
                cursor_span(self.mode == Mode::Editing(FormField::Author)),
            ]),
            Line::from(vec![
                Span::styled("Note     ", field_style(FormField::Rating)),
                Span::styled(stars::fmt_stars(self.rating), theme::savings_style()),
            ]),
            Line::from(vec![
                Span::styled("Avis     ", field_style(FormField::Comment)),
                Span::styled(self.comment_input.value().to_owned(), theme::body()),
                cursor_span(self.mode == Mode::Editing(FormField::Comment)),
            ]),
            Line::from(""),
        ];

        if let Some(ref error) = self.form_error {
            lines.push(Line::from(Span::styled(error.clone(), theme::error_text())));
        } else if editing {
            lines.push(Line::from(Span::styled(
                format!("Entrée : {}  ·  Échap : annuler", self.translator.t("reviews.submit")),
                theme::key_hint(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "n : rédiger un avis",
                theme::key_hint(),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}

impl Component for ReviewsScreen {
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Mode::Editing(field) = self.mode {
            return Ok(self.handle_editing_key(field, key));
        }

        match key.code {
            KeyCode::Char('n') => {
                self.mode = Mode::Editing(FormField::Author);
                self.form_error = None;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.reviews.len().saturating_sub(1);
                self.scroll = (self.scroll + 1).min(max);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ReviewsLoaded(reviews) => {
                self.reviews = reviews.clone();
                self.scroll = 0;
            }
            Action::ReviewAccepted(review) => {
                self.reviews.insert(0, review.clone());
                return Ok(Some(Action::Notify(Notice::success(
                    self.translator.t("reviews.sent"),
                ))));
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let columns =
            Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)]).split(area);

        self.render_list(frame, columns[0]);
        self.render_form(frame, columns[1]);
    }

    fn wants_text_input(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Reviews"
    }
}

fn cursor_span(active: bool) -> Span<'static> {
    if active {
        Span::styled("▏", theme::tab_active())
    } else {
        Span::raw("")
    }
}
