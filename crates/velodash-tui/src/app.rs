//! Application core -- event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use velodash_core::i18n::Translator;
use velodash_core::model::Role;

use crate::action::{Action, Notice, NoticeLevel};
use crate::component::Component;
use crate::data_bridge::BridgeCommand;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How many ticks (4 Hz) a status-bar notice stays visible.
const NOTICE_TTL_TICKS: u8 = 16;

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Role of the current session; gates which tabs are visible.
    role: Role,
    /// Help overlay visibility.
    help_visible: bool,
    /// Transient status-bar notice with its remaining tick lifetime.
    notice: Option<(Notice, u8)>,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    translator: Translator,
    /// Commands headed for the data bridge.
    bridge_tx: mpsc::UnboundedSender<BridgeCommand>,
    /// Action sender -- components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver -- main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(translator: Translator, bridge_tx: mpsc::UnboundedSender<BridgeCommand>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(translator).into_iter().collect();

        Self {
            active_screen: ScreenId::Home,
            previous_screen: None,
            screens,
            running: true,
            role: Role::default(),
            help_visible: false,
            notice: None,
            terminal_size: (0, 0),
            translator,
            bridge_tx,
            action_tx,
            action_rx,
        }
    }

    /// Sender the data bridge uses to push actions into the loop.
    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        // Focus the initial screen
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(50),  // 20 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            // In help mode, Esc or ? closes help
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Ctrl+C always quits, even inside a text field.
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // A screen capturing text input gets every remaining key;
        // it decides what Esc and Enter mean.
        let wants_input = self
            .screens
            .get(&self.active_screen)
            .is_some_and(|s| s.wants_text_input());
        if wants_input {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Screen navigation via number keys, within the visible set
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let index = usize::from(c as u8 - b'1');
                if let Some(&screen) = ScreenId::visible_for(self.role).get(index) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.neighbor_screen(1))));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.neighbor_screen(-1))));
            }

            // Esc -- context-dependent back
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        // Delegate to active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Next/previous visible screen relative to the active one.
    fn neighbor_screen(&self, step: i32) -> ScreenId {
        let visible = ScreenId::visible_for(self.role);
        let len = i32::try_from(visible.len()).unwrap_or(1);
        let current = visible
            .iter()
            .position(|&s| s == self.active_screen)
            .and_then(|p| i32::try_from(p).ok())
            .unwrap_or(0);
        let next = (current + step).rem_euclid(len);
        usize::try_from(next)
            .ok()
            .and_then(|i| visible.get(i).copied())
            .unwrap_or(ScreenId::Home)
    }

    /// Process a single action -- update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::SwitchScreen(target) => {
                let visible = ScreenId::visible_for(self.role);
                if *target != self.active_screen && visible.contains(target) {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    // Unfocus current screen
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    // Focus new screen
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Notify(notice) => {
                self.notice = Some((notice.clone(), NOTICE_TTL_TICKS));
                // The active screen may be waiting on an outcome (e.g. a
                // failed login resolving its pending state).
                self.forward_to_active(action)?;
            }

            Action::Tick => {
                if let Some((_, ttl)) = &mut self.notice {
                    *ttl = ttl.saturating_sub(1);
                    if *ttl == 0 {
                        self.notice = None;
                    }
                }
                // Active screen drives its animations off Tick.
                self.forward_to_active(action)?;
            }

            // ── Commands: route to the data bridge ────────────────
            Action::RefreshPricing => {
                let _ = self.bridge_tx.send(BridgeCommand::RefreshPricing);
            }
            Action::SubmitReview(draft) => {
                let _ = self.bridge_tx.send(BridgeCommand::SubmitReview(draft.clone()));
            }
            Action::SubmitLogin { username, password } => {
                let _ = self.bridge_tx.send(BridgeCommand::Login {
                    username: username.clone(),
                    password: password.clone(),
                });
            }

            // ── Data events: broadcast to every screen ────────────
            Action::PricingUpdated(_)
            | Action::CompanyLoaded(_)
            | Action::ReviewsLoaded(_)
            | Action::ReviewAccepted(_) => {
                self.broadcast(action)?;
            }

            Action::LoggedIn(session) => {
                self.role = session.role;
                self.notice = Some((Notice::success("Connexion réussie"), NOTICE_TTL_TICKS));
                self.broadcast(action)?;
                if session.role.is_staff() {
                    self.action_tx.send(Action::SwitchScreen(ScreenId::Admin))?;
                }
            }

            // Render is handled in the main loop, not here
            Action::Render => {}
        }

        Ok(())
    }

    /// Send an action to every screen, queuing any follow-ups.
    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn forward_to_active(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        // Render active screen
        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Render help overlay on top (if visible)
        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom tab bar with the role-visible screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let visible = ScreenId::visible_for(self.role);
        let titles: Vec<Line> = visible
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", i + 1, self.translator.t(id.label_key())),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                visible
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Bottom status bar: transient notice, otherwise key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.notice {
            Some((notice, _)) => {
                let style = match notice.level {
                    NoticeLevel::Info => Style::default().fg(theme::SKY_BLUE),
                    NoticeLevel::Success => Style::default().fg(theme::LEAF_GREEN),
                    NoticeLevel::Warning => Style::default().fg(theme::SUNSET_ORANGE),
                };
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(notice.message.clone(), style),
                ])
            }
            None => Line::from(vec![
                Span::raw(" "),
                Span::styled("? ", theme::key_hint_key()),
                Span::styled("aide  ", theme::key_hint()),
                Span::styled("Tab ", theme::key_hint_key()),
                Span::styled("écran suivant  ", theme::key_hint()),
                Span::styled("q ", theme::key_hint_key()),
                Span::styled("quitter", theme::key_hint()),
            ]),
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 54u16.min(area.width.saturating_sub(4));
        let help_height = 14u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;

        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        // Clear the background
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::INK)),
            help_area,
        );

        let block = Block::default()
            .title(" Raccourcis clavier ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let rows: &[(&str, &str)] = &[
            ("1-5", "Aller à l'écran"),
            ("Tab", "Écran suivant"),
            ("←/→", "Choisir une formule"),
            ("r", "Actualiser les tarifs"),
            ("n", "Rédiger un avis"),
            ("Esc", "Retour / fermer"),
            ("q", "Quitter"),
        ];

        let mut help_text = vec![Line::from("")];
        for (keys, label) in rows {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {keys:<8}"), theme::key_hint_key()),
                Span::styled(*label, theme::key_hint()),
            ]));
        }
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "                    Esc ou ? pour fermer",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
