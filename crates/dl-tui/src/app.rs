//! Top-level application state: the draw session plus what only the UI needs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use dl_core::{
    Catalog, ChargePhase, DrawEventKind, DrawSession, Lang, Mode, Translator, truncate_label,
};

/// Main application state for the TUI.
pub struct DrawApp {
    /// The engine session.
    pub session: DrawSession,
    /// Display language.
    pub lang: Lang,
    /// Text being typed into the option input.
    pub input: String,
    /// Highlighted row in the option list.
    pub selected: usize,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Transient message for the status bar.
    pub status: Option<String>,
    catalog: Catalog,
}

impl DrawApp {
    /// Create the app around a session.
    pub fn new(session: DrawSession, lang: Lang) -> Self {
        Self {
            session,
            lang,
            input: String::new(),
            selected: 0,
            show_help: false,
            should_quit: false,
            status: None,
            catalog: Catalog::new(),
        }
    }

    /// Translated UI text.
    pub fn t(&self, key: &str) -> String {
        self.catalog.translate(self.lang, key)
    }

    /// Advance the session clock and turn new events into status messages.
    pub fn on_tick(&mut self, elapsed: u64) {
        self.session.advance(elapsed);
        for event in self.session.drain_events() {
            match event.kind {
                DrawEventKind::ChargeSaturated { .. } => {
                    self.status = Some(self.t("luckywheel_release"));
                }
                DrawEventKind::ChargeReleased {
                    committed: false, ..
                } => {
                    self.status = Some(self.t("status_discarded"));
                }
                DrawEventKind::DrawStarted { .. } => self.status = None,
                DrawEventKind::DrawResolved { label, .. } => {
                    self.status = Some(format!("{}: {label}", self.t("result_title")));
                }
                _ => {}
            }
        }
        self.clamp_selection();
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('w') => self.toggle_mode(),
                KeyCode::Char('t') => {
                    self.session.try_again();
                }
                KeyCode::Char('r') => {
                    self.session.reset();
                    self.input.clear();
                    self.status = None;
                }
                KeyCode::Char('l') => self.lang = self.lang.toggled(),
                _ => {}
            }
            self.on_tick(0);
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::F(1) => self.show_help = !self.show_help,
            KeyCode::F(2) => self.toggle_mode(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(' ') if self.input.is_empty() && self.session.mode() == Mode::Wheel => {
                self.toggle_charge();
            }
            KeyCode::Char(c) => {
                let max = self.session.config().max_label_chars;
                if self.input.chars().count() < max {
                    self.input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected += 1,
            KeyCode::Delete => {
                if let Err(e) = self.session.remove_option(self.selected) {
                    self.status = Some(e.to_string());
                }
            }
            _ => {}
        }
        self.on_tick(0);
    }

    fn submit(&mut self) {
        if self.input.trim().is_empty() {
            self.input.clear();
            match self.session.mode() {
                Mode::Jar => self.start_jar(),
                Mode::Wheel => self.toggle_charge(),
            }
            return;
        }
        let label = truncate_label(&self.input, self.session.config().max_label_chars);
        if self.session.add_option(&label) {
            self.status = Some(format!("{}: {label}", self.t("option_added")));
            self.selected = self.session.options().len() - 1;
        }
        self.input.clear();
    }

    fn start_jar(&mut self) {
        match self.session.start_jar_draw() {
            Ok(true) => {}
            Ok(false) => {
                if self.session.options().len() < self.session.config().min_options {
                    self.status = Some(self.t("pleaseInput2"));
                }
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn toggle_charge(&mut self) {
        match self.session.charge_phase() {
            ChargePhase::Idle => {
                if !self.session.start_charge()
                    && self.session.options().len() < self.session.config().min_options
                {
                    self.status = Some(self.t("pleaseInput2"));
                }
            }
            ChargePhase::Charging | ChargePhase::Released => {
                if let Err(e) = self.session.end_charge() {
                    self.status = Some(e.to_string());
                }
            }
        }
    }

    fn toggle_mode(&mut self) {
        let next = self.session.mode().toggled();
        self.session.set_mode(next);
    }

    fn clamp_selection(&mut self) {
        let len = self.session.options().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Context-sensitive status bar text.
    pub fn status_hint(&self) -> String {
        if let Some(status) = &self.status {
            return status.clone();
        }
        let action = match self.session.mode() {
            Mode::Jar => "hint_jar",
            Mode::Wheel => "hint_wheel",
        };
        format!("{}  {}", self.t(action), self.t("hint_keys"))
    }
}

#[cfg(test)]
mod tests {
    use dl_core::{DrawConfig, Phase};

    use super::*;

    fn app() -> DrawApp {
        let session = DrawSession::new(DrawConfig::default().with_seed(42)).unwrap();
        DrawApp::new(session, Lang::En)
    }

    fn press(app: &mut DrawApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut DrawApp, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_option(app: &mut DrawApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn typing_and_enter_adds_option() {
        let mut app = app();
        type_option(&mut app, "ice cream");
        assert_eq!(app.session.options().as_slice(), ["ice cream"]);
        assert!(app.input.is_empty());
        assert_eq!(app.status.as_deref(), Some("Added: ice cream"));
    }

    #[test]
    fn input_is_capped_at_label_length() {
        let mut app = app();
        for _ in 0..30 {
            press(&mut app, KeyCode::Char('x'));
        }
        assert_eq!(app.input.chars().count(), 15);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input.chars().count(), 14);
    }

    #[test]
    fn enter_on_empty_input_draws() {
        let mut app = app();
        type_option(&mut app, "a");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status.as_deref(), Some("Please enter at least 2 options"));

        type_option(&mut app, "b");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.phase(), Phase::Drawing);
        app.on_tick(10_000);
        assert_eq!(app.session.phase(), Phase::Resolved);
        assert!(app.status.as_deref().is_some_and(|s| s.starts_with("Result: ")));
    }

    #[test]
    fn space_charges_and_releases_in_wheel_mode() {
        let mut app = app();
        type_option(&mut app, "a");
        type_option(&mut app, "b");
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.session.mode(), Mode::Wheel);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.is_charging());
        app.on_tick(600);
        assert_eq!(app.session.power(), 40);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.is_drawing());
        app.on_tick(4000);
        assert_eq!(app.session.phase(), Phase::Resolved);
    }

    #[test]
    fn weak_release_shows_status() {
        let mut app = app();
        type_option(&mut app, "a");
        type_option(&mut app, "b");
        ctrl(&mut app, 'w');
        press(&mut app, KeyCode::Char(' '));
        app.on_tick(60);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.session.is_drawing());
        assert_eq!(app.status.as_deref(), Some("Charge too weak, no spin"));
    }

    #[test]
    fn space_types_when_input_not_empty() {
        let mut app = app();
        ctrl(&mut app, 'w');
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.input, "a ");
        assert!(!app.session.is_charging());
    }

    #[test]
    fn delete_removes_selected() {
        let mut app = app();
        type_option(&mut app, "a");
        type_option(&mut app, "b");
        type_option(&mut app, "c");
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.session.options().as_slice(), ["a", "c"]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn delete_on_empty_list_reports_status() {
        let mut app = app();
        press(&mut app, KeyCode::Delete);
        assert!(app.session.options().is_empty());
        assert!(app.status.as_deref().is_some_and(|s| s.contains("out of range")));
    }

    #[test]
    fn status_hint_follows_language() {
        let mut app = app();
        assert!(app.status_hint().starts_with("Enter:draw"));
        assert!(app.status_hint().contains("Del:remove"));
        ctrl(&mut app, 'w');
        ctrl(&mut app, 'l');
        let hint = app.status_hint();
        assert!(hint.starts_with("空格：蓄力/释放"), "{hint}");
        assert!(hint.contains("Del：删除"));
    }

    #[test]
    fn try_again_and_reset() {
        let mut app = app();
        type_option(&mut app, "a");
        type_option(&mut app, "b");
        press(&mut app, KeyCode::Enter);
        app.on_tick(10_000);
        ctrl(&mut app, 't');
        assert_eq!(app.session.phase(), Phase::Ready);
        ctrl(&mut app, 'r');
        assert_eq!(app.session.phase(), Phase::Setup);
        assert!(app.session.options().is_empty());
    }

    #[test]
    fn language_toggle_and_quit() {
        let mut app = app();
        ctrl(&mut app, 'l');
        assert_eq!(app.lang, Lang::Zh);
        assert_eq!(app.t("reset"), "重置");
        press(&mut app, KeyCode::F(1));
        assert!(app.show_help);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
