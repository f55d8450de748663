use std::time::{Duration, Instant};

use wrapped_core as wc;
use wrapped_core::wrapped_state;

use crate::{
    config::Config,
    log_buffer::LogBuffer,
    ui::{
        dashboard::DashboardState,
        forms::{LoginState, RegisterState},
        history::HistoryViewState,
        logs::LogsState,
        slides::SlidesState,
    },
};

/// How long a slide change animates before the deck commits it.
pub const SLIDE_ANIMATION: Duration = Duration::from_millis(500);
/// How long right/wrong feedback stays up before the quiz advances.
pub const QUIZ_FEEDBACK: Duration = Duration::from_secs(2);
/// How long the "saved share text" notice stays visible.
pub const SHARE_NOTICE: Duration = Duration::from_secs(3);

/// Which screen the UI is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard,
    Wrapped,
    History,
    Logs,
}

/// A pending yes/no confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Quit,
    DeleteAccount,
    DeleteWrap(wrapped_state::WrapId),
}

impl Confirm {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirm::Quit => "Quit? (y/n)",
            Confirm::DeleteAccount => "Delete your account? (y/n)",
            Confirm::DeleteWrap(_) => "Delete this wrap? (y/n)",
        }
    }
}

pub struct App {
    pub logic: wc::Logic,
    pub config: Config,

    pub screen: Screen,
    /// Screen to return to when closing the log view.
    pub previous_screen: Screen,
    pub confirm: Option<Confirm>,
    pub should_quit: bool,
    pub needs_redraw: bool,

    pub login: LoginState,
    pub register: RegisterState,
    pub dashboard: DashboardState,
    pub slides: SlidesState,
    pub history: HistoryViewState,
    pub logs: LogsState,
}

impl App {
    pub fn new(config: Config, logic: wc::Logic, log_buffer: LogBuffer) -> Self {
        Self {
            logic,
            config,

            screen: Screen::Login,
            previous_screen: Screen::Login,
            confirm: None,
            should_quit: false,
            needs_redraw: true,

            login: LoginState::new(),
            register: RegisterState::new(),
            dashboard: DashboardState::new(),
            slides: SlidesState::new(),
            history: HistoryViewState::new(),
            logs: LogsState::new(log_buffer),
        }
    }

    pub fn tick(&mut self) {
        self.enforce_route_guards();
        self.advance_timers();
        self.needs_redraw = true;
    }

    /// Keep the current screen consistent with the session: signed-out
    /// users only see the login/register forms, signed-in users never do.
    fn enforce_route_guards(&mut self) {
        let status = self.logic.auth_status();
        match status {
            wc::AuthStatus::Checking => {}
            wc::AuthStatus::SignedOut => {
                if !matches!(self.screen, Screen::Login | Screen::Register | Screen::Logs) {
                    self.go_to(Screen::Login);
                }
            }
            wc::AuthStatus::SignedIn(_) => {
                if matches!(self.screen, Screen::Login | Screen::Register) {
                    self.login.reset();
                    self.register.reset();
                    self.go_to(Screen::Dashboard);
                    self.logic.fetch_playlists();
                }
            }
        }
    }

    fn advance_timers(&mut self) {
        let now = Instant::now();

        // Commit slide animations once they've run their course.
        if let Some(started) = self.slides.transition_started
            && now.duration_since(started) >= SLIDE_ANIMATION
        {
            self.slides.deck.complete_transition();
            self.slides.transition_started = None;
        }

        // Quiz feedback auto-advances after a beat.
        if let Some(deadline) = self.slides.feedback_deadline
            && now >= deadline
        {
            self.slides.feedback_deadline = None;
            if let Some(game) = self.slides.game.as_mut()
                && let Some(score) = game.advance()
            {
                self.logic.set_game_score(score);
            }
        }

        if let Some(expires) = self.slides.share_notice_expires
            && now >= expires
        {
            self.slides.share_notice_expires = None;
            self.slides.share_notice = None;
        }

        // The slide sequence changes length as data and scores arrive.
        let slide_count = self.slides.sequence(&self.logic).len();
        self.slides.deck.clamp_to(slide_count);
    }

    pub fn go_to(&mut self, screen: Screen) {
        if self.screen != Screen::Logs {
            self.previous_screen = self.screen;
        }
        self.screen = screen;
    }

    pub fn toggle_logs(&mut self) {
        if self.screen == Screen::Logs {
            self.screen = self.previous_screen;
        } else {
            self.go_to(Screen::Logs);
            self.logs.scroll_to_end();
        }
    }

    /// Open the slideshow, fetching data for the selected range and
    /// resetting the deck and any game in progress.
    pub fn open_wrapped(&mut self) {
        self.logic.clear_game_score();
        self.slides.reset();
        self.logic
            .fetch_wrap_data(self.dashboard.selected_range());
        self.go_to(Screen::Wrapped);
    }

    pub fn open_history(&mut self) {
        self.history.reset();
        self.logic.fetch_wrap_history();
        self.go_to(Screen::History);
    }
}
