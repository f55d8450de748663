//! The login and registration forms.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
};
use unicode_width::UnicodeWidthStr as _;

use wrapped_core as wc;

use crate::{
    app::{App, Screen},
    keys::Action,
    ui::{ACCENT, DIM, ERROR, layout},
};

/// A single-line text input.
#[derive(Default)]
pub struct TextField {
    pub value: String,
    pub masked: bool,
}

impl TextField {
    fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub(crate) fn apply(&mut self, action: Action) {
        match action {
            Action::Char(c) => self.value.push(c),
            Action::DeleteChar => {
                self.value.pop();
            }
            Action::ClearLine => self.value.clear(),
            _ => {}
        }
    }
}

pub struct LoginState {
    pub username: TextField,
    pub password: TextField,
    pub focus: usize,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            username: TextField::default(),
            password: TextField::masked(),
            focus: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn field_mut(&mut self, index: usize) -> &mut TextField {
        match index {
            0 => &mut self.username,
            _ => &mut self.password,
        }
    }
}

pub struct RegisterState {
    pub username: TextField,
    pub email: TextField,
    pub password: TextField,
    pub focus: usize,
}

impl RegisterState {
    pub fn new() -> Self {
        Self {
            username: TextField::default(),
            email: TextField::default(),
            password: TextField::masked(),
            focus: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn field_mut(&mut self, index: usize) -> &mut TextField {
        match index {
            0 => &mut self.username,
            1 => &mut self.email,
            _ => &mut self.password,
        }
    }
}

pub fn handle_login_key(app: &mut App, action: Action) {
    match action {
        Action::Select => {
            let username = app.login.username.value.trim().to_string();
            let password = app.login.password.value.clone();
            if !username.is_empty() && !password.is_empty() {
                app.logic.login(username, password);
            }
        }
        Action::NextField => app.login.focus = (app.login.focus + 1) % 2,
        Action::MoveUp => app.login.focus = app.login.focus.checked_sub(1).unwrap_or(1),
        Action::Back => app.go_to(Screen::Register),
        action => {
            let focus = app.login.focus;
            app.login.field_mut(focus).apply(action);
        }
    }
}

pub fn handle_register_key(app: &mut App, action: Action) {
    match action {
        Action::Select => {
            let username = app.register.username.value.trim().to_string();
            let email = app.register.email.value.trim().to_string();
            let password = app.register.password.value.clone();
            if !username.is_empty() && !password.is_empty() {
                app.logic.register(username, email, password);
            }
        }
        Action::NextField => app.register.focus = (app.register.focus + 1) % 3,
        Action::MoveUp => app.register.focus = app.register.focus.checked_sub(1).unwrap_or(2),
        Action::Back => app.go_to(Screen::Login),
        action => {
            let focus = app.register.focus;
            app.register.field_mut(focus).apply(action);
        }
    }
}

pub fn draw_login(frame: &mut Frame, app: &App, area: Rect) {
    let fields = [
        ("Username", app.login.username.display(), app.login.focus == 0),
        ("Password", app.login.password.display(), app.login.focus == 1),
    ];
    draw_form(
        frame,
        app,
        area,
        "Sign In",
        &fields,
        "enter to sign in · esc for registration",
    );
}

pub fn draw_register(frame: &mut Frame, app: &App, area: Rect) {
    let fields = [
        (
            "Username",
            app.register.username.display(),
            app.register.focus == 0,
        ),
        ("Email", app.register.email.display(), app.register.focus == 1),
        (
            "Password",
            app.register.password.display(),
            app.register.focus == 2,
        ),
    ];
    draw_form(
        frame,
        app,
        area,
        "Create Account",
        &fields,
        "enter to register · esc for sign in",
    );
}

fn draw_form(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    fields: &[(&str, String, bool)],
    footer: &str,
) {
    let state = app.logic.get_state();
    let state = state.read().unwrap();

    let error_lines: Vec<String> = state
        .session
        .form_error
        .as_ref()
        .map(|e| e.lines())
        .unwrap_or_default();

    let checking = state.session.status == wc::AuthStatus::Checking;
    let pending = state.session.pending;
    drop(state);

    let form_height = 2 // title + spacing
        + fields.len() as u16 * layout::FIELD_HEIGHT
        + 1 // footer
        + error_lines.len() as u16
        + if pending || checking { 1 } else { 0 };
    let rect = layout::centered(area, layout::FORM_WIDTH, form_height);

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(layout::FIELD_HEIGHT)));
    constraints.push(Constraint::Min(1));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(rect);

    frame.render_widget(
        Paragraph::new(title).style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    for (index, (label, value, focused)) in fields.iter().enumerate() {
        let border = if *focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(DIM)
        };
        let field_area = chunks[1 + index];
        let block = Block::bordered()
            .title(format!(" {label} "))
            .border_style(border);
        let inner = block.inner(field_area);
        frame.render_widget(block, field_area);
        frame.render_widget(Paragraph::new(value.as_str()), inner);
        if *focused {
            let cursor_x = inner.x + (value.width() as u16).min(inner.width.saturating_sub(1));
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }

    let mut tail: Vec<Line> = Vec::new();
    if checking {
        tail.push(Line::styled("Checking session...", Style::default().fg(DIM)));
    } else if pending {
        tail.push(Line::styled("Working...", Style::default().fg(DIM)));
    }
    for error in &error_lines {
        tail.push(Line::styled(error.clone(), Style::default().fg(ERROR)));
    }
    tail.push(Line::styled(footer, Style::default().fg(DIM)));
    frame.render_widget(
        Paragraph::new(tail),
        chunks[chunks.len() - 1],
    );
}
