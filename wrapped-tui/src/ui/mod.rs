pub(crate) mod dashboard;
pub(crate) mod forms;
pub(crate) mod history;
pub(crate) mod layout;
pub(crate) mod logs;
pub(crate) mod slides;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::{App, Screen},
    keys::Action,
};

/// The Spotify-ish accent color used for highlights.
pub const ACCENT: Color = Color::Green;
pub const DIM: Color = Color::DarkGray;
pub const ERROR: Color = Color::Red;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let main = layout::split_main(frame.area());

    draw_title_bar(frame, app, main.title_bar);

    match app.screen {
        Screen::Login => forms::draw_login(frame, app, main.content),
        Screen::Register => forms::draw_register(frame, app, main.content),
        Screen::Dashboard => dashboard::draw(frame, app, main.content),
        Screen::Wrapped => slides::draw(frame, app, main.content),
        Screen::History => history::draw(frame, app, main.content),
        Screen::Logs => logs::draw(frame, app, main.content),
    }

    draw_help_bar(frame, app, main.help_bar);

    if let Some(confirm) = app.confirm {
        draw_confirm(frame, frame.area(), confirm.prompt());
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.logic.get_state();
    let state = state.read().unwrap();

    let mut spans = vec![Span::styled(
        " Spotify Wrapper ",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    if let Some(user) = state.session.user() {
        spans.push(Span::styled(
            format!("· {} ", user.username),
            Style::default(),
        ));
        let (linked, color) = if state.session.spotify_linked {
            ("· spotify linked", ACCENT)
        } else {
            ("· spotify not linked", DIM)
        };
        spans.push(Span::styled(linked, Style::default().fg(color)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The actions worth advertising for the current screen, in help-bar order.
fn help_actions(app: &App) -> Vec<Action> {
    match app.screen {
        Screen::Login | Screen::Register => {
            vec![Action::Select, Action::Back]
        }
        Screen::Dashboard => vec![
            Action::Wrapped,
            Action::CycleRange,
            Action::History,
            Action::Refresh,
            Action::Logout,
            Action::Logs,
            Action::Quit,
        ],
        Screen::Wrapped => {
            let mut actions = vec![Action::MoveRight, Action::MoveLeft];
            if app.slides.on_finale(&app.logic) {
                actions.push(Action::Preview);
                actions.push(Action::StopPreview);
            }
            if app.slides.on_recap(&app.logic) {
                actions.push(Action::Share);
            }
            actions.push(Action::Back);
            actions
        }
        Screen::History => vec![
            Action::Select,
            Action::Delete,
            Action::Refresh,
            Action::Back,
            Action::Quit,
        ],
        Screen::Logs => vec![Action::Back, Action::Quit],
    }
}

fn draw_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for action in help_actions(app) {
        let Some((key, desc)) = action.help_label() else {
            continue;
        };
        if !spans.is_empty() {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default().fg(ACCENT),
        ));
        spans.push(Span::styled(format!(" {desc}"), Style::default().fg(DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_confirm(frame: &mut Frame, area: Rect, prompt: &str) {
    let rect = layout::centered(area, (prompt.len() as u16 + 4).max(30), 3);
    frame.render_widget(Clear, rect);
    let dialog = Paragraph::new(prompt).centered().block(
        ratatui::widgets::Block::bordered()
            .border_style(Style::default().fg(ACCENT))
            .title(" Confirm "),
    );
    frame.render_widget(dialog, rect);
}
