//! The persisted wrap history: list, detail, and deletion.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{App, Confirm, Screen},
    keys::Action,
    ui::{ACCENT, DIM, ERROR},
};

pub struct HistoryViewState {
    pub selected: usize,
}

impl HistoryViewState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

pub fn handle_key(app: &mut App, action: Action) {
    let wrap_count = {
        let state = app.logic.get_state();
        let count = state.read().unwrap().history.wraps.len();
        count
    };
    if wrap_count > 0 {
        app.history.selected = app.history.selected.min(wrap_count - 1);
    }

    match action {
        Action::Quit => app.confirm = Some(Confirm::Quit),
        Action::Back | Action::Dashboard => app.go_to(Screen::Dashboard),
        Action::Logs => app.toggle_logs(),
        Action::Refresh => app.logic.fetch_wrap_history(),
        Action::MoveUp => app.history.selected = app.history.selected.saturating_sub(1),
        Action::MoveDown => {
            if wrap_count > 0 {
                app.history.selected = (app.history.selected + 1).min(wrap_count - 1);
            }
        }
        Action::GotoTop => app.history.selected = 0,
        Action::GotoBottom => {
            if wrap_count > 0 {
                app.history.selected = wrap_count - 1;
            }
        }
        Action::Select => {
            if let Some(id) = selected_id(app) {
                app.logic.load_wrap_detail(id);
            }
        }
        Action::Delete => {
            if let Some(id) = selected_id(app) {
                app.confirm = Some(Confirm::DeleteWrap(id));
            }
        }
        _ => {}
    }
}

fn selected_id(app: &App) -> Option<wrapped_core::wrapped_state::WrapId> {
    let state = app.logic.get_state();
    let state = state.read().unwrap();
    state
        .history
        .wraps
        .get(app.history.selected)
        .map(|wrap| wrap.id)
}

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let state = app.logic.get_state();
    let state = state.read().unwrap();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    // ── Listing ──
    let list_block = Block::bordered().title(format!(" Your Wraps ({}) ", state.history.wraps.len()));
    let list_inner = list_block.inner(chunks[0]);
    frame.render_widget(list_block, chunks[0]);

    if state.history.loading {
        frame.render_widget(
            Paragraph::new("Loading history...").style(Style::default().fg(DIM)),
            list_inner,
        );
    } else if let Some(error) = &state.history.error {
        frame.render_widget(
            Paragraph::new(error.clone()).style(Style::default().fg(ERROR)),
            list_inner,
        );
    } else if state.history.wraps.is_empty() {
        frame.render_widget(
            Paragraph::new("No wraps yet. Generate one from the dashboard.")
                .style(Style::default().fg(DIM)),
            list_inner,
        );
    } else {
        app.history.selected = app.history.selected.min(state.history.wraps.len() - 1);
        let items: Vec<ListItem> = state
            .history
            .wraps
            .iter()
            .map(|wrap| {
                ListItem::new(Line::from(vec![
                    Span::raw(wrap.title.clone()),
                    Span::styled(
                        format!("  {}", wrap.date_generated),
                        Style::default().fg(DIM),
                    ),
                ]))
            })
            .collect();
        let list = List::new(items).highlight_style(
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        );
        let mut list_state = ListState::default();
        list_state.select(Some(app.history.selected));
        frame.render_stateful_widget(list, list_inner, &mut list_state);
    }

    // ── Detail ──
    let detail_block = Block::bordered().title(" Wrap Detail ");
    let detail_inner = detail_block.inner(chunks[1]);
    frame.render_widget(detail_block, chunks[1]);

    if state.history.detail_loading {
        frame.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(DIM)),
            detail_inner,
        );
        return;
    }

    let selected_id = state.history.wraps.get(app.history.selected).map(|w| w.id);
    let detail = state
        .history
        .detail
        .as_ref()
        .filter(|(id, _)| Some(*id) == selected_id);

    let Some((_, wrap)) = detail else {
        frame.render_widget(
            Paragraph::new("Press Enter to view a wrap.").style(Style::default().fg(DIM)),
            detail_inner,
        );
        return;
    };

    let mut lines = vec![Line::styled(
        format!("Time range: {}", wrap.time_range.label()),
        Style::default().fg(ACCENT),
    )];
    lines.push(Line::raw(""));
    lines.push(Line::styled("Top Artists", Style::default().fg(ACCENT)));
    for (rank, artist) in wrap.top_artists.items.iter().take(5).enumerate() {
        lines.push(Line::raw(format!("  {}. {}", rank + 1, artist.name)));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled("Top Tracks", Style::default().fg(ACCENT)));
    for (rank, track) in wrap.top_tracks.items.iter().take(5).enumerate() {
        lines.push(Line::raw(format!(
            "  {}. {} - {}",
            rank + 1,
            track.name,
            track.primary_artist().unwrap_or("Unknown Artist")
        )));
    }
    frame.render_widget(Paragraph::new(lines), detail_inner);
}
