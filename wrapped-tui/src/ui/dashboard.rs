//! The post-login home screen: Spotify link status, time range
//! selection, the latest generated wrap, and the user's playlists.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, Paragraph},
};

use wrapped_core::wrapped_state::TimeRange;

use crate::{
    app::{App, Confirm},
    keys::Action,
    ui::{ACCENT, DIM, ERROR, forms::TextField},
};

pub struct DashboardState {
    range_index: usize,
    /// OAuth code entry, shown while the account isn't linked.
    pub code: TextField,
    pub entering_code: bool,
    pub playlist_offset: usize,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            range_index: TimeRange::ALL
                .iter()
                .position(|r| *r == TimeRange::default())
                .unwrap_or(0),
            code: TextField::default(),
            entering_code: false,
            playlist_offset: 0,
        }
    }

    pub fn selected_range(&self) -> TimeRange {
        TimeRange::ALL[self.range_index]
    }

    pub fn cycle_range(&mut self, delta: isize) {
        let count = TimeRange::ALL.len() as isize;
        self.range_index = ((self.range_index as isize + delta).rem_euclid(count)) as usize;
    }
}

pub fn handle_key(app: &mut App, action: Action) {
    // Code entry takes over input while active.
    if app.dashboard.entering_code {
        match action {
            Action::Back => {
                app.dashboard.entering_code = false;
                app.dashboard.code.value.clear();
            }
            Action::Select => {
                let code = app.dashboard.code.value.trim().to_string();
                if !code.is_empty() {
                    app.logic.complete_spotify_link(code);
                    app.dashboard.entering_code = false;
                    app.dashboard.code.value.clear();
                }
            }
            action => app.dashboard.code.apply(action),
        }
        return;
    }

    match action {
        Action::Quit => app.confirm = Some(Confirm::Quit),
        Action::Wrapped => app.open_wrapped(),
        Action::History => app.open_history(),
        Action::Logs => app.toggle_logs(),
        Action::CycleRange | Action::MoveRight => app.dashboard.cycle_range(1),
        Action::MoveLeft => app.dashboard.cycle_range(-1),
        Action::Refresh => {
            app.logic.fetch_playlists();
            if !app.logic.is_spotify_linked() {
                app.logic.request_spotify_auth_url();
            }
        }
        Action::Logout => app.logic.logout(),
        Action::Delete => app.confirm = Some(Confirm::DeleteAccount),
        Action::Select => {
            if app.logic.is_spotify_linked() {
                app.open_wrapped();
            } else {
                if app.logic.get_state().read().unwrap().spotify_auth_url.is_none() {
                    app.logic.request_spotify_auth_url();
                }
                app.dashboard.entering_code = true;
            }
        }
        Action::MoveUp => {
            app.dashboard.playlist_offset = app.dashboard.playlist_offset.saturating_sub(1);
        }
        Action::MoveDown => {
            app.dashboard.playlist_offset += 1;
        }
        _ => {}
    }
}

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let state = app.logic.get_state();
    let state = state.read().unwrap();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // spotify link
            Constraint::Length(3), // range selector
            Constraint::Length(3), // latest wrap
            Constraint::Min(3),    // playlists
        ])
        .split(area);

    // ── Spotify link ──
    let mut link_lines: Vec<Line> = Vec::new();
    if state.session.spotify_linked {
        link_lines.push(Line::styled(
            "Spotify account linked. Press Enter or w to see your Wrapped.",
            Style::default().fg(ACCENT),
        ));
    } else if app.dashboard.entering_code {
        link_lines.push(Line::from(vec![
            Span::styled("Paste the code from the redirect URL: ", Style::default()),
            Span::styled(
                app.dashboard.code.value.clone(),
                Style::default().fg(ACCENT),
            ),
        ]));
        link_lines.push(Line::styled(
            "enter to submit · esc to cancel",
            Style::default().fg(DIM),
        ));
    } else {
        link_lines.push(Line::raw(
            "Connect your Spotify account to generate a Wrapped.",
        ));
        match &state.spotify_auth_url {
            Some(url) => link_lines.push(Line::from(vec![
                Span::styled("Open: ", Style::default().fg(DIM)),
                Span::styled(url.clone(), Style::default().fg(ACCENT)),
            ])),
            None => link_lines.push(Line::styled(
                "Press Enter to start linking.",
                Style::default().fg(DIM),
            )),
        }
    }
    if state.linking {
        link_lines.push(Line::styled("Linking...", Style::default().fg(DIM)));
    }
    if let Some(error) = &state.link_error {
        link_lines.push(Line::styled(error.clone(), Style::default().fg(ERROR)));
    }
    frame.render_widget(
        Paragraph::new(link_lines).block(Block::bordered().title(" Spotify ")),
        chunks[0],
    );

    // ── Time range selector ──
    let spans: Vec<Span> = TimeRange::ALL
        .iter()
        .flat_map(|range| {
            let style = if *range == app.dashboard.selected_range() {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DIM)
            };
            [
                Span::styled(range.label(), style),
                Span::raw("   "),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::bordered().title(" Time Range ")),
        chunks[1],
    );

    // ── Latest wrap ──
    let latest = match state.local_history.latest() {
        Some(entry) => Line::from(vec![
            Span::raw(format!(
                "Last generated: {} · ",
                entry.generated_at.format("%Y-%m-%d %H:%M")
            )),
            Span::styled(entry.time_range.label(), Style::default().fg(ACCENT)),
        ]),
        None => Line::styled(
            "No wrap generated yet on this machine.",
            Style::default().fg(DIM),
        ),
    };
    frame.render_widget(
        Paragraph::new(latest).block(Block::bordered().title(" Latest Wrap ")),
        chunks[2],
    );

    // ── Playlists ──
    let playlists_block = Block::bordered().title(format!(
        " Playlists ({}) ",
        state.playlists.items.len()
    ));
    let inner = playlists_block.inner(chunks[3]);
    frame.render_widget(playlists_block, chunks[3]);

    if state.playlists.loading {
        frame.render_widget(
            Paragraph::new("Loading playlists...").style(Style::default().fg(DIM)),
            inner,
        );
        return;
    }
    if let Some(error) = &state.playlists.error {
        frame.render_widget(
            Paragraph::new(error.clone()).style(Style::default().fg(ERROR)),
            inner,
        );
        return;
    }

    let max_offset = state
        .playlists
        .items
        .len()
        .saturating_sub(inner.height as usize);
    app.dashboard.playlist_offset = app.dashboard.playlist_offset.min(max_offset);

    let items: Vec<ListItem> = state
        .playlists
        .items
        .iter()
        .skip(app.dashboard.playlist_offset)
        .take(inner.height as usize)
        .map(|playlist| {
            let tracks = playlist
                .tracks
                .as_ref()
                .map(|t| format!(" ({} tracks)", t.total))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(playlist.name.clone()),
                Span::styled(tracks, Style::default().fg(DIM)),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}
