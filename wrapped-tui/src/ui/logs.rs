use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{App, Confirm},
    keys::Action,
    log_buffer::LogBuffer,
    ui::{DIM, layout},
};

pub struct LogsState {
    pub log_buffer: LogBuffer,
    pub scroll_offset: usize,
}

impl LogsState {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            log_buffer,
            scroll_offset: 0,
        }
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_offset = self.log_buffer.len().saturating_sub(1);
    }
}

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let entries = app.logs.log_buffer.get_entries();

    let block = Block::default()
        .title(format!(" Logs ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if entries.is_empty() {
        let empty = Paragraph::new("No log entries").style(Style::default().fg(DIM));
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            // Keep semantic colors for log levels.
            let level_color = match entry.level {
                tracing::Level::ERROR => Color::Red,
                tracing::Level::WARN => Color::Yellow,
                tracing::Level::INFO => Color::Cyan,
                tracing::Level::DEBUG => Color::Green,
                tracing::Level::TRACE => Color::DarkGray,
            };

            let level_str = match entry.level {
                tracing::Level::ERROR => "ERR",
                tracing::Level::WARN => "WRN",
                tracing::Level::INFO => "INF",
                tracing::Level::DEBUG => "DBG",
                tracing::Level::TRACE => "TRC",
            };

            // Truncate target if too long.
            let target = if entry.target.len() > layout::LOG_TARGET_WIDTH {
                format!(
                    "...{}",
                    &entry.target[entry.target.len() - layout::LOG_TARGET_SUFFIX_LEN..]
                )
            } else {
                entry.target.clone()
            };

            let line = Line::from(vec![
                Span::styled(
                    level_str,
                    Style::default()
                        .fg(level_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{target:width$}", width = layout::LOG_TARGET_WIDTH),
                    Style::default().fg(DIM),
                ),
                Span::raw(" "),
                Span::raw(entry.message.clone()),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    // Use a ListState to manage scrolling.
    let mut state = ListState::default();

    // Clamp scroll offset to valid range.
    let max_offset = entries.len().saturating_sub(1);
    let offset = app.logs.scroll_offset.min(max_offset);
    app.logs.scroll_offset = offset;

    state.select(Some(offset));

    frame.render_stateful_widget(list, inner, &mut state);
}

pub fn handle_key(app: &mut App, action: Action) {
    let log_len = app.logs.log_buffer.len();

    match action {
        Action::Back => app.toggle_logs(),
        Action::Quit => app.confirm = Some(Confirm::Quit),
        Action::MoveUp => {
            app.logs.scroll_offset = app.logs.scroll_offset.saturating_sub(1);
        }
        Action::MoveDown => {
            if log_len > 0 {
                app.logs.scroll_offset = (app.logs.scroll_offset + 1).min(log_len - 1);
            }
        }
        Action::PageUp => {
            app.logs.scroll_offset = app
                .logs
                .scroll_offset
                .saturating_sub(layout::PAGE_SCROLL_SIZE);
        }
        Action::PageDown => {
            if log_len > 0 {
                app.logs.scroll_offset =
                    (app.logs.scroll_offset + layout::PAGE_SCROLL_SIZE).min(log_len - 1);
            }
        }
        Action::GotoTop => {
            app.logs.scroll_offset = 0;
        }
        Action::GotoBottom => {
            if log_len > 0 {
                app.logs.scroll_offset = log_len - 1;
            }
        }
        _ => {}
    }
}
