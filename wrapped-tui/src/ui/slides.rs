//! The Wrapped slideshow, including the release-year quiz rounds.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use wrapped_core::{
    self as wc,
    deck::{Slide, SlideDeck},
    quiz::{GameSession, QuizPhase, ROUND_COUNT},
    share,
};

use crate::{
    app::{App, Confirm, QUIZ_FEEDBACK, Screen, SHARE_NOTICE},
    keys::Action,
    ui::{ACCENT, DIM, ERROR, layout},
};

/// Where the share text is written; the terminal has no clipboard.
pub const SHARE_FILENAME: &str = "wrapped-share.txt";

pub struct SlidesState {
    pub deck: SlideDeck,
    pub game: Option<GameSession>,
    pub transition_started: Option<Instant>,
    pub feedback_deadline: Option<Instant>,
    pub share_notice: Option<String>,
    pub share_notice_expires: Option<Instant>,
}

impl SlidesState {
    pub fn new() -> Self {
        Self {
            deck: SlideDeck::default(),
            game: None,
            transition_started: None,
            feedback_deadline: None,
            share_notice: None,
            share_notice_expires: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The slide sequence for the current data.
    pub fn sequence(&self, logic: &wc::Logic) -> Vec<Slide> {
        let state = logic.get_state();
        let state = state.read().unwrap();
        wc::deck::slide_sequence(state.wrap.data.is_some(), state.game_score.is_some())
    }

    pub fn current_slide(&self, logic: &wc::Logic) -> Slide {
        let sequence = self.sequence(logic);
        sequence
            .get(self.deck.current() - 1)
            .copied()
            .unwrap_or(Slide::Welcome)
    }

    pub fn on_finale(&self, logic: &wc::Logic) -> bool {
        matches!(
            self.current_slide(logic),
            Slide::Finale | Slide::CountdownTrack { .. }
        )
    }

    pub fn on_recap(&self, logic: &wc::Logic) -> bool {
        self.current_slide(logic) == Slide::Recap
    }
}

pub fn handle_key(app: &mut App, action: Action) {
    let slide = app.slides.current_slide(&app.logic);

    match action {
        Action::Quit => app.confirm = Some(Confirm::Quit),
        Action::Back => {
            #[cfg(feature = "audio")]
            app.logic.stop_preview();
            app.go_to(Screen::Dashboard);
        }
        Action::MoveRight => {
            // The game slide holds navigation until the round is over.
            if slide == Slide::Game
                && app
                    .slides
                    .game
                    .as_ref()
                    .is_some_and(|g| g.phase() != QuizPhase::Complete)
            {
                return;
            }
            let count = app.slides.sequence(&app.logic).len();
            if !app.slides.deck.is_animating() {
                app.slides.deck.begin_next(count);
                if app.slides.deck.is_animating() {
                    app.slides.transition_started = Some(Instant::now());
                }
            }
        }
        Action::MoveLeft => {
            if !app.slides.deck.is_animating() {
                app.slides.deck.begin_previous();
                if app.slides.deck.is_animating() {
                    app.slides.transition_started = Some(Instant::now());
                }
            }
        }
        Action::Option(index) if slide == Slide::Game => {
            ensure_game(app);
            let Some(game) = app.slides.game.as_mut() else {
                return;
            };
            let Some(year) = game.current_round().and_then(|r| r.options.get(index).copied())
            else {
                return;
            };
            if game.select_answer(year).is_some() {
                app.slides.feedback_deadline = Some(Instant::now() + QUIZ_FEEDBACK);
            }
        }
        Action::Share if slide == Slide::Recap => {
            let state = app.logic.get_state();
            let state = state.read().unwrap();
            if let Some(data) = &state.wrap.data {
                let text = share::share_text(data, state.game_score);
                drop(state);
                match std::fs::write(SHARE_FILENAME, text) {
                    Ok(()) => {
                        app.slides.share_notice =
                            Some(format!("Share text saved to {SHARE_FILENAME}"));
                    }
                    Err(e) => {
                        tracing::warn!("failed to write share text: {e}");
                        app.slides.share_notice = Some("Failed to save share text".to_string());
                    }
                }
                app.slides.share_notice_expires = Some(Instant::now() + SHARE_NOTICE);
            }
        }
        #[cfg(feature = "audio")]
        Action::Preview => {
            let track = {
                let state = app.logic.get_state();
                let state = state.read().unwrap();
                if state.preview.track_name.is_some() {
                    None // already loaded, just toggle
                } else {
                    finale_track(&state)
                }
            };
            match track {
                Some((name, url)) => app.logic.play_preview(url, name),
                None => app.logic.toggle_preview(),
            }
        }
        #[cfg(feature = "audio")]
        Action::StopPreview => app.logic.stop_preview(),
        Action::Refresh => {
            let range = app.dashboard.selected_range();
            app.logic.fetch_wrap_data(range);
        }
        _ => {}
    }
}

/// The #1 all-time track's name and preview URL, if it has one.
#[cfg(feature = "audio")]
fn finale_track(state: &wc::AppState) -> Option<(String, String)> {
    let track = state.wrap.data.as_ref()?.top_tracks_all_time.items.first()?;
    let url = track.preview_url.clone()?;
    Some((track.name.clone(), url))
}

/// Build the game lazily the first time the game slide needs it.
fn ensure_game(app: &mut App) {
    if app.slides.game.is_some() {
        return;
    }
    let state = app.logic.get_state();
    let state = state.read().unwrap();
    let Some(data) = &state.wrap.data else {
        return;
    };
    let mut rng = rand::rng();
    match GameSession::new(
        &data.top_tracks_all_time.items,
        wc::quiz::current_year(),
        &mut rng,
    ) {
        Ok(game) => {
            drop(state);
            app.slides.game = Some(game);
        }
        Err(e) => {
            tracing::info!("skipping quiz: {e}");
        }
    }
}

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let sequence = app.slides.sequence(&app.logic);
    let slide = app.slides.current_slide(&app.logic);
    if slide == Slide::Game {
        ensure_game(app);
    }

    let state = app.logic.get_state();
    let state = state.read().unwrap();

    let mut lines: Vec<Line> = Vec::new();

    // Progress header, with a direction marker while animating.
    let marker = match app.slides.deck.transition() {
        wc::deck::Transition::Idle => String::new(),
        wc::deck::Transition::Animating { direction, .. } => match direction {
            wc::deck::Direction::Forward => " →".to_string(),
            wc::deck::Direction::Backward => " ←".to_string(),
        },
    };
    lines.push(Line::styled(
        format!("{} / {}{marker}", app.slides.deck.current(), sequence.len()),
        Style::default().fg(DIM),
    ));
    lines.push(Line::raw(""));

    match slide {
        Slide::Welcome => {
            lines.push(title("Your Spotify Wrapped"));
            lines.push(Line::styled(
                format!("Time range: {}", state.wrap.selected_range.label()),
                Style::default().fg(ACCENT),
            ));
            lines.push(Line::raw(""));
            if state.wrap.loading {
                lines.push(Line::styled(
                    "Crunching your listening history...",
                    Style::default().fg(DIM),
                ));
            } else if let Some(error) = &state.wrap.error {
                lines.push(Line::styled(error.clone(), Style::default().fg(ERROR)));
                lines.push(Line::styled(
                    "Press r to retry.",
                    Style::default().fg(DIM),
                ));
            } else {
                lines.push(Line::styled(
                    "Press → to begin.",
                    Style::default().fg(DIM),
                ));
            }
        }
        Slide::TopArtistsRecent | Slide::TopArtistsAllTime => {
            let (heading, artists) = if slide == Slide::TopArtistsRecent {
                (
                    "Your Top Artists Lately",
                    state.wrap.data.as_ref().map(|d| &d.top_artists_recent),
                )
            } else {
                (
                    "Your Top Artists of All Time",
                    state.wrap.data.as_ref().map(|d| &d.top_artists_all_time),
                )
            };
            lines.push(title(heading));
            lines.push(Line::raw(""));
            for (rank, artist) in artists.iter().flat_map(|p| p.items.iter()).take(5).enumerate() {
                let genres = artist
                    .genre_summary()
                    .map(|g| format!("  ({g})"))
                    .unwrap_or_default();
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{}. ", rank + 1),
                        Style::default().fg(ACCENT),
                    ),
                    Span::styled(
                        artist.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(genres, Style::default().fg(DIM)),
                ]));
            }
        }
        Slide::TopTracksAllTime => {
            lines.push(title("Your Top Tracks of All Time"));
            lines.push(Line::raw(""));
            let tracks = state.wrap.data.as_ref().map(|d| &d.top_tracks_all_time);
            for (rank, track) in tracks.iter().flat_map(|p| p.items.iter()).take(5).enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{}. ", rank + 1),
                        Style::default().fg(ACCENT),
                    ),
                    Span::styled(
                        track.name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" - {}", track.primary_artist().unwrap_or("Unknown Artist")),
                        Style::default().fg(DIM),
                    ),
                ]));
            }
        }
        Slide::CountdownIntro => {
            lines.push(title("But wait, there's more..."));
            lines.push(Line::raw(""));
            lines.push(Line::raw("Your top three tracks, counted down."));
        }
        Slide::CountdownTrack { rank } => {
            lines.push(title(&format!("#{rank}")));
            lines.push(Line::raw(""));
            push_track_lines(&mut lines, &state, rank);
        }
        Slide::Finale => {
            lines.push(title("★ Your #1 Track ★"));
            lines.push(Line::raw(""));
            push_track_lines(&mut lines, &state, 1);
            lines.push(Line::raw(""));
            if state.preview.loading {
                lines.push(Line::styled("Loading preview...", Style::default().fg(DIM)));
            } else if let Some(name) = &state.preview.track_name {
                let status = if state.preview.playing { "▶" } else { "⏸" };
                lines.push(Line::styled(
                    format!(
                        "{status} {name}  {}",
                        wc::util::duration_to_mmss(state.preview.position)
                    ),
                    Style::default().fg(ACCENT),
                ));
            } else {
                lines.push(Line::styled(
                    "Press p to hear a preview.",
                    Style::default().fg(DIM),
                ));
            }
            if let Some(error) = &state.preview.error {
                lines.push(Line::styled(error.clone(), Style::default().fg(ERROR)));
            }
        }
        Slide::GameIntro => {
            lines.push(title("One more thing: a little game"));
            lines.push(Line::raw(""));
            lines.push(Line::raw(format!(
                "Guess the release year of {ROUND_COUNT} of your top tracks."
            )));
            lines.push(Line::raw("One point per correct answer."));
        }
        Slide::Game => draw_game_lines(&mut lines, &state, app.slides.game.as_ref()),
        Slide::GameResults => {
            lines.push(title("Quiz Results"));
            lines.push(Line::raw(""));
            let score = state.game_score.unwrap_or(0);
            lines.push(Line::styled(
                format!("You scored {score} / {ROUND_COUNT}"),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ));
        }
        Slide::Recap => {
            lines.push(title("That's a Wrap"));
            lines.push(Line::raw(""));
            if let Some(data) = &state.wrap.data {
                lines.push(Line::styled("Top Artists", Style::default().fg(ACCENT)));
                for (rank, artist) in data.top_artists_all_time.items.iter().take(3).enumerate() {
                    lines.push(Line::raw(format!("  {}. {}", rank + 1, artist.name)));
                }
                lines.push(Line::styled("Top Tracks", Style::default().fg(ACCENT)));
                for (rank, track) in data.top_tracks_all_time.items.iter().take(3).enumerate() {
                    lines.push(Line::raw(format!("  {}. {}", rank + 1, track.name)));
                }
            }
            if let Some(score) = state.game_score {
                lines.push(Line::raw(format!("Quiz score: {score} / {ROUND_COUNT}")));
            }
            lines.push(Line::raw(""));
            match &app.slides.share_notice {
                Some(notice) => lines.push(Line::styled(
                    notice.clone(),
                    Style::default().fg(ACCENT),
                )),
                None => lines.push(Line::styled(
                    "Press s to save a shareable summary.",
                    Style::default().fg(DIM),
                )),
            }
        }
    }

    drop(state);

    let rect = layout::centered(area, 60, (lines.len() as u16 + 2).max(10));
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::bordered()
                .title(" Wrapped ")
                .border_style(Style::default().fg(ACCENT)),
        ),
        rect,
    );
}

fn title(text: &str) -> Line<'static> {
    Line::styled(
        text.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )
}

/// Lines describing the all-time track at `rank` (1-based).
fn push_track_lines(lines: &mut Vec<Line<'static>>, state: &wc::AppState, rank: usize) {
    let track = state
        .wrap
        .data
        .as_ref()
        .and_then(|d| d.top_tracks_all_time.items.get(rank - 1));
    let Some(track) = track else {
        lines.push(Line::styled(
            "Not enough listening data.",
            Style::default().fg(DIM),
        ));
        return;
    };
    lines.push(Line::styled(
        track.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::raw(
        track.primary_artist().unwrap_or("Unknown Artist").to_string(),
    ));
    let year = track
        .release_year()
        .map(|y| format!(" ({y})"))
        .unwrap_or_default();
    lines.push(Line::styled(
        format!("{}{year}", track.album.name),
        Style::default().fg(DIM),
    ));
}

fn draw_game_lines(
    lines: &mut Vec<Line<'static>>,
    state: &wc::AppState,
    game: Option<&GameSession>,
) {
    let Some(game) = game else {
        lines.push(title("Guess the Year"));
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Not enough dated tracks for a quiz. Press → to continue.",
            Style::default().fg(DIM),
        ));
        return;
    };

    lines.push(title("Guess the Year"));
    lines.push(Line::styled(
        format!(
            "Round {} / {ROUND_COUNT} · Score {}",
            game.round_number(),
            game.score()
        ),
        Style::default().fg(DIM),
    ));
    lines.push(Line::raw(""));

    if game.phase() == QuizPhase::Complete {
        lines.push(Line::styled(
            format!("Done! You scored {} / {ROUND_COUNT}.", game.score()),
            Style::default().fg(ACCENT),
        ));
        lines.push(Line::styled(
            "Press → to continue.",
            Style::default().fg(DIM),
        ));
        return;
    }

    let Some(round) = game.current_round() else {
        return;
    };

    if let Some(track) = state
        .wrap
        .data
        .as_ref()
        .and_then(|d| d.top_tracks_all_time.items.get(round.track_index))
    {
        lines.push(Line::from(vec![
            Span::styled(
                track.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" - {}", track.primary_artist().unwrap_or("Unknown Artist")),
                Style::default().fg(DIM),
            ),
        ]));
    }
    lines.push(Line::raw(""));

    for (index, option) in round.options.iter().enumerate() {
        let selected = round.selected == Some(*option);
        let style = if game.phase() == QuizPhase::Feedback {
            if *option == round.correct_year() {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().fg(ERROR)
            } else {
                Style::default().fg(DIM)
            }
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("  {}. {option}", index + 1), style));
    }

    lines.push(Line::raw(""));
    match game.phase() {
        QuizPhase::Guessing => lines.push(Line::styled(
            "Press 1-4 to answer.",
            Style::default().fg(DIM),
        )),
        QuizPhase::Feedback => {
            let correct = round.selected == Some(round.correct_year());
            let (text, color) = if correct {
                ("Correct!".to_string(), ACCENT)
            } else {
                (format!("Not quite - it was {}.", round.correct_year()), ERROR)
            };
            lines.push(Line::styled(text, Style::default().fg(color)));
        }
        QuizPhase::Complete => {}
    }
}
