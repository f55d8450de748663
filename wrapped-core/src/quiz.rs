//! The release-year guessing game played mid-slideshow. Three rounds,
//! four year options each, one point per exact guess.

use rand::{Rng, seq::SliceRandom};

use wrapped_state::Track;

/// Number of rounds in a game.
pub const ROUND_COUNT: usize = 3;
/// Number of year options offered per round.
pub const OPTION_COUNT: usize = 4;
/// Decoy years are never earlier than this.
pub const MIN_YEAR: i32 = 1950;

/// The upper bound for decoy years.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}

/// Why a game could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Fewer than [`ROUND_COUNT`] tracks had a parseable release year.
    NotEnoughTracks { available: usize },
}
impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::NotEnoughTracks { available } => write!(
                f,
                "need {ROUND_COUNT} tracks with release years, only {available} available"
            ),
        }
    }
}
impl std::error::Error for QuizError {}

/// One question: which year was this track released?
#[derive(Debug, Clone)]
pub struct Round {
    /// Index into the track list the game was built from.
    pub track_index: usize,
    /// The year options, shuffled. Always [`OPTION_COUNT`] long.
    pub options: Vec<i32>,
    /// The option the player picked, if any.
    pub selected: Option<i32>,
    correct_year: i32,
}
impl Round {
    pub fn correct_year(&self) -> i32 {
        self.correct_year
    }
}

/// The result of answering a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Correct,
    Incorrect { actual_year: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for the player to pick an option.
    Guessing,
    /// Showing right/wrong feedback before the next round.
    Feedback,
    /// All rounds played; the score has been reported.
    Complete,
}

/// A single play-through of the guessing game.
#[derive(Debug, Clone)]
pub struct GameSession {
    rounds: Vec<Round>,
    current_round: usize,
    score: u32,
    phase: QuizPhase,
    score_reported: bool,
}

impl GameSession {
    /// Build a game from the player's top tracks. Picks [`ROUND_COUNT`]
    /// distinct tracks at random among those with a parseable release
    /// year; errors if there aren't enough.
    pub fn new(
        tracks: &[Track],
        current_year: i32,
        rng: &mut impl Rng,
    ) -> Result<Self, QuizError> {
        let mut eligible: Vec<(usize, i32)> = tracks
            .iter()
            .enumerate()
            .filter_map(|(index, track)| track.release_year().map(|year| (index, year)))
            .collect();
        if eligible.len() < ROUND_COUNT {
            return Err(QuizError::NotEnoughTracks {
                available: eligible.len(),
            });
        }
        eligible.shuffle(rng);

        let rounds = eligible
            .into_iter()
            .take(ROUND_COUNT)
            .map(|(track_index, year)| Round {
                track_index,
                options: year_options(year, current_year, rng),
                selected: None,
                correct_year: year,
            })
            .collect();

        Ok(Self {
            rounds,
            current_round: 0,
            score: 0,
            phase: QuizPhase::Guessing,
            score_reported: false,
        })
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 1-based round number for display.
    pub fn round_number(&self) -> usize {
        (self.current_round + 1).min(ROUND_COUNT)
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.get(self.current_round)
    }

    /// Answer the current round. No-op (returns None) unless the game is
    /// waiting for a guess; a round can only be answered once.
    pub fn select_answer(&mut self, year: i32) -> Option<RoundOutcome> {
        if self.phase != QuizPhase::Guessing {
            return None;
        }
        let round = self.rounds.get_mut(self.current_round)?;
        round.selected = Some(year);
        self.phase = QuizPhase::Feedback;
        if year == round.correct_year {
            self.score += 1;
            Some(RoundOutcome::Correct)
        } else {
            Some(RoundOutcome::Incorrect {
                actual_year: round.correct_year,
            })
        }
    }

    /// Move past the feedback screen. On the final round this completes
    /// the game and returns the score, exactly once.
    pub fn advance(&mut self) -> Option<u32> {
        if self.phase != QuizPhase::Feedback {
            return None;
        }
        self.current_round += 1;
        if self.current_round < ROUND_COUNT {
            self.phase = QuizPhase::Guessing;
            return None;
        }
        self.phase = QuizPhase::Complete;
        if self.score_reported {
            return None;
        }
        self.score_reported = true;
        Some(self.score)
    }
}

/// Build the shuffled option list for a round: the actual year plus up
/// to three decoys offset by 1..=3 years either way, keeping decoys
/// after [`MIN_YEAR`] and never in the future.
fn year_options(actual: i32, current_year: i32, rng: &mut impl Rng) -> Vec<i32> {
    let mut decoys: Vec<i32> = (1..=3i32)
        .flat_map(|offset| [actual - offset, actual + offset])
        .filter(|year| *year > MIN_YEAR && *year <= current_year)
        .collect();
    decoys.shuffle(rng);
    decoys.truncate(OPTION_COUNT - 1);

    let mut options = decoys;
    options.push(actual);
    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use wrapped_state::{Album, Track, TrackArtist, TrackId};

    fn track(name: &str, release_date: &str) -> Track {
        Track {
            id: TrackId(name.to_string()),
            name: name.to_string(),
            album: Album {
                name: format!("{name} (album)"),
                release_date: release_date.to_string(),
                images: vec![],
            },
            artists: vec![TrackArtist {
                name: "Artist".to_string(),
            }],
            preview_url: None,
        }
    }

    fn tracks() -> Vec<Track> {
        vec![
            track("one", "1999-03-01"),
            track("two", "2004"),
            track("three", "2015-11-20"),
            track("four", "2021-01-01"),
        ]
    }

    #[test]
    fn test_needs_three_dated_tracks() {
        let mut rng = StdRng::seed_from_u64(0);
        let sparse = vec![track("a", "1999"), track("b", ""), track("c", "unknown")];
        let error = GameSession::new(&sparse, 2024, &mut rng).unwrap_err();
        assert_eq!(error, QuizError::NotEnoughTracks { available: 1 });
    }

    #[test]
    fn test_options_contain_answer_and_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let game = GameSession::new(&tracks(), 2024, &mut rng).unwrap();
            for round in &game.rounds {
                assert!(round.options.contains(&round.correct_year()));
                assert!(round.options.len() <= OPTION_COUNT);
                assert!(round.options.len() >= 2);
                for option in &round.options {
                    assert!(*option > MIN_YEAR);
                    assert!(*option <= 2024);
                }
            }
        }
    }

    #[test]
    fn test_scoring_and_progression() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = GameSession::new(&tracks(), 2024, &mut rng).unwrap();

        // Round 1: correct.
        let correct = game.current_round().unwrap().correct_year();
        assert_eq!(game.select_answer(correct), Some(RoundOutcome::Correct));
        assert_eq!(game.phase(), QuizPhase::Feedback);
        // Answering again during feedback is ignored.
        assert_eq!(game.select_answer(correct), None);
        assert_eq!(game.score(), 1);
        assert_eq!(game.advance(), None);

        // Round 2: wrong.
        let correct = game.current_round().unwrap().correct_year();
        assert_eq!(
            game.select_answer(correct - 1),
            Some(RoundOutcome::Incorrect {
                actual_year: correct
            })
        );
        assert_eq!(game.score(), 1);
        assert_eq!(game.advance(), None);

        // Round 3: correct. Final advance reports the score exactly once.
        let correct = game.current_round().unwrap().correct_year();
        assert_eq!(game.select_answer(correct), Some(RoundOutcome::Correct));
        assert_eq!(game.advance(), Some(2));
        assert_eq!(game.phase(), QuizPhase::Complete);
        assert_eq!(game.advance(), None);
        assert_eq!(game.select_answer(correct), None);
    }

    #[test]
    fn test_advance_is_noop_while_guessing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = GameSession::new(&tracks(), 2024, &mut rng).unwrap();
        assert_eq!(game.advance(), None);
        assert_eq!(game.phase(), QuizPhase::Guessing);
        assert_eq!(game.round_number(), 1);
    }
}
