//! The slideshow: an ordered deck of slides with an explicit transition
//! state machine. Navigation begins a transition; the frontend commits
//! it once its animation finishes, so slides can never skip ahead of
//! what's on screen.

/// A slide in the Wrapped sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    Welcome,
    TopArtistsRecent,
    TopArtistsAllTime,
    TopTracksAllTime,
    /// The "but wait, there's more" teaser before the countdown.
    CountdownIntro,
    /// One track of the top-3 countdown. `rank` is 1 for the #1 track.
    CountdownTrack { rank: usize },
    /// The #1 reveal celebration.
    Finale,
    GameIntro,
    Game,
    GameResults,
    Recap,
}

/// Build the slide sequence for the current data. The welcome slide is
/// always present; content slides require wrap data, and the results
/// slide only appears once a game has been scored.
pub fn slide_sequence(has_wrap_data: bool, has_game_score: bool) -> Vec<Slide> {
    let mut slides = vec![Slide::Welcome];
    if !has_wrap_data {
        return slides;
    }
    slides.extend([
        Slide::TopArtistsRecent,
        Slide::TopArtistsAllTime,
        Slide::TopTracksAllTime,
        Slide::CountdownIntro,
        Slide::CountdownTrack { rank: 3 },
        Slide::CountdownTrack { rank: 2 },
        Slide::CountdownTrack { rank: 1 },
        Slide::Finale,
        Slide::GameIntro,
        Slide::Game,
    ]);
    if has_game_score {
        slides.push(Slide::GameResults);
    }
    slides.push(Slide::Recap);
    slides
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Where the deck is in a slide change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    #[default]
    Idle,
    /// Animating towards `target` (1-based).
    Animating { direction: Direction, target: usize },
}

/// Position within the slideshow. Slide numbers are 1-based to match
/// the on-screen progress indicator.
#[derive(Debug, Clone, Copy)]
pub struct SlideDeck {
    current: usize,
    transition: Transition,
}

impl Default for SlideDeck {
    fn default() -> Self {
        Self {
            current: 1,
            transition: Transition::Idle,
        }
    }
}

impl SlideDeck {
    /// The slide currently shown, 1-based.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn is_animating(&self) -> bool {
        self.transition != Transition::Idle
    }

    /// Begin moving to the next slide. No-op on the last slide or while
    /// a transition is already running.
    pub fn begin_next(&mut self, slide_count: usize) {
        if self.is_animating() || self.current >= slide_count {
            return;
        }
        self.transition = Transition::Animating {
            direction: Direction::Forward,
            target: self.current + 1,
        };
    }

    /// Begin moving to the previous slide. No-op on the first slide or
    /// while a transition is already running.
    pub fn begin_previous(&mut self) {
        if self.is_animating() || self.current <= 1 {
            return;
        }
        self.transition = Transition::Animating {
            direction: Direction::Backward,
            target: self.current - 1,
        };
    }

    /// Commit the in-flight transition. Called by the frontend when its
    /// animation completes; no-op when idle.
    pub fn complete_transition(&mut self) {
        if let Transition::Animating { target, .. } = self.transition {
            self.current = target;
            self.transition = Transition::Idle;
        }
    }

    /// Keep the position valid after the sequence changes length (wrap
    /// data cleared, results slide appearing). Cancels any transition
    /// aimed past the end.
    pub fn clamp_to(&mut self, slide_count: usize) {
        let slide_count = slide_count.max(1);
        if self.current > slide_count {
            self.current = slide_count;
        }
        if let Transition::Animating { target, .. } = self.transition
            && target > slide_count
        {
            self.transition = Transition::Idle;
        }
    }

    /// Jump straight back to the first slide with no animation.
    pub fn reset(&mut self) {
        self.current = 1;
        self.transition = Transition::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_shapes() {
        assert_eq!(slide_sequence(false, false), vec![Slide::Welcome]);

        let full = slide_sequence(true, false);
        assert_eq!(full.first(), Some(&Slide::Welcome));
        assert_eq!(full.last(), Some(&Slide::Recap));
        assert!(!full.contains(&Slide::GameResults));
        assert_eq!(full.len(), 12);

        let scored = slide_sequence(true, true);
        assert!(scored.contains(&Slide::GameResults));
        assert_eq!(scored.len(), 13);
    }

    #[test]
    fn test_countdown_order() {
        let slides = slide_sequence(true, false);
        let ranks: Vec<usize> = slides
            .iter()
            .filter_map(|slide| match slide {
                Slide::CountdownTrack { rank } => Some(*rank),
                _ => None,
            })
            .collect();
        assert_eq!(ranks, vec![3, 2, 1]);
    }

    #[test]
    fn test_navigation_waits_for_animation() {
        let mut deck = SlideDeck::default();
        deck.begin_next(5);
        assert_eq!(
            deck.transition(),
            Transition::Animating {
                direction: Direction::Forward,
                target: 2
            }
        );
        // Still on slide 1 until the animation completes.
        assert_eq!(deck.current(), 1);
        // Further navigation while animating is ignored.
        deck.begin_next(5);
        deck.begin_previous();
        assert_eq!(deck.current(), 1);

        deck.complete_transition();
        assert_eq!(deck.current(), 2);
        assert!(!deck.is_animating());
    }

    #[test]
    fn test_bounds_are_noops() {
        let mut deck = SlideDeck::default();
        deck.begin_previous();
        assert!(!deck.is_animating());

        deck.begin_next(1);
        assert!(!deck.is_animating());

        deck.begin_next(2);
        deck.complete_transition();
        deck.begin_next(2);
        assert!(!deck.is_animating());
        assert_eq!(deck.current(), 2);
    }

    #[test]
    fn test_clamp_cancels_out_of_range_transition() {
        let mut deck = SlideDeck::default();
        deck.begin_next(13);
        deck.complete_transition();
        deck.begin_next(13);
        // The sequence shrinks to just the welcome slide (data cleared).
        deck.clamp_to(1);
        assert_eq!(deck.current(), 1);
        assert!(!deck.is_animating());
    }
}
