use std::ops::RangeInclusive;

use rand::Rng;

pub const GUESS_RANGE: RangeInclusive<u32> = 1..=100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessFeedback {
    /// Not a number in range. No attempt is consumed.
    Invalid,
    /// The secret is higher than the guess.
    Up,
    /// The secret is lower than the guess.
    Down,
    Correct { attempts: u32 },
}

impl GuessFeedback {
    /// Every message addresses the player by name when one is known.
    pub fn message(self, name: Option<&str>) -> String {
        let to = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| format!(", {name}"))
            .unwrap_or_default();
        match self {
            GuessFeedback::Invalid => format!(
                "Enter a number between {} and {}{to}.",
                GUESS_RANGE.start(),
                GUESS_RANGE.end()
            ),
            GuessFeedback::Up => format!("UP{to}! Try a bigger number."),
            GuessFeedback::Down => format!("DOWN{to}! Try a smaller number."),
            GuessFeedback::Correct { attempts } => {
                format!("Correct{to}! You got it in {attempts} tries.")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpDownGame {
    target: u32,
    attempts: u32,
    solved: bool,
    last: Option<GuessFeedback>,
}

impl UpDownGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_target(rng.gen_range(GUESS_RANGE))
    }

    pub fn with_target(target: u32) -> Self {
        Self {
            target: target.clamp(*GUESS_RANGE.start(), *GUESS_RANGE.end()),
            attempts: 0,
            solved: false,
            last: None,
        }
    }

    pub fn guess_text(&mut self, input: &str) -> GuessFeedback {
        match input.trim().parse::<u32>() {
            Ok(value) => self.guess(value),
            Err(_) => self.record(GuessFeedback::Invalid),
        }
    }

    /// Once solved, guesses are ignored until [`UpDownGame::reset`].
    pub fn guess(&mut self, value: u32) -> GuessFeedback {
        if self.solved {
            return GuessFeedback::Correct {
                attempts: self.attempts,
            };
        }
        if !GUESS_RANGE.contains(&value) {
            return self.record(GuessFeedback::Invalid);
        }

        self.attempts += 1;
        let feedback = match value.cmp(&self.target) {
            std::cmp::Ordering::Less => GuessFeedback::Up,
            std::cmp::Ordering::Greater => GuessFeedback::Down,
            std::cmp::Ordering::Equal => {
                self.solved = true;
                GuessFeedback::Correct {
                    attempts: self.attempts,
                }
            }
        };
        self.record(feedback)
    }

    fn record(&mut self, feedback: GuessFeedback) -> GuessFeedback {
        self.last = Some(feedback);
        feedback
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(rng);
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn last_feedback(&self) -> Option<GuessFeedback> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn feedback_points_toward_target() {
        let mut game = UpDownGame::with_target(42);
        assert_eq!(game.guess(10), GuessFeedback::Up);
        assert_eq!(game.guess(90), GuessFeedback::Down);
        assert_eq!(game.guess(42), GuessFeedback::Correct { attempts: 3 });
        assert!(game.is_solved());
    }

    #[test]
    fn invalid_input_does_not_consume_attempts() {
        let mut game = UpDownGame::with_target(7);
        assert_eq!(game.guess_text("seven"), GuessFeedback::Invalid);
        assert_eq!(game.guess_text("0"), GuessFeedback::Invalid);
        assert_eq!(game.guess_text("101"), GuessFeedback::Invalid);
        assert_eq!(game.guess_text("-4"), GuessFeedback::Invalid);
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.guess_text(" 7 "), GuessFeedback::Correct { attempts: 1 });
    }

    #[test]
    fn guesses_after_win_are_ignored_until_reset() {
        let mut game = UpDownGame::with_target(50);
        game.guess(50);
        assert_eq!(game.guess(1), GuessFeedback::Correct { attempts: 1 });
        assert_eq!(game.attempts(), 1);

        let mut rng = StdRng::seed_from_u64(4);
        game.reset(&mut rng);
        assert!(!game.is_solved());
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.last_feedback(), None);
    }

    #[test]
    fn random_targets_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let mut game = UpDownGame::new(&mut rng);
            let solved = (1..=100).any(|value| {
                matches!(game.guess(value), GuessFeedback::Correct { .. })
            });
            assert!(solved);
        }
    }

    #[test]
    fn correct_message_uses_profile_name() {
        let feedback = GuessFeedback::Correct { attempts: 4 };
        assert_eq!(
            feedback.message(Some("Jung")),
            "Correct, Jung! You got it in 4 tries."
        );
        assert_eq!(feedback.message(Some("")), "Correct! You got it in 4 tries.");
    }

    #[test]
    fn hints_are_personalized_when_a_name_is_known() {
        assert_eq!(
            GuessFeedback::Up.message(Some("Jung")),
            "UP, Jung! Try a bigger number."
        );
        assert_eq!(
            GuessFeedback::Down.message(Some("Jung")),
            "DOWN, Jung! Try a smaller number."
        );
        assert_eq!(
            GuessFeedback::Invalid.message(Some("Jung")),
            "Enter a number between 1 and 100, Jung."
        );
        assert_eq!(GuessFeedback::Up.message(None), "UP! Try a bigger number.");
    }
}
