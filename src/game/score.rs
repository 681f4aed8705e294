// Couleurs – A colour-naming game for young children
// Copyright (C) 2023  The Couleurs authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub(crate) correct: u32,
    attempts: u32,
}

impl Score {
    pub fn new() -> Score {
        Score::default()
    }

    pub fn record(&mut self, correct: bool) {
        self.attempts = self.attempts.saturating_add(1);

        if correct {
            // Can’t overtake attempts because that saturates first
            self.correct = self.correct.saturating_add(1).min(self.attempts);
        }
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Score: {} / {}", self.correct, self.attempts)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record() {
        let mut score = Score::new();

        assert_eq!(score.to_string(), "Score: 0 / 0");

        score.record(true);
        score.record(false);
        score.record(true);

        assert_eq!(score.correct(), 2);
        assert_eq!(score.attempts(), 3);
        assert_eq!(score.to_string(), "Score: 2 / 3");
    }

    #[test]
    fn saturates() {
        let mut score = Score { correct: u32::MAX - 1, attempts: u32::MAX - 1 };

        score.record(true);
        score.record(true);

        assert_eq!(score.attempts(), u32::MAX);
        assert_eq!(score.correct(), u32::MAX);
        assert!(score.correct() <= score.attempts());
    }
}
