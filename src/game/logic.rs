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
use super::catalog::{ColorEntry, Language, Level};
use super::config::Config;
use super::random::RandomSource;
use super::round::{self, Round};
use super::score::Score;
use super::timeout::Timeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Say a colour and let the player find it among the swatches
    Quiz,
    /// Show one colour at a time and say its name
    Flashcards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    RoundActive,
    Evaluated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    RoundStarted,
    AnswerChecked(bool),
    ScoreChanged,
    NextRoundScheduled {
        sequence: u32,
        delay: Timeout,
    },
    GameStopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    NoActiveRound,
    WrongMode,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NoActiveRound => write!(f, "No round is waiting for an answer"),
            Error::WrongMode => write!(f, "Not available in this game mode"),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub correct: bool,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language_tag: &'static str,
    pub rate: f32,
}

pub struct Logic {
    mode: Mode,
    level: Level,
    language: Language,
    next_round_delay: i64,
    speech_rate: f32,
    random: Box<dyn RandomSource>,

    state: State,
    score: Score,
    round: Option<Round<'static>>,
    card: Option<&'static ColorEntry>,
    last_answer: Option<bool>,
    // Incremented every time a round starts so that a timer set up
    // for an earlier round can be recognised and ignored
    sequence: u32,

    round_started_queued: bool,
    answer_checked_queued: Option<bool>,
    score_changed_queued: bool,
    next_round_queued: bool,
    game_stopped_queued: bool,
}

impl Logic {
    pub fn new(
        mode: Mode,
        config: &Config,
        random: Box<dyn RandomSource>,
    ) -> Logic {
        Logic {
            mode,
            level: config.game.level,
            language: config.game.language,
            next_round_delay: config.game.next_round_delay_ms,
            speech_rate: config.speech.rate,
            random,
            state: State::Idle,
            score: Score::new(),
            round: None,
            card: None,
            last_answer: None,
            sequence: 0,
            round_started_queued: false,
            answer_checked_queued: None,
            score_changed_queued: false,
            next_round_queued: false,
            game_stopped_queued: false,
        }
    }

    /// Starts a new game, or restarts the current one with a fresh
    /// score.
    pub fn reset(&mut self) {
        self.score = Score::new();
        self.score_changed_queued = true;
        self.answer_checked_queued = None;
        self.next_round_queued = false;
        self.game_stopped_queued = false;
        self.card = None;

        self.start_round();
    }

    /// Ends the game and goes back to idle. The score is kept until the
    /// next reset and any pending next-round timer becomes stale.
    pub fn stop(&mut self) {
        if self.state == State::Idle {
            return;
        }

        self.sequence = self.sequence.wrapping_add(1);
        self.state = State::Idle;
        self.round = None;
        self.card = None;
        self.last_answer = None;

        self.round_started_queued = false;
        self.answer_checked_queued = None;
        self.next_round_queued = false;
        self.game_stopped_queued = true;
    }

    fn start_round(&mut self) {
        self.sequence = self.sequence.wrapping_add(1);

        match self.mode {
            Mode::Quiz => {
                let round = Round::generate(
                    self.level,
                    None,
                    self.random.as_mut(),
                );

                log::debug!(
                    "round {}: {} among {} options",
                    self.sequence,
                    round.target().name(Language::En),
                    round.options().len(),
                );

                self.round = Some(round);
            },
            Mode::Flashcards => {
                let card = round::pick_level_color(
                    self.level,
                    self.card,
                    self.random.as_mut(),
                );

                log::debug!(
                    "card {}: {}",
                    self.sequence,
                    card.name(Language::En),
                );

                self.card = Some(card);
            },
        }

        self.state = State::RoundActive;
        self.last_answer = None;
        self.next_round_queued = false;
        self.round_started_queued = true;
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;

        if self.state != State::Idle {
            self.reset();
        }
    }

    /// Changes the language. A round that is still waiting for an
    /// answer gets announced again in the new language.
    pub fn set_language(&mut self, language: Language) {
        if language == self.language {
            return;
        }

        self.language = language;

        if self.state == State::RoundActive {
            self.round_started_queued = true;
        }
    }

    pub fn evaluate_answer(&mut self, hex: u32) -> Result<Answer, Error> {
        if self.state != State::RoundActive {
            return Err(Error::NoActiveRound);
        }

        let Some(round) = self.round.as_ref()
        else {
            return Err(Error::NoActiveRound);
        };

        let correct = round.is_target(hex);

        self.score.record(correct);
        self.state = State::Evaluated;
        self.last_answer = Some(correct);

        self.answer_checked_queued = Some(correct);
        self.score_changed_queued = true;
        self.next_round_queued = true;

        log::debug!("answer {:06x} is {}", hex, if correct { "right" } else { "wrong" });

        Ok(Answer { correct, score: self.score })
    }

    /// Called when the delay after an answer has passed. Returns
    /// whether a new round was started, which only happens if
    /// `sequence` still refers to the current round.
    pub fn next_round_due(&mut self, sequence: u32) -> bool {
        if self.state != State::Evaluated || sequence != self.sequence {
            log::debug!("ignoring stale timer for round {}", sequence);
            return false;
        }

        self.start_round();

        true
    }

    pub fn next_card(&mut self) -> Result<(), Error> {
        if self.mode != Mode::Flashcards {
            return Err(Error::WrongMode);
        }

        self.start_round();

        Ok(())
    }

    pub fn get_event(&mut self) -> Option<Event> {
        if let Some(correct) = self.answer_checked_queued.take() {
            Some(Event::AnswerChecked(correct))
        } else if self.game_stopped_queued {
            self.game_stopped_queued = false;
            Some(Event::GameStopped)
        } else if self.score_changed_queued {
            self.score_changed_queued = false;
            Some(Event::ScoreChanged)
        } else if self.round_started_queued {
            self.round_started_queued = false;
            Some(Event::RoundStarted)
        } else if self.next_round_queued {
            self.next_round_queued = false;
            Some(Event::NextRoundScheduled {
                sequence: self.sequence,
                delay: self.next_round_delay(),
            })
        } else {
            None
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn round(&self) -> Option<&Round<'static>> {
        self.round.as_ref()
    }

    /// The colour currently being asked for or shown
    pub fn target(&self) -> Option<&'static ColorEntry> {
        match self.mode {
            Mode::Quiz => self.round.as_ref().map(Round::target),
            Mode::Flashcards => self.card,
        }
    }

    /// Swatches to offer the player. Empty in flashcard mode.
    pub fn options(&self) -> &[&'static ColorEntry] {
        match self.round {
            Some(ref round) => round.options(),
            None => &[],
        }
    }

    pub fn next_round_delay(&self) -> Timeout {
        Timeout::Milliseconds(self.next_round_delay)
    }

    pub fn instruction(&self) -> Option<String> {
        let name = self.target()?.name(self.language);

        Some(match (self.mode, self.language) {
            (Mode::Quiz, Language::Fr) => format!("Trouve {} !", name),
            (Mode::Quiz, Language::En) => format!("Find {} !", name),
            (Mode::Flashcards, _) => name.to_string(),
        })
    }

    pub fn utterance(&self) -> Option<Utterance> {
        let target = self.target()?;

        Some(Utterance {
            text: target.name(self.language).to_string(),
            language_tag: self.language.speech_tag(),
            rate: self.speech_rate,
        })
    }

    pub fn feedback(&self) -> Option<&'static str> {
        let correct = self.last_answer?;

        Some(match (correct, self.language) {
            (true, Language::Fr) => "Bravo ! C’est réussi !",
            (true, Language::En) => "Correct! Well done!",
            (false, Language::Fr) => "Essaie encore !",
            (false, Language::En) => "Try again!",
        })
    }

    pub fn score_text(&self) -> String {
        self.score.to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::catalog::COLORS;
    use super::super::random::test_source::SeededRandom;

    fn make_logic(mode: Mode, level: Level) -> Logic {
        let mut config = Config::default();
        config.game.level = level;

        Logic::new(mode, &config, Box::new(SeededRandom::new(42)))
    }

    fn drain_events(logic: &mut Logic) -> Vec<Event> {
        std::iter::from_fn(|| logic.get_event()).collect()
    }

    fn wrong_hex(logic: &Logic) -> u32 {
        let target = logic.target().unwrap();

        logic.options()
            .iter()
            .find(|c| c.hex != target.hex)
            .unwrap()
            .hex
    }

    #[test]
    fn starts_idle() {
        let mut logic = make_logic(Mode::Quiz, Level::Beginner);

        assert_eq!(logic.state(), State::Idle);
        assert!(logic.target().is_none());
        assert!(logic.options().is_empty());
        assert!(logic.instruction().is_none());
        assert!(drain_events(&mut logic).is_empty());

        assert_eq!(
            logic.evaluate_answer(COLORS[0].hex),
            Err(Error::NoActiveRound),
        );
        assert_eq!(logic.score(), Score::new());
    }

    #[test]
    fn reset_starts_round() {
        let mut logic = make_logic(Mode::Quiz, Level::Intermediate);

        logic.reset();

        assert_eq!(logic.state(), State::RoundActive);
        assert_eq!(logic.options().len(), 6);
        assert!(logic.options().contains(&logic.target().unwrap()));
        assert_eq!(
            drain_events(&mut logic),
            [Event::ScoreChanged, Event::RoundStarted],
        );
    }

    #[test]
    fn correct_answer() {
        let mut logic = make_logic(Mode::Quiz, Level::Beginner);

        logic.reset();
        drain_events(&mut logic);

        let target = logic.target().unwrap();
        let answer = logic.evaluate_answer(target.hex).unwrap();

        assert!(answer.correct);
        assert_eq!(answer.score.correct(), 1);
        assert_eq!(answer.score.attempts(), 1);
        assert_eq!(logic.state(), State::Evaluated);
        assert_eq!(logic.score_text(), "Score: 1 / 1");
        assert_eq!(logic.feedback(), Some("Bravo ! C’est réussi !"));

        assert_eq!(
            drain_events(&mut logic),
            [
                Event::AnswerChecked(true),
                Event::ScoreChanged,
                Event::NextRoundScheduled {
                    sequence: logic.sequence(),
                    delay: Timeout::Milliseconds(1500),
                },
            ],
        );
    }

    #[test]
    fn wrong_answer() {
        let mut logic = make_logic(Mode::Quiz, Level::Beginner);

        logic.reset();
        logic.set_language(Language::En);

        let answer = logic.evaluate_answer(wrong_hex(&logic)).unwrap();

        assert!(!answer.correct);
        assert_eq!(answer.score.correct(), 0);
        assert_eq!(answer.score.attempts(), 1);
        assert_eq!(logic.feedback(), Some("Try again!"));
    }

    #[test]
    fn second_answer_rejected() {
        let mut logic = make_logic(Mode::Quiz, Level::Beginner);

        logic.reset();

        let target = logic.target().unwrap();

        assert!(logic.evaluate_answer(target.hex).is_ok());
        assert_eq!(
            logic.evaluate_answer(target.hex),
            Err(Error::NoActiveRound),
        );
        assert_eq!(
            logic.evaluate_answer(wrong_hex(&logic)),
            Err(Error::NoActiveRound),
        );

        assert_eq!(logic.score().correct(), 1);
        assert_eq!(logic.score().attempts(), 1);
    }

    #[test]
    fn next_round() {
        let mut logic = make_logic(Mode::Quiz, Level::Advanced);

        logic.reset();

        // Nothing to do until the round has been answered
        assert!(!logic.next_round_due(logic.sequence()));

        logic.evaluate_answer(wrong_hex(&logic)).unwrap();
        drain_events(&mut logic);

        let sequence = logic.sequence();

        assert!(!logic.next_round_due(sequence + 1));
        assert_eq!(logic.state(), State::Evaluated);

        assert!(logic.next_round_due(sequence));
        assert_eq!(logic.state(), State::RoundActive);
        assert_eq!(logic.sequence(), sequence + 1);
        assert!(logic.feedback().is_none());
        assert_eq!(logic.options().len(), 8);
        assert_eq!(drain_events(&mut logic), [Event::RoundStarted]);

        // The same timer firing twice doesn’t skip a round
        assert!(!logic.next_round_due(sequence));
        assert_eq!(logic.sequence(), sequence + 1);
    }

    #[test]
    fn stale_timer_after_reset() {
        let mut logic = make_logic(Mode::Quiz, Level::Beginner);

        logic.reset();
        logic.evaluate_answer(wrong_hex(&logic)).unwrap();

        let stale = logic.sequence();

        logic.set_level(Level::Intermediate);

        assert_eq!(logic.score(), Score::new());
        assert_eq!(logic.state(), State::RoundActive);
        assert_eq!(logic.options().len(), 6);
        // The pending timer event was dropped along with the old round
        assert!(!drain_events(&mut logic)
                .iter()
                .any(|e| matches!(e, Event::NextRoundScheduled { .. })));

        let target = logic.target().unwrap();
        logic.evaluate_answer(target.hex).unwrap();

        assert!(!logic.next_round_due(stale));
        assert_eq!(logic.state(), State::Evaluated);
    }

    #[test]
    fn stop_returns_to_idle() {
        let mut logic = make_logic(Mode::Quiz, Level::Beginner);

        logic.reset();
        let hex = logic.target().unwrap().hex;
        logic.evaluate_answer(hex).unwrap();

        let Some(Event::NextRoundScheduled { sequence, .. }) =
            drain_events(&mut logic).pop()
        else {
            unreachable!();
        };

        logic.stop();

        assert_eq!(logic.state(), State::Idle);
        assert!(logic.target().is_none());
        assert!(logic.options().is_empty());
        assert_eq!(drain_events(&mut logic), [Event::GameStopped]);

        // The timer from before the stop must not start a round
        assert!(!logic.next_round_due(sequence));
        assert_eq!(logic.state(), State::Idle);
        assert_eq!(
            logic.evaluate_answer(hex),
            Err(Error::NoActiveRound),
        );
        assert_eq!(logic.score().correct, 1);

        // Stopping twice does nothing
        logic.stop();
        assert!(drain_events(&mut logic).is_empty());

        // Level changes while stopped are only recorded
        logic.set_level(Level::Advanced);
        assert_eq!(logic.state(), State::Idle);

        logic.reset();
        assert_eq!(logic.state(), State::RoundActive);
        assert_eq!(logic.options().len(), 8);
        assert_eq!(logic.score(), Score::new());
    }

    #[test]
    fn level_before_start() {
        let mut logic = make_logic(Mode::Quiz, Level::Beginner);

        logic.set_level(Level::Advanced);

        assert_eq!(logic.state(), State::Idle);
        assert_eq!(logic.level(), Level::Advanced);

        logic.reset();

        assert_eq!(logic.options().len(), 8);
    }

    #[test]
    fn language_change() {
        let mut logic = make_logic(Mode::Quiz, Level::Beginner);

        logic.reset();
        drain_events(&mut logic);

        let target = logic.target().unwrap();

        assert_eq!(
            logic.instruction().unwrap(),
            format!("Trouve {} !", target.name(Language::Fr)),
        );

        logic.set_language(Language::En);

        assert_eq!(
            logic.instruction().unwrap(),
            format!("Find {} !", target.name(Language::En)),
        );
        assert_eq!(drain_events(&mut logic), [Event::RoundStarted]);

        let utterance = logic.utterance().unwrap();
        assert_eq!(utterance.text, target.name(Language::En));
        assert_eq!(utterance.language_tag, "en-US");
        assert_eq!(utterance.rate, 0.9);

        // Same language again does nothing
        logic.set_language(Language::En);
        assert!(drain_events(&mut logic).is_empty());

        // Once answered there is nothing to announce again
        logic.evaluate_answer(target.hex).unwrap();
        drain_events(&mut logic);
        logic.set_language(Language::Fr);
        assert!(drain_events(&mut logic).is_empty());
    }

    #[test]
    fn flashcards() {
        let mut logic = make_logic(Mode::Flashcards, Level::Beginner);

        assert_eq!(logic.next_card(), Ok(()));

        assert!(logic.options().is_empty());

        let mut previous = logic.target().unwrap();

        assert_eq!(logic.instruction().unwrap(), previous.name(Language::Fr));
        assert_eq!(
            logic.evaluate_answer(previous.hex),
            Err(Error::NoActiveRound),
        );

        for _ in 0..50 {
            drain_events(&mut logic);
            logic.next_card().unwrap();

            let card = logic.target().unwrap();

            assert_ne!(card.hex, previous.hex);
            assert!(Level::Beginner.colors().contains(card));
            assert_eq!(drain_events(&mut logic), [Event::RoundStarted]);

            previous = card;
        }

        assert_eq!(logic.score(), Score::new());
    }

    #[test]
    fn next_card_in_quiz() {
        let mut logic = make_logic(Mode::Quiz, Level::Beginner);

        assert_eq!(logic.next_card(), Err(Error::WrongMode));
        assert_eq!(logic.state(), State::Idle);
    }

    #[test]
    fn many_rounds_keep_invariants() {
        let mut logic = make_logic(Mode::Quiz, Level::Advanced);

        logic.reset();

        for i in 0..300 {
            let target = logic.target().unwrap();
            let hex = if i % 3 == 0 { wrong_hex(&logic) } else { target.hex };

            logic.evaluate_answer(hex).unwrap();

            let score = logic.score();
            assert!(score.correct() <= score.attempts());
            assert_eq!(score.attempts(), i + 1);

            assert!(logic.next_round_due(logic.sequence()));
        }

        assert_eq!(logic.score().correct(), 200);
    }
}
