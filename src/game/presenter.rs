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

use super::logic::{Event, Logic, Utterance};
use super::sounds::Sound;
use super::timeout::Timeout;

/// What a front end needs to provide to show the game. Speech and
/// sounds are fire-and-forget: failures should be logged by the
/// implementation and never reported back.
pub trait Presenter {
    fn show_round(&mut self, logic: &Logic);
    fn show_feedback(&mut self, logic: &Logic, correct: bool);
    fn show_score(&mut self, logic: &Logic);
    fn speak(&mut self, utterance: &Utterance);
    fn play_sound(&mut self, sound: Sound);
    /// Arrange for `Logic::next_round_due(sequence)` to be called
    /// after `delay`. Any previously scheduled call can be dropped.
    fn schedule_next_round(&mut self, sequence: u32, delay: Timeout);
    fn cancel_next_round(&mut self);
}

/// Passes all of the queued logic events on to the presenter.
/// Returns whether anything visible changed.
pub fn flush_events(logic: &mut Logic, presenter: &mut impl Presenter) -> bool {
    let mut redraw_queued = false;

    while let Some(event) = logic.get_event() {
        match event {
            Event::RoundStarted => {
                presenter.cancel_next_round();
                presenter.show_round(logic);

                if let Some(utterance) = logic.utterance() {
                    presenter.speak(&utterance);
                }

                redraw_queued = true;
            },
            Event::AnswerChecked(correct) => {
                presenter.show_feedback(logic, correct);
                presenter.play_sound(Sound::for_answer(correct));
                redraw_queued = true;
            },
            Event::ScoreChanged => {
                presenter.show_score(logic);
                redraw_queued = true;
            },
            Event::NextRoundScheduled { sequence, delay } => {
                presenter.schedule_next_round(sequence, delay);
            },
            Event::GameStopped => {
                presenter.cancel_next_round();
                presenter.show_round(logic);
                redraw_queued = true;
            },
        }
    }

    redraw_queued
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::catalog::Level;
    use super::super::config::Config;
    use super::super::logic::Mode;
    use super::super::random::test_source::SeededRandom;

    #[derive(Debug, PartialEq)]
    enum Call {
        Round(String),
        Feedback(&'static str),
        Score(String),
        Speak(String, &'static str),
        Sound(Sound),
        Schedule(u32, Timeout),
        Cancel,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Presenter for Recorder {
        fn show_round(&mut self, logic: &Logic) {
            self.calls.push(
                Call::Round(logic.instruction().unwrap_or_default()),
            );
        }

        fn show_feedback(&mut self, logic: &Logic, _correct: bool) {
            self.calls.push(Call::Feedback(logic.feedback().unwrap()));
        }

        fn show_score(&mut self, logic: &Logic) {
            self.calls.push(Call::Score(logic.score_text()));
        }

        fn speak(&mut self, utterance: &Utterance) {
            self.calls.push(Call::Speak(
                utterance.text.clone(),
                utterance.language_tag,
            ));
        }

        fn play_sound(&mut self, sound: Sound) {
            self.calls.push(Call::Sound(sound));
        }

        fn schedule_next_round(&mut self, sequence: u32, delay: Timeout) {
            self.calls.push(Call::Schedule(sequence, delay));
        }

        fn cancel_next_round(&mut self) {
            self.calls.push(Call::Cancel);
        }
    }

    fn make_logic() -> Logic {
        Logic::new(
            Mode::Quiz,
            &Config::default(),
            Box::new(SeededRandom::new(9)),
        )
    }

    #[test]
    fn full_round() {
        let mut logic = make_logic();
        let mut recorder = Recorder::default();

        assert!(!flush_events(&mut logic, &mut recorder));
        assert!(recorder.calls.is_empty());

        logic.reset();

        assert!(flush_events(&mut logic, &mut recorder));

        let name = logic.target().unwrap().name(logic.language());

        assert_eq!(
            recorder.calls,
            [
                Call::Score("Score: 0 / 0".to_string()),
                Call::Cancel,
                Call::Round(format!("Trouve {} !", name)),
                Call::Speak(name.to_string(), "fr-FR"),
            ],
        );

        recorder.calls.clear();

        let sequence = logic.sequence();
        let target = logic.target().unwrap().hex;
        logic.evaluate_answer(target).unwrap();

        assert!(flush_events(&mut logic, &mut recorder));

        assert_eq!(
            recorder.calls,
            [
                Call::Feedback("Bravo ! C’est réussi !"),
                Call::Sound(Sound::Success),
                Call::Score("Score: 1 / 1".to_string()),
                Call::Schedule(sequence, Timeout::Milliseconds(1500)),
            ],
        );

        recorder.calls.clear();

        assert!(logic.next_round_due(sequence));
        assert!(flush_events(&mut logic, &mut recorder));

        assert_eq!(recorder.calls[0], Call::Cancel);
        assert!(matches!(recorder.calls[1], Call::Round(_)));
    }

    #[test]
    fn stop_cancels_timer() {
        let mut logic = make_logic();
        let mut recorder = Recorder::default();

        logic.reset();
        let target = logic.target().unwrap().hex;
        logic.evaluate_answer(target).unwrap();
        flush_events(&mut logic, &mut recorder);
        recorder.calls.clear();

        logic.stop();

        assert!(flush_events(&mut logic, &mut recorder));
        assert_eq!(
            recorder.calls,
            [Call::Cancel, Call::Round(String::new())],
        );
    }

    #[test]
    fn wrong_answer_sound() {
        let mut logic = make_logic();
        let mut recorder = Recorder::default();

        logic.set_level(Level::Advanced);
        logic.reset();
        flush_events(&mut logic, &mut recorder);
        recorder.calls.clear();

        let target = logic.target().unwrap().hex;
        let wrong = logic.options()
            .iter()
            .find(|c| c.hex != target)
            .unwrap()
            .hex;

        logic.evaluate_answer(wrong).unwrap();
        flush_events(&mut logic, &mut recorder);

        assert_eq!(recorder.calls[0], Call::Feedback("Essaie encore !"));
        assert_eq!(recorder.calls[1], Call::Sound(Sound::Failure));
    }
}
