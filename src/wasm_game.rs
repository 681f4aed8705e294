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

use wasm_bindgen::prelude::*;
use web_sys::console;
use super::game;
use game::catalog::{Language, Level};
use game::color;
use game::config::Config;
use game::logic::{Logic, Mode, Utterance};
use game::presenter::{self, Presenter};
use game::random::SystemRandom;
use game::sounds::{Sound, SOUNDS, N_SOUNDS};
use game::timeout::Timeout;

fn show_error(message: &str) {
    console::log_1(&message.into());

    let Some(window) = web_sys::window()
    else {
        return;
    };

    let Some(document) = window.document()
    else {
        return;
    };

    let Some(message_elem) = document.get_element_by_id("message")
    else {
        return;
    };

    message_elem.set_text_content(Some("Une erreur est survenue"));
}

struct Context {
    document: web_sys::Document,
    window: web_sys::Window,
}

impl Context {
    fn new() -> Result<Context, String> {
        let Some(window) = web_sys::window()
        else {
            return Err("failed to get window".to_string());
        };

        let Some(document) = window.document()
        else {
            return Err("failed to get document".to_string());
        };

        Ok(Context {
            document,
            window,
        })
    }

    fn html_element(&self, id: &str) -> Option<web_sys::HtmlElement> {
        self.document.get_element_by_id(id)
            .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
    }

    fn required_element(
        &self,
        id: &str,
    ) -> Result<web_sys::HtmlElement, String> {
        self.html_element(id)
            .ok_or_else(|| format!("failed to get {} element", id))
    }

    fn select_element(&self, id: &str) -> Option<web_sys::HtmlSelectElement> {
        self.document.get_element_by_id(id)
            .and_then(|e| e.dyn_into::<web_sys::HtmlSelectElement>().ok())
    }
}

struct Elements {
    level_select: Option<web_sys::HtmlSelectElement>,
    language_select: Option<web_sys::HtmlSelectElement>,
    instruction: web_sys::HtmlElement,
    // Container for the swatches in the quiz or the single swatch
    // for the flashcards
    choices: web_sys::HtmlElement,
    score: Option<web_sys::HtmlElement>,
    feedback: Option<web_sys::HtmlElement>,
    sounds: [Option<web_sys::HtmlAudioElement>; N_SOUNDS],
}

impl Elements {
    fn new(context: &Context, mode: Mode) -> Result<Elements, String> {
        let choices_id = match mode {
            Mode::Quiz => "choix-couleurs",
            Mode::Flashcards => "carte-couleur",
        };

        let sounds = SOUNDS.map(|sound| {
            let audio = context.document.get_element_by_id(sound.element_id())
                .and_then(|e| e.dyn_into::<web_sys::HtmlAudioElement>().ok());

            if audio.is_none() && mode == Mode::Quiz {
                log::warn!("missing audio element {}", sound.element_id());
            }

            audio
        });

        Ok(Elements {
            level_select: context.select_element("select-niveau"),
            language_select: context.select_element("select-langue"),
            instruction: context.required_element("consigne-texte")?,
            choices: context.required_element(choices_id)?,
            score: context.html_element("score"),
            feedback: context.html_element("feedback-message"),
            sounds,
        })
    }
}

type PromiseClosure = Closure::<dyn FnMut(JsValue)>;

struct WebPresenter {
    window: web_sys::Window,
    document: web_sys::Document,
    elements: Elements,
    speech: Option<web_sys::SpeechSynthesis>,
    play_error_closure: PromiseClosure,

    next_round_handle: Option<i32>,
    next_round_closure: Option<Closure::<dyn Fn()>>,
    couleurs_pointer: Option<*mut Couleurs>,
}

impl WebPresenter {
    fn new(context: Context, elements: Elements) -> WebPresenter {
        let speech = match context.window.speech_synthesis() {
            Ok(speech) => Some(speech),
            Err(_) => {
                log::warn!("speech synthesis is not available");
                None
            },
        };

        let play_error_closure = PromiseClosure::new(|e: JsValue| {
            log::error!("error playing sound: {:?}", e);
        });

        WebPresenter {
            window: context.window,
            document: context.document,
            elements,
            speech,
            play_error_closure,
            next_round_handle: None,
            next_round_closure: None,
            couleurs_pointer: None,
        }
    }

    fn clear_feedback(&self) {
        if let Some(ref feedback) = self.elements.feedback {
            feedback.set_text_content(Some(""));
            feedback.set_class_name("");
        }
    }

    fn show_instruction(&self, logic: &Logic) {
        let instruction = &self.elements.instruction;

        instruction.set_text_content(logic.instruction().as_deref());

        let Some(target) = logic.target()
        else {
            return;
        };

        if logic.mode() == Mode::Quiz {
            if let Err(e) = instruction.style().set_property(
                "color",
                &color::css_color(target.hex),
            ) {
                log::warn!("error setting instruction colour: {:?}", e);
            }
            // Very light colours get an outline to stay readable
            instruction.set_class_name(
                if color::is_light(target.hex) { "clair" } else { "" }
            );
        }
    }

    fn show_options(&self, logic: &Logic) -> Result<(), JsValue> {
        let choices = &self.elements.choices;

        match logic.mode() {
            Mode::Quiz => {
                choices.set_inner_html("");

                for option in logic.options() {
                    let swatch = self.document.create_element("div")?
                        .dyn_into::<web_sys::HtmlElement>()?;
                    let css = color::css_color(option.hex);

                    swatch.set_class_name("option-couleur");
                    swatch.set_attribute("data-hex", &css)?;
                    swatch.style().set_property("background-color", &css)?;

                    choices.append_child(&swatch)?;
                }
            },
            Mode::Flashcards => {
                match logic.target() {
                    Some(target) => {
                        choices.style().set_property(
                            "background-color",
                            &color::css_color(target.hex),
                        )?;
                    },
                    None => {
                        choices.style().remove_property("background-color")?;
                    },
                }
            },
        }

        Ok(())
    }
}

impl Presenter for WebPresenter {
    fn show_round(&mut self, logic: &Logic) {
        self.show_instruction(logic);

        if let Err(e) = self.show_options(logic) {
            log::error!("error showing options: {:?}", e);
        }

        self.clear_feedback();
    }

    fn show_feedback(&mut self, logic: &Logic, correct: bool) {
        let Some(ref feedback) = self.elements.feedback
        else {
            return;
        };

        feedback.set_text_content(logic.feedback());
        feedback.set_class_name(
            if correct { "feedback-succes" } else { "feedback-echec" }
        );
    }

    fn show_score(&mut self, logic: &Logic) {
        if let Some(ref score) = self.elements.score {
            score.set_text_content(Some(&logic.score_text()));
        }
    }

    fn speak(&mut self, utterance: &Utterance) {
        let Some(ref speech) = self.speech
        else {
            return;
        };

        // Stop whatever was being said before
        speech.cancel();

        match web_sys::SpeechSynthesisUtterance::new_with_text(
            &utterance.text
        ) {
            Ok(u) => {
                u.set_lang(utterance.language_tag);
                u.set_rate(utterance.rate);
                speech.speak(&u);
            },
            Err(e) => log::error!("error creating utterance: {:?}", e),
        }
    }

    fn play_sound(&mut self, sound: Sound) {
        let Some(ref audio) = self.elements.sounds[sound.index()]
        else {
            return;
        };

        // Rewind in case the previous play hasn’t finished
        audio.set_current_time(0.0);

        match audio.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.play_error_closure);
            },
            Err(e) => log::error!("error playing sound: {:?}", e),
        }
    }

    fn schedule_next_round(&mut self, sequence: u32, delay: Timeout) {
        self.cancel_next_round();

        let (Some(couleurs_pointer), Some(delay)) =
            (self.couleurs_pointer, delay.as_millis_u32())
        else {
            return;
        };

        let closure = Closure::<dyn Fn()>::new(move || {
            let couleurs = unsafe { &mut *couleurs_pointer };
            couleurs.presenter.next_round_handle = None;
            couleurs.next_round_due(sequence);
        });

        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay as i32,
        ) {
            Ok(handle) => self.next_round_handle = Some(handle),
            Err(_) => log::error!("error scheduling the next round"),
        }

        self.next_round_closure = Some(closure);
    }

    fn cancel_next_round(&mut self) {
        // The closure is left alone because this can be called from
        // within it. It gets replaced on the next schedule.
        if let Some(handle) = self.next_round_handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}

struct Couleurs {
    logic: Logic,
    presenter: WebPresenter,

    choice_closure: Option<Closure::<dyn Fn(JsValue)>>,
    level_closure: Option<Closure::<dyn Fn()>>,
    language_closure: Option<Closure::<dyn Fn()>>,
}

impl Couleurs {
    fn new(logic: Logic, presenter: WebPresenter) -> Box<Couleurs> {
        let mut couleurs = Box::new(Couleurs {
            logic,
            presenter,
            choice_closure: None,
            level_closure: None,
            language_closure: None,
        });

        let couleurs_pointer = couleurs.as_mut() as *mut Couleurs;

        couleurs.presenter.couleurs_pointer = Some(couleurs_pointer);

        let choice_closure = Closure::<dyn Fn(JsValue)>::new(
            move |event: JsValue| {
                let couleurs = unsafe { &mut *couleurs_pointer };
                let Ok(event) = event.dyn_into::<web_sys::Event>()
                else {
                    return;
                };
                couleurs.handle_choice(event);
            }
        );

        let _ = couleurs.presenter.elements.choices.add_event_listener_with_callback(
            "click",
            choice_closure.as_ref().unchecked_ref(),
        );

        couleurs.choice_closure = Some(choice_closure);

        if let Some(ref select) = couleurs.presenter.elements.level_select {
            select.set_value(couleurs.logic.level().name());

            let level_closure = Closure::<dyn Fn()>::new(move || {
                let couleurs = unsafe { &mut *couleurs_pointer };
                couleurs.handle_level_change();
            });

            let _ = select.add_event_listener_with_callback(
                "change",
                level_closure.as_ref().unchecked_ref(),
            );

            couleurs.level_closure = Some(level_closure);
        }

        if let Some(ref select) = couleurs.presenter.elements.language_select {
            select.set_value(couleurs.logic.language().code());

            let language_closure = Closure::<dyn Fn()>::new(move || {
                let couleurs = unsafe { &mut *couleurs_pointer };
                couleurs.handle_language_change();
            });

            let _ = select.add_event_listener_with_callback(
                "change",
                language_closure.as_ref().unchecked_ref(),
            );

            couleurs.language_closure = Some(language_closure);
        }

        couleurs.logic.reset();
        couleurs.flush_logic_events();

        couleurs
    }

    fn flush_logic_events(&mut self) {
        presenter::flush_events(&mut self.logic, &mut self.presenter);
    }

    fn handle_choice(&mut self, event: web_sys::Event) {
        match self.logic.mode() {
            Mode::Quiz => {
                let Some(hex) = event.target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .and_then(|e| e.get_attribute("data-hex"))
                    .and_then(|hex| color::parse_css_color(&hex))
                else {
                    // Click on the container between the swatches
                    return;
                };

                if let Err(e) = self.logic.evaluate_answer(hex) {
                    log::debug!("click ignored: {}", e);
                    return;
                }
            },
            Mode::Flashcards => {
                if let Err(e) = self.logic.next_card() {
                    log::error!("{}", e);
                    return;
                }
            },
        }

        self.flush_logic_events();
    }

    fn handle_level_change(&mut self) {
        let Some(ref select) = self.presenter.elements.level_select
        else {
            return;
        };

        let value = select.value();

        match Level::from_name(&value) {
            Some(level) => self.logic.set_level(level),
            None => {
                log::warn!("unknown level “{}”", value);
                return;
            },
        }

        self.flush_logic_events();
    }

    fn handle_language_change(&mut self) {
        let Some(ref select) = self.presenter.elements.language_select
        else {
            return;
        };

        let value = select.value();

        match Language::from_code(&value) {
            Some(language) => self.logic.set_language(language),
            None => {
                log::warn!("unknown language “{}”", value);
                return;
            },
        }

        self.flush_logic_events();
    }

    fn next_round_due(&mut self, sequence: u32) {
        if self.logic.next_round_due(sequence) {
            self.flush_logic_events();
        }
    }
}

fn start_game(mode: Mode) {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    game::logging::init(log::LevelFilter::Info);

    let context = match Context::new() {
        Ok(c) => c,
        Err(e) => {
            show_error(&e);
            return;
        }
    };

    let elements = match Elements::new(&context, mode) {
        Ok(e) => e,
        Err(e) => {
            show_error(&e);
            return;
        }
    };

    let config = Config::embedded();

    let logic = Logic::new(mode, &config, Box::new(SystemRandom));
    let presenter = WebPresenter::new(context, elements);

    let couleurs = Couleurs::new(logic, presenter);

    // Leak the main couleurs object so that it will live as long as
    // the web page
    std::mem::forget(couleurs);
}

#[wasm_bindgen]
pub fn init_quiz() {
    start_game(Mode::Quiz);
}

#[wasm_bindgen]
pub fn init_flashcards() {
    start_game(Mode::Flashcards);
}
