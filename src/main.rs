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

use clap::Parser;
use couleurs::game;
use game::catalog::Level;
use game::color;
use game::config::Config;
use game::logic::{Logic, Mode, Utterance};
use game::presenter::{self, Presenter};
use game::random::SystemRandom;
use game::sounds::{Sound, SOUNDS, N_SOUNDS};
use game::timeout::{self, Timeout};
use game::timer::Timer;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const MAX_COLUMNS: u32 = 4;
const MARGIN: u32 = 24;
const FEEDBACK_BORDER: u32 = 12;

const BACKGROUND: Color = Color::RGB(0xf5, 0xf5, 0xf5);
const SUCCESS: Color = Color::RGB(0x2e, 0xcc, 0x71);
const FAILURE: Color = Color::RGB(0xe7, 0x4c, 0x3c);

#[derive(Parser)]
#[command(about = "A colour-naming game for young children")]
struct Args {
    /// Show one colour at a time instead of the quiz
    #[arg(long)]
    flashcards: bool,
    /// Configuration file to use instead of data/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory containing the sound files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

struct Context {
    canvas: sdl2::render::WindowCanvas,
    event_pump: sdl2::EventPump,
    audio_subsystem: Option<sdl2::AudioSubsystem>,
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
}

impl Context {
    fn new() -> Result<Context, String> {
        let sdl = sdl2::init()?;

        let event_pump = sdl.event_pump()?;

        let video_subsystem = sdl.video()?;

        let window = match video_subsystem.window("Couleurs", 800, 600)
            .position_centered()
            .resizable()
            .build()
        {
            Ok(w) => w,
            Err(e) => return Err(e.to_string()),
        };

        let canvas = match window.into_canvas().present_vsync().build() {
            Ok(c) => c,
            Err(e) => return Err(e.to_string()),
        };

        // The game is still playable without sound
        let audio_subsystem = match open_audio(&sdl) {
            Ok(a) => Some(a),
            Err(e) => {
                log::warn!("no audio: {}", e);
                None
            },
        };

        Ok(Context {
            canvas,
            event_pump,
            audio_subsystem,
            _video_subsystem: video_subsystem,
            _sdl: sdl,
        })
    }
}

fn open_audio(sdl: &sdl2::Sdl) -> Result<sdl2::AudioSubsystem, String> {
    let audio_subsystem = sdl.audio()?;

    sdl2::mixer::open_audio(
        44_100,
        sdl2::mixer::DEFAULT_FORMAT,
        sdl2::mixer::DEFAULT_CHANNELS,
        1_024,
    )?;
    sdl2::mixer::allocate_channels(N_SOUNDS as i32);

    Ok(audio_subsystem)
}

fn load_sounds(
    config: &Config,
    data_dir: &Path,
) -> [Option<sdl2::mixer::Chunk>; N_SOUNDS] {
    SOUNDS.map(|sound| {
        let filename = data_dir.join(sound.filename(&config.sounds));

        match sdl2::mixer::Chunk::from_file(&filename) {
            Ok(chunk) => Some(chunk),
            Err(e) => {
                log::warn!("{}: {}", filename.display(), e);
                None
            },
        }
    })
}

struct PendingRound {
    sequence: u32,
    start_time: Timer,
    delay: i64,
}

struct NativePresenter {
    sounds: [Option<sdl2::mixer::Chunk>; N_SOUNDS],
    title: String,
    feedback: Option<bool>,
    pending_round: Option<PendingRound>,
}

impl NativePresenter {
    fn new(sounds: [Option<sdl2::mixer::Chunk>; N_SOUNDS]) -> NativePresenter {
        NativePresenter {
            sounds,
            title: "Couleurs".to_string(),
            feedback: None,
            pending_round: None,
        }
    }

    fn next_timeout(&self) -> Timeout {
        match self.pending_round {
            Some(ref pending) => pending.start_time.remaining(pending.delay),
            None => Timeout::Forever,
        }
    }

    fn update_title(&mut self, logic: &Logic) {
        let mut title = logic.instruction().unwrap_or_default();

        if logic.mode() == Mode::Quiz {
            title.push_str("  |  ");
            title.push_str(&logic.score_text());
        }

        if let Some(feedback) = logic.feedback() {
            title.push_str("  |  ");
            title.push_str(feedback);
        }

        self.title = title;
    }
}

impl Presenter for NativePresenter {
    fn show_round(&mut self, logic: &Logic) {
        self.feedback = None;
        self.update_title(logic);
    }

    fn show_feedback(&mut self, logic: &Logic, correct: bool) {
        self.feedback = Some(correct);
        self.update_title(logic);
    }

    fn show_score(&mut self, logic: &Logic) {
        self.update_title(logic);
    }

    fn speak(&mut self, utterance: &Utterance) {
        // There’s no speech synthesis here so just say it in the log
        log::info!("“{}” ({})", utterance.text, utterance.language_tag);
    }

    fn play_sound(&mut self, sound: Sound) {
        let Some(ref chunk) = self.sounds[sound.index()]
        else {
            return;
        };

        let channel = sdl2::mixer::Channel::all();

        channel.halt();

        if let Err(e) = channel.play(chunk, 0) {
            log::warn!("error playing {:?}: {}", sound, e);
        }
    }

    fn schedule_next_round(&mut self, sequence: u32, delay: Timeout) {
        let delay = match delay {
            Timeout::Milliseconds(ms) => ms,
            Timeout::Forever => {
                self.pending_round = None;
                return;
            },
        };

        self.pending_round = Some(PendingRound {
            sequence,
            start_time: Timer::new(),
            delay,
        });
    }

    fn cancel_next_round(&mut self) {
        self.pending_round = None;
    }
}

fn swatch_rects(n_swatches: usize, width: u32, height: u32) -> Vec<Rect> {
    if n_swatches == 0 {
        return Vec::new();
    }

    let n_swatches = n_swatches as u32;
    let columns = n_swatches.min(MAX_COLUMNS);
    let rows = (n_swatches + columns - 1) / columns;

    let cell_width = width.saturating_sub(MARGIN) / columns;
    let cell_height = height.saturating_sub(MARGIN) / rows;
    let size = cell_width.min(cell_height).saturating_sub(MARGIN).max(1);

    let total_width = columns * (size + MARGIN) - MARGIN;
    let total_height = rows * (size + MARGIN) - MARGIN;
    let left = width.saturating_sub(total_width) / 2;
    let top = height.saturating_sub(total_height) / 2;

    (0..n_swatches).map(|i| {
        let column = i % columns;
        let row = i / columns;

        Rect::new(
            (left + column * (size + MARGIN)) as i32,
            (top + row * (size + MARGIN)) as i32,
            size,
            size,
        )
    }).collect()
}

struct GameData<'a> {
    context: &'a mut Context,
    logic: Logic,
    presenter: NativePresenter,
    redraw_queued: bool,
    should_quit: bool,
}

impl<'a> GameData<'a> {
    fn new(
        context: &'a mut Context,
        logic: Logic,
        presenter: NativePresenter,
    ) -> GameData<'a> {
        GameData {
            context,
            logic,
            presenter,
            redraw_queued: true,
            should_quit: false,
        }
    }

    fn flush_logic_events(&mut self) {
        if presenter::flush_events(&mut self.logic, &mut self.presenter) {
            self.redraw_queued = true;
        }
    }

    fn swatches(&self) -> Vec<(Rect, u32)> {
        let Ok((width, height)) = self.context.canvas.output_size()
        else {
            return Vec::new();
        };

        match self.logic.mode() {
            Mode::Quiz => {
                let options = self.logic.options();

                swatch_rects(options.len(), width, height)
                    .into_iter()
                    .zip(options.iter().map(|c| c.hex))
                    .collect()
            },
            Mode::Flashcards => {
                self.logic.target()
                    .map(|target| (swatch_rects(1, width, height)[0], target.hex))
                    .into_iter()
                    .collect()
            },
        }
    }

    fn handle_click(&mut self, x: i32, y: i32) {
        match self.logic.mode() {
            Mode::Quiz => {
                let Some(hex) = self.swatches()
                    .into_iter()
                    .find(|(rect, _)| rect.contains_point((x, y)))
                    .map(|(_, hex)| hex)
                else {
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

    fn handle_key(&mut self, keycode: Keycode) {
        match keycode {
            Keycode::Escape => self.should_quit = true,
            Keycode::Num1 => self.logic.set_level(Level::Beginner),
            Keycode::Num2 => self.logic.set_level(Level::Intermediate),
            Keycode::Num3 => self.logic.set_level(Level::Advanced),
            Keycode::L => {
                let language = self.logic.language().other();
                self.logic.set_language(language);
            },
            Keycode::R => self.logic.reset(),
            Keycode::S => self.logic.stop(),
            Keycode::Space | Keycode::Return => {
                if self.logic.mode() == Mode::Flashcards {
                    let _ = self.logic.next_card();
                }
            },
            _ => return,
        }

        self.flush_logic_events();
    }

    fn check_pending_round(&mut self) {
        let Some(ref pending) = self.presenter.pending_round
        else {
            return;
        };

        let remaining = pending.start_time.remaining(pending.delay);

        if remaining > timeout::IMMEDIATELY {
            return;
        }

        let sequence = pending.sequence;

        self.presenter.pending_round = None;

        if self.logic.next_round_due(sequence) {
            self.flush_logic_events();
        }
    }
}

fn handle_event(game_data: &mut GameData, event: Event) {
    match event {
        Event::Quit {..} => {
            game_data.should_quit = true;
        },
        Event::KeyDown { keycode: Some(keycode), .. } => {
            game_data.handle_key(keycode);
        },
        Event::MouseButtonDown { mouse_btn: MouseButton::Left, x, y, .. } => {
            game_data.handle_click(x, y);
        },
        Event::Window {
            win_event: WindowEvent::SizeChanged(..) | WindowEvent::Exposed,
            ..
        } => {
            game_data.redraw_queued = true;
        },
        _ => {}
    }
}

fn fill_rect(
    canvas: &mut sdl2::render::WindowCanvas,
    color: Color,
    rect: Rect,
) {
    canvas.set_draw_color(color);

    if let Err(e) = canvas.fill_rect(rect) {
        log::warn!("{}", e);
    }
}

fn redraw(game_data: &mut GameData) {
    game_data.redraw_queued = false;

    let swatches = game_data.swatches();
    let feedback = game_data.presenter.feedback;
    let title = game_data.presenter.title.clone();

    let canvas = &mut game_data.context.canvas;

    if let Err(e) = canvas.window_mut().set_title(&title) {
        log::warn!("{}", e);
    }

    canvas.set_draw_color(BACKGROUND);
    canvas.clear();

    if let Some(correct) = feedback {
        if let Ok((width, height)) = canvas.output_size() {
            let frame = if correct { SUCCESS } else { FAILURE };
            fill_rect(canvas, frame, Rect::new(0, 0, width, height));
            fill_rect(
                canvas,
                BACKGROUND,
                Rect::new(
                    FEEDBACK_BORDER as i32,
                    FEEDBACK_BORDER as i32,
                    width.saturating_sub(FEEDBACK_BORDER * 2).max(1),
                    height.saturating_sub(FEEDBACK_BORDER * 2).max(1),
                ),
            );
        }
    }

    for (rect, hex) in swatches {
        let (r, g, b) = color::rgb_components(hex);
        fill_rect(canvas, Color::RGB(r, g, b), rect);
    }

    canvas.present();
}

fn main_loop(game_data: &mut GameData) {
    while !game_data.should_quit {
        if game_data.redraw_queued {
            while let Some(event) = game_data.context.event_pump.poll_event() {
                handle_event(game_data, event);
            }

            redraw(game_data);
        } else {
            let event = match game_data.presenter.next_timeout().as_millis_u32() {
                Some(ms) => game_data.context.event_pump.wait_event_timeout(ms),
                None => Some(game_data.context.event_pump.wait_event()),
            };

            if let Some(event) = event {
                handle_event(game_data, event);
            }
        }

        game_data.check_pending_round();
    }
}

fn load_config(args: &Args) -> Config {
    let filename = args.config.clone()
        .unwrap_or_else(|| PathBuf::from("data/config.toml"));

    match Config::load(&filename) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using the default configuration", e);
            Config::default()
        },
    }
}

pub fn main() -> ExitCode {
    let args = Args::parse();

    game::logging::init(log::LevelFilter::Info);

    let config = load_config(&args);

    let mut context = match Context::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to initialise SDL: {}", e);
            return ExitCode::FAILURE;
        },
    };

    let sounds = if context.audio_subsystem.is_some() {
        load_sounds(&config, &args.data_dir)
    } else {
        Default::default()
    };

    let mode = if args.flashcards { Mode::Flashcards } else { Mode::Quiz };

    let mut logic = Logic::new(mode, &config, Box::new(SystemRandom));
    logic.reset();

    let mut game_data = GameData::new(
        &mut context,
        logic,
        NativePresenter::new(sounds),
    );

    game_data.flush_logic_events();

    main_loop(&mut game_data);

    ExitCode::SUCCESS
}
