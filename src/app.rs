use crate::config::Settings;
use crate::input::{collect_input_nonblocking, map_event_to_command, Command, KeyBindings};
use crate::model::PET_NAMES;
use crate::render::{draw_hidden, draw_pet_panel, set_title, ButtonFeedback, Layout, Terminal};
use crate::sim::PetState;
use crate::sink::{ButtonPulse, DisplaySink, FrameUpdate, SoundCue};
use crate::tray::{frame_slot, spawn_mirror, TrayPublisher};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

struct Outputs<'a> {
    tray: Option<&'a TrayPublisher>,
    feedback: &'a mut ButtonFeedback,
    bell: bool,
    ring: bool,
}

impl DisplaySink for Outputs<'_> {
    fn frame(&mut self, update: FrameUpdate) {
        if let Some(tray) = self.tray {
            tray.publish(update);
        }
    }

    fn sound(&mut self, cue: SoundCue) {
        tracing::trace!(?cue, "sound");
        if self.bell && cue == SoundCue::ButtonPressed {
            self.ring = true;
        }
    }

    fn pulse(&mut self, pulse: ButtonPulse) {
        self.feedback.pulse(pulse);
    }
}

struct Tray {
    publisher: TrayPublisher,
    handle: JoinHandle<()>,
}

pub(crate) struct App {
    settings: Settings,
    state: PetState,
    rng: StdRng,
    term: Terminal,
    tray: Option<Tray>,
    feedback: ButtonFeedback,
    bindings: KeyBindings,
    should_quit: bool,
    visible: bool,
    started: Instant,
}

impl App {
    fn init(settings: Settings) -> anyhow::Result<Self> {
        let mut rng = if settings.seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(settings.seed)
        };
        let name = settings
            .pet_name
            .clone()
            .or_else(|| PET_NAMES.choose(&mut rng).map(|n| n.to_string()))
            .unwrap_or_else(|| PET_NAMES[0].to_string());

        let started = Instant::now();
        let state = PetState::new(name, 0, &mut rng);
        tracing::info!(name = %state.name, seed = settings.seed, "pet hatched");

        let term = Terminal::begin()?;

        let tray = if settings.tray_mirror {
            let (publisher, receiver) = frame_slot();
            match spawn_mirror(receiver, set_title) {
                Ok(handle) => Some(Tray { publisher, handle }),
                Err(e) => {
                    tracing::warn!(%e, "tray mirror unavailable");
                    None
                }
            }
        } else {
            None
        };

        let bindings = KeyBindings::with_overrides(&settings.key_bindings);

        Ok(Self {
            settings,
            state,
            rng,
            term,
            tray,
            feedback: ButtonFeedback::default(),
            bindings,
            should_quit: false,
            visible: true,
            started,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = Duration::from_secs_f32(1.0 / self.settings.fps() as f32);

        while !self.should_quit {
            let frame_start = Instant::now();
            self.term.resize_if_needed()?;
            let layout = Layout::for_size(self.term.cols, self.term.rows);

            let events = collect_input_nonblocking(frame_dt)?;
            let now = millis_since(self.started);
            let mut out = Outputs {
                tray: self.tray.as_ref().map(|t| &t.publisher),
                feedback: &mut self.feedback,
                bell: self.settings.bell,
                ring: false,
            };
            let commands = events
                .iter()
                .filter_map(|ev| map_event_to_command(ev, &layout, &self.bindings));
            if apply_commands(commands, &mut self.state, &mut self.visible, now, &mut out) {
                self.should_quit = true;
            }

            self.state.tick(now, &mut self.rng, &mut out);
            out.feedback.tick();
            let ring = out.ring;

            if ring {
                self.term.bell()?;
            }
            self.render_frame(layout)?;

            spin_sleep(frame_dt, frame_start);
        }

        Ok(())
    }

    fn render_frame(&mut self, layout: Layout) -> anyhow::Result<()> {
        self.term.cur.clear(crossterm::style::Color::Black);
        if self.visible {
            draw_pet_panel(
                &mut self.term.cur,
                layout,
                &self.state,
                &self.feedback,
                self.settings.enable_color,
            );
        } else {
            draw_hidden(&mut self.term.cur);
        }
        self.term.present(true)
    }

    fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(tray) = self.tray.take() {
            tray.publisher.request_stop();
            if tray.handle.join().is_err() {
                tracing::warn!("tray mirror panicked");
            }
        }
        self.term.end()?;
        tracing::info!(
            name = %self.state.name,
            care_points = self.state.care_points,
            alive_ms = millis_since(self.started),
            dead = self.state.dead,
            showing = %self.state.player.animation(),
            "goodbye"
        );
        Ok(())
    }
}

/// Returns true on quit; commands after it are dropped.
fn apply_commands<I>(
    commands: I,
    state: &mut PetState,
    visible: &mut bool,
    now_ms: u64,
    out: &mut Outputs<'_>,
) -> bool
where
    I: IntoIterator<Item = Command>,
{
    for cmd in commands {
        match cmd {
            Command::Quit => return true,
            Command::ToggleVisibility => {
                *visible = !*visible;
                tracing::info!(visible = *visible, "window toggled");
            }
            Command::Press(role) if *visible => {
                state.on_button(role, now_ms, out);
            }
            // a hidden window has no buttons to hit
            Command::Press(role) => tracing::debug!(role = %role, "press ignored while hidden"),
        }
    }
    false
}

fn millis_since(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

pub(crate) fn run(settings: Settings) -> anyhow::Result<()> {
    let mut app = App::init(settings)?;
    let result = app.run();
    app.shutdown()?;
    result
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
