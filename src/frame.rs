//! Frame controller
//!
//! Runs once per timer interrupt. Each tick is erase, update, draw, in that
//! order: the previous frame's paddles and ball are painted out with the
//! background color while the state still describes them, then the
//! simulation advances, then the new frame is drawn. There is no back buffer,
//! so drawing before erasing would leave the old frame on screen and erasing
//! after drawing would wipe the new one.

use serde::Serialize;

use crate::ports::{DigitPlace, InputSource, PixelSink, ScoreSink, TimerControl};
use crate::raster::{draw_circle, draw_line};
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameState, Player, TickEvents, TickInput, tick};
use crate::trig::AngleTable;

/// Counters accumulated across ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub ticks: u64,
    pub paddle_hits: u64,
    pub points: u64,
}

/// Draw the arena outline, both paddles and the ball for `state`
pub fn render_frame<P: PixelSink + ?Sized>(sink: &mut P, state: &GameState, settings: &Settings) {
    draw_circle(sink, settings.center(), settings.paddle_radius, settings.arena_color);
    for paddle in &state.paddles {
        let [a, b] = paddle.pixel_ends();
        draw_line(sink, a, b, paddle.color);
    }
    draw_circle(sink, state.ball.pixel_center(), settings.ball_radius, state.ball.color);
}

/// Paint out the paddles and ball drawn for `state`.
///
/// Must run before `state` changes; it redraws the exact same pixels.
pub fn erase_frame<P: PixelSink + ?Sized>(sink: &mut P, state: &GameState, settings: &Settings) {
    let bg = settings.background;
    for paddle in &state.paddles {
        let [a, b] = paddle.pixel_ends();
        draw_line(sink, a, b, bg);
    }
    draw_circle(sink, state.ball.pixel_center(), settings.ball_radius, bg);
}

/// Write both players' scores as tens/units digits (modulo 100)
pub fn publish_score<S: ScoreSink + ?Sized>(sink: &mut S, score: &[u32; 2]) {
    for player in Player::ALL {
        let shown = score[player.index()] % 100;
        sink.write_digit(player, DigitPlace::Tens, (shown / 10) as u8);
        sink.write_digit(player, DigitPlace::Units, (shown % 10) as u8);
    }
}

/// Owns the game state and the four ports; the interrupt handler calls
/// [`FrameController::on_timer`] and nothing else touches the state
pub struct FrameController<I, P, S, T> {
    state: GameState,
    trig: AngleTable,
    settings: Settings,
    input: I,
    pixels: P,
    scores: S,
    timer: T,
    stats: FrameStats,
}

impl<I, P, S, T> FrameController<I, P, S, T>
where
    I: InputSource,
    P: PixelSink,
    S: ScoreSink,
    T: TimerControl,
{
    /// Validate settings, build the angle table and the initial state
    pub fn new(settings: Settings, input: I, pixels: P, scores: S, timer: T) -> Result<Self, SettingsError> {
        settings.validate()?;
        let trig = AngleTable::new();
        let state = GameState::new(&trig, &settings);
        log::info!(
            "Arena radius {}px on {}x{}, paddle width {}°",
            settings.paddle_radius,
            settings.screen_width,
            settings.screen_height,
            2 * settings.paddle_half_width_deg
        );

        Ok(Self {
            state,
            trig,
            settings,
            input,
            pixels,
            scores,
            timer,
            stats: FrameStats::default(),
        })
    }

    /// Draw the first frame, show 00 - 00 and arm the timer.
    ///
    /// Call once before the timer interrupt is enabled.
    pub fn start(&mut self) {
        render_frame(&mut self.pixels, &self.state, &self.settings);
        publish_score(&mut self.scores, &self.state.score);
        self.timer.rearm();
    }

    /// Interrupt body: one complete tick, rearming the timer last
    pub fn on_timer(&mut self) -> TickEvents {
        erase_frame(&mut self.pixels, &self.state, &self.settings);

        let input = TickInput::from_switches(self.input.read_switches(), &self.settings);
        let events = tick(&mut self.state, &input, &self.trig, &self.settings);
        if events.scored.is_some() {
            publish_score(&mut self.scores, &self.state.score);
            self.stats.points += 1;
        }
        if events.paddle_hit.is_some() {
            self.stats.paddle_hits += 1;
        }

        render_frame(&mut self.pixels, &self.state, &self.settings);
        self.stats.ticks += 1;

        // Next period starts only now, so a long tick stretches its frame
        self.timer.rearm();
        events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn trig(&self) -> &AngleTable {
        &self.trig
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn pixels(&self) -> &P {
        &self.pixels
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Host-side access to the switch source (demo autopilot, tests)
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}
