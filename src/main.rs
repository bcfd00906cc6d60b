use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use raylib::consts::KeyboardKey;
use raylib::prelude::*;

use marquee::clock::Clock;
use marquee::constants::*;
use marquee::measure::measure_labels;
use marquee::{LoopConfig, Marquee, MarqueeConfig, NavOptions};

/// Infinite scrolling text strip that reacts to the mouse wheel.
///
/// Wheel flicks kick the strip faster in the flick direction, then it
/// settles back to cruise speed. Space pauses, R reverses, N/P step to the
/// next/previous item, 1-9 jump to an item.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Labels repeated along the strip
    #[arg(required = true)]
    labels: Vec<String>,

    /// Strip speed in pixels per second
    #[arg(long, default_value_t = DEFAULT_SPEED_PX_PER_SEC)]
    speed: f32,

    /// Run the strip right-to-left reversed
    #[arg(long)]
    reverse: bool,

    /// Gap between neighboring labels, in pixels
    #[arg(long, default_value_t = 64.0)]
    gap: f32,

    /// Extra distance after the last label before the strip repeats
    #[arg(long, default_value_t = 30.0)]
    padding: f32,

    /// Label font size in pixels
    #[arg(long, default_value_t = 48)]
    font_size: i32,
}

// Frame timer of the open window, seen as the loop's clock.
struct FrameClock<'a>(&'a RaylibHandle);

impl Clock for FrameClock<'_> {
    fn delta(&mut self) -> f32 {
        self.0.get_frame_time()
    }
}

const INDEX_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Marquee")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Measure labels and build the loop ---
    let measures = measure_labels(&rl, &args.labels, args.font_size, args.gap);

    let config = MarqueeConfig {
        timeline: LoopConfig {
            speed_px_per_sec: args.speed,
            padding_after_last: args.padding,
            start_reversed: args.reverse,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut marquee =
        Marquee::build(measures, config).context("failed to build the marquee loop")?;
    info!(
        "strip of {} labels, one cycle {:.0}px / {:.2}s",
        args.labels.len(),
        marquee.timeline().total_span(),
        marquee.duration()
    );

    // --- Main Loop ---
    while !rl.window_should_close() {
        // Wheel up should read as "scroll back", matching page scroll feel.
        let wheel = rl.get_mouse_wheel_move();
        if wheel != 0.0 {
            marquee.on_scroll(-wheel);
        }

        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            if marquee.is_playing() {
                marquee.pause();
            } else {
                marquee.play();
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            marquee.reverse();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_N) {
            marquee.next(NavOptions::default());
        }
        if rl.is_key_pressed(KeyboardKey::KEY_P) {
            marquee.previous(NavOptions::default());
        }
        for (i, key) in INDEX_KEYS.iter().enumerate() {
            if i < marquee.items().len() && rl.is_key_pressed(*key) {
                marquee.to_index(i, NavOptions::default());
            }
        }

        marquee.advance_with(&mut FrameClock(&rl));

        // --- Draw the strip ---
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        let baseline = (d.get_screen_height() - args.font_size) / 2;
        for item in marquee.items() {
            let x = item.screen_x();
            let color = if item.index == marquee.current_index() {
                Color::GOLD
            } else {
                Color::RAYWHITE
            };
            d.draw_text(&args.labels[item.index], x as i32, baseline, args.font_size, color);
        }

        d.draw_text(
            &format!(
                "rate {:+.2}  index {}  t {:.2}/{:.2}s",
                marquee.play_rate(),
                marquee.current_index(),
                marquee.time(),
                marquee.duration()
            ),
            10,
            10,
            20,
            Color::GRAY,
        );
    }

    marquee.destroy();
    Ok(())
}
