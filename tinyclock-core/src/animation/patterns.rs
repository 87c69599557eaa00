//! Pattern table
//!
//! Each pattern renders a frame for a tick index into the pixel buffer.
//! Patterns may skip a tick, in which case the ring keeps its last frame.

use oorandom::Rand32;
use smart_leds::RGB8;

/// All channels off
pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Steps in the grey ramp, kept low for current draw
const GREY_LEVELS: u32 = 100;

/// Ticks per red/green/blue fade segment
const FADE_SEGMENT: u32 = 255;

/// Whether a pattern produced a new frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Render {
    Frame,
    Skip,
}

/// State carried across ticks of one animation run
pub struct PatternState {
    rng: Rand32,
    fade: RGB8,
}

impl PatternState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rand32::new(seed),
            fade: OFF,
        }
    }

    /// Uniform pick in `0..bound`
    pub fn pick(&mut self, bound: u32) -> u32 {
        self.rng.rand_range(0..bound)
    }

    /// One-in-sixteen full-brightness level, otherwise off
    fn sparkle(&mut self) -> u8 {
        if self.pick(16) == 0 {
            0xFF
        } else {
            0
        }
    }
}

/// Frame renderer: pixels, tick index, run state
pub type RenderFn = fn(&mut [RGB8], u32, &mut PatternState) -> Render;

/// Entry of the pattern table
pub struct Pattern {
    pub name: &'static str,
    /// Frames rendered before the animation ends
    pub duration_ticks: u32,
    pub render: RenderFn,
}

/// Patterns an hourly animation picks from
pub static PATTERNS: [Pattern; 4] = [
    Pattern {
        name: "sparkle",
        duration_ticks: 1000,
        render: sparkle,
    },
    Pattern {
        name: "color-sparkle",
        duration_ticks: 1000,
        render: color_sparkle,
    },
    Pattern {
        name: "greys",
        duration_ticks: 1000,
        render: greys,
    },
    Pattern {
        name: "rgb-fade",
        duration_ticks: FADE_SEGMENT * 4,
        render: rgb_fade,
    },
];

fn sparkle(pixels: &mut [RGB8], tick: u32, state: &mut PatternState) -> Render {
    if tick % 8 != 0 {
        return Render::Skip;
    }
    for pixel in pixels.iter_mut() {
        let level = state.sparkle();
        *pixel = RGB8::new(level, level, level);
    }
    Render::Frame
}

fn color_sparkle(pixels: &mut [RGB8], tick: u32, state: &mut PatternState) -> Render {
    if tick % 8 != 0 {
        return Render::Skip;
    }
    for pixel in pixels.iter_mut() {
        let level = state.sparkle();
        *pixel = match state.pick(3) {
            0 => RGB8::new(level, 0, 0),
            1 => RGB8::new(0, level, 0),
            _ => RGB8::new(0, 0, level),
        };
    }
    Render::Frame
}

fn greys(pixels: &mut [RGB8], tick: u32, _state: &mut PatternState) -> Render {
    let mut level = tick % GREY_LEVELS;
    for pixel in pixels.iter_mut() {
        let grey = level as u8;
        *pixel = RGB8::new(grey, grey, grey);
        level = (level + 1) % GREY_LEVELS;
    }
    Render::Frame
}

/// Red rises, red hands over to green, green to blue, blue falls
fn rgb_fade(pixels: &mut [RGB8], tick: u32, state: &mut PatternState) -> Render {
    if tick == 0 {
        state.fade = OFF;
    }

    let fade = &mut state.fade;
    match (tick % (FADE_SEGMENT * 4)) / FADE_SEGMENT {
        0 => fade.r = fade.r.wrapping_add(1),
        1 => {
            fade.r = fade.r.wrapping_sub(1);
            fade.g = fade.g.wrapping_add(1);
        }
        2 => {
            fade.g = fade.g.wrapping_sub(1);
            fade.b = fade.b.wrapping_add(1);
        }
        _ => fade.b = fade.b.wrapping_sub(1),
    }

    pixels.fill(*fade);
    Render::Frame
}
