//! Fixed layout and timing constants.
//!
//! Everything tunable per deployment lives in `FieldConfig`; the values here
//! describe invariants of the field (wrap margin, breakpoints, caps).
use std::time::Duration;

// Particles may drift this far outside the viewport before wrapping
pub const WRAP_MARGIN: f32 = 50.0;

// Viewport widths (CSS px)
pub const MOBILE_BREAKPOINT: f32 = 768.0;
pub const WIDE_DESKTOP_WIDTH: f32 = 1400.0;
pub const MEDIUM_DESKTOP_WIDTH: f32 = 1200.0;

// Backing store scale is min(devicePixelRatio, MAX_DPR)
pub const MAX_DPR: f64 = 2.0;

// Hard caps applied after temporary particles are collected
pub const CAP_DESKTOP: usize = 500;
pub const CAP_MOBILE: usize = 250;
pub const CAP_CONSTRAINED: usize = 150;

// Scroll handling
pub const SCROLL_IDLE: Duration = Duration::from_millis(150);
pub const HERO_SCROLL_FRACTION: f32 = 0.15; // above this the page counts as "below hero"

// Pointer easing and interaction
pub const POINTER_EASE: f32 = 0.05; // fraction of the remaining distance per frame
pub const GROWTH_EASE: f32 = 0.1;
pub const TRAIL_CHANCE: f64 = 0.2;
pub const POINTER_BOOST_THRESHOLD: f32 = 0.3;
pub const CONNECTION_HOVER_DISTANCE: f32 = 100.0;

// Integration
pub const VELOCITY_DAMPING: f32 = 0.99;
pub const BASE_VELOCITY_RELAX: f32 = 0.01;
pub const VELOCITY_JITTER: f32 = 0.001;
pub const TWINKLE_SPEED_MAX: f32 = 0.08;
pub const SPECIAL_PULSE_STEP: f32 = 0.01;
pub const TIME_STEP: f32 = 0.01; // field clock advance per executed frame

// Section dimming is clamped to this range
pub const DIMMING_MIN: f32 = 0.7;
pub const DIMMING_MAX: f32 = 1.0;

// Text-change wave
pub const WAVE_BURSTS: usize = 8;
pub const WAVE_STAGGER: Duration = Duration::from_millis(80);
pub const WAVE_MAX_RADIUS: f32 = 150.0;

// Keyword attraction lasts roughly this long
pub const ATTRACT_DURATION: Duration = Duration::from_secs(1);

// Frame budget probe
pub const PROBE_SAMPLES: usize = 90;
pub const PROBE_OVER_BUDGET_RATIO: f32 = 1.5;

// Chat
pub const CHAT_HISTORY_LIMIT: usize = 10;
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(12);
