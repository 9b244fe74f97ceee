pub mod chat;
pub mod config;
pub mod constants;
pub mod draw;
pub mod error;
pub mod events;
pub mod field;
pub mod lighting;
pub mod particle;
pub mod prefs;
pub mod surface;
pub mod theme;
pub mod throttle;
pub mod tier;

pub use config::FieldConfig;
pub use error::{Error, Result};
pub use events::{channel, FieldEvent, FieldEventReceiver, FieldEventSender};
pub use field::{Connection, ParticleField};
pub use particle::{BurstKind, Life, Particle};
pub use surface::{Color, ColorStop, Surface};
pub use theme::Theme;
pub use throttle::{FrameThrottle, TierProbe};
pub use tier::{PlatformTier, TierProfile};
