//! Platform tiers and the effect budget each one gets.
//!
//! The host decides the tier (viewport width, an explicit page attribute or
//! the frame-budget probe); the field never inspects the user agent.

use crate::config::FieldConfig;
use crate::constants::*;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlatformTier {
    Desktop,
    Mobile,
    Constrained,
}

impl PlatformTier {
    /// Tier implied by viewport width alone.
    pub fn for_width(width: f32) -> Self {
        if width <= MOBILE_BREAKPOINT {
            PlatformTier::Mobile
        } else {
            PlatformTier::Desktop
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Some(PlatformTier::Desktop),
            "mobile" => Some(PlatformTier::Mobile),
            "constrained" | "low" => Some(PlatformTier::Constrained),
            _ => None,
        }
    }

    /// Next cheaper tier, if any.
    pub fn downgrade(self) -> Option<Self> {
        match self {
            PlatformTier::Desktop => Some(PlatformTier::Mobile),
            PlatformTier::Mobile => Some(PlatformTier::Constrained),
            PlatformTier::Constrained => None,
        }
    }

    pub fn target_fps(self) -> u32 {
        match self {
            PlatformTier::Desktop => 60,
            PlatformTier::Mobile | PlatformTier::Constrained => 30,
        }
    }

    pub fn frame_interval(self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps() as f64)
    }
}

/// Resolved per-tier budget.
#[derive(Clone, Debug, PartialEq)]
pub struct TierProfile {
    pub tier: PlatformTier,
    pub count: usize,
    pub cap: usize,
    pub size_range: [f32; 2],
    pub opacity_scale: f32,
    pub glow: bool,
    pub connections: bool,
    pub nebula: bool,
    pub sparkles: bool,
    pub pointer_trail: bool,
}

impl TierProfile {
    pub fn resolve(tier: PlatformTier, config: &FieldConfig, viewport_width: f32) -> Self {
        match tier {
            PlatformTier::Desktop => Self {
                tier,
                count: desktop_count(config.star_count, viewport_width),
                cap: CAP_DESKTOP,
                size_range: config.size_range,
                opacity_scale: 1.0,
                glow: true,
                connections: true,
                nebula: true,
                sparkles: true,
                pointer_trail: true,
            },
            PlatformTier::Mobile => Self {
                tier,
                count: config.star_count_mobile,
                cap: CAP_MOBILE,
                size_range: config.size_range,
                opacity_scale: 1.0,
                glow: true,
                connections: true,
                nebula: true,
                sparkles: false,
                pointer_trail: false,
            },
            PlatformTier::Constrained => Self {
                tier,
                count: config.star_count_constrained,
                cap: CAP_CONSTRAINED,
                size_range: config.size_range_constrained,
                opacity_scale: 0.5,
                glow: false,
                connections: false,
                nebula: false,
                sparkles: false,
                pointer_trail: false,
            },
        }
    }
}

// Narrower desktops get proportionally fewer stars (300 / 250 / 200 by default).
fn desktop_count(star_count: usize, width: f32) -> usize {
    if width > WIDE_DESKTOP_WIDTH {
        star_count
    } else if width > MEDIUM_DESKTOP_WIDTH {
        star_count * 5 / 6
    } else {
        star_count * 2 / 3
    }
}
