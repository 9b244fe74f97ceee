use crate::constants::{PROBE_OVER_BUDGET_RATIO, PROBE_SAMPLES};
use crate::tier::PlatformTier;
use std::time::Duration;

/// Skips frames that arrive sooner than the target interval after the
/// previous executed frame.
#[derive(Clone, Debug)]
pub struct FrameThrottle {
    interval: Duration,
    last: Option<Duration>,
}

impl FrameThrottle {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: None,
        }
    }

    pub fn for_tier(tier: PlatformTier) -> Self {
        Self::new(tier.target_fps())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// `now` is any monotonic timestamp. Returns true (and records the
    /// frame) when the update-and-draw pair should run.
    pub fn ready(&mut self, now: Duration) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the previous frame so the next `ready` call runs immediately
    /// (used after a pause).
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Measures executed frame intervals and recommends a cheaper tier when the
/// field cannot keep up with its budget.
#[derive(Clone, Debug)]
pub struct TierProbe {
    tier: PlatformTier,
    samples: Vec<Duration>,
    last: Option<Duration>,
}

impl TierProbe {
    pub fn new(tier: PlatformTier) -> Self {
        Self {
            tier,
            samples: Vec::with_capacity(PROBE_SAMPLES),
            last: None,
        }
    }

    /// Record an executed frame at `now`. Returns the tier to switch to once
    /// a full window of samples averages over budget.
    pub fn record(&mut self, now: Duration) -> Option<PlatformTier> {
        if let Some(last) = self.last.replace(now) {
            self.samples.push(now.saturating_sub(last));
        }
        if self.samples.len() < PROBE_SAMPLES {
            return None;
        }
        let total: Duration = self.samples.iter().sum();
        let mean = total / self.samples.len() as u32;
        self.samples.clear();
        let budget = self.tier.frame_interval().mul_f32(PROBE_OVER_BUDGET_RATIO);
        if mean > budget {
            let next = self.tier.downgrade()?;
            log::warn!(
                "[probe] mean frame {:.1}ms over budget {:.1}ms, {:?} -> {:?}",
                mean.as_secs_f64() * 1000.0,
                budget.as_secs_f64() * 1000.0,
                self.tier,
                next
            );
            self.tier = next;
            return Some(next);
        }
        None
    }

    /// Forget the window collected so far; the next sample starts fresh.
    pub fn restart(&mut self) {
        self.last = None;
        self.samples.clear();
    }
}
