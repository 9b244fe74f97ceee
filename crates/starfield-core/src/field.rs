//! The particle field: per-frame physics for the decorative star layer.
//!
//! All state is owned here and mutated from exactly two places: the input
//! methods (`pointer_moved`, `scrolled`, `resize`, ...) that record samples,
//! and `tick`, which the host calls once per executed animation frame.
//! Physics steps are per frame, not per second; `now` only drives timers
//! (scroll idle, staggered bursts, timed attraction).

use crate::config::FieldConfig;
use crate::constants::*;
use crate::events::FieldEvent;
use crate::particle::{BurstKind, Particle};
use crate::surface::finite_or;
use crate::theme::Theme;
use crate::tier::{PlatformTier, TierProfile};
use glam::Vec2;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::f32::consts::TAU;
use std::time::Duration;

/// Upper bound on particle speed in px per frame.
pub const MAX_SPEED: f32 = 8.0;

/// A line between two particles that were close this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, Default)]
struct PointerState {
    raw: Option<Vec2>,
    eased: Option<Vec2>,
}

#[derive(Clone, Copy, Debug, Default)]
struct ScrollState {
    y: f32,
    last_y: f32,
    max: f32,
    scrolling: bool,
    last_event: Duration,
}

#[derive(Clone, Copy, Debug)]
struct Attractor {
    point: Vec2,
    radius: f32,
    until: Duration,
}

#[derive(Clone, Copy, Debug)]
struct PendingBurst {
    at: Duration,
    point: Vec2,
    kind: BurstKind,
    hue: Option<f32>,
}

pub struct ParticleField {
    config: FieldConfig,
    profile: TierProfile,
    theme: Theme,
    viewport: Vec2,
    rng: StdRng,
    particles: Vec<Particle>,
    connections: Vec<Connection>,
    pointer: PointerState,
    scroll: ScrollState,
    attractors: Vec<Attractor>,
    pending: Vec<PendingBurst>,
    dimming: f32,
    target_dimming: f32,
    time: f32,
    now: Duration,
    paused: bool,
    alive: bool,
    tier_pinned: bool,
}

impl ParticleField {
    pub fn new(
        config: FieldConfig,
        viewport: Vec2,
        tier: PlatformTier,
        theme: Theme,
        seed: u64,
    ) -> Self {
        let mut field = Self::with_particles(config, viewport, tier, theme, seed, Vec::new());
        field.reseed();
        field
    }

    /// Build a field around an explicit particle set (no seeding).
    pub fn with_particles(
        config: FieldConfig,
        viewport: Vec2,
        tier: PlatformTier,
        theme: Theme,
        seed: u64,
        particles: Vec<Particle>,
    ) -> Self {
        let config = config.sanitized();
        let viewport = sane_viewport(viewport);
        let profile = TierProfile::resolve(tier, &config, viewport.x);
        let dimming = config.hero_dimming.clamp(DIMMING_MIN, DIMMING_MAX);
        Self {
            config,
            profile,
            theme,
            viewport,
            rng: StdRng::seed_from_u64(seed),
            particles,
            connections: Vec::new(),
            pointer: PointerState::default(),
            scroll: ScrollState::default(),
            attractors: Vec::new(),
            pending: Vec::new(),
            dimming,
            target_dimming: dimming,
            time: 0.0,
            now: Duration::ZERO,
            paused: false,
            alive: true,
            tier_pinned: false,
        }
    }

    fn reseed(&mut self) {
        let count = self.profile.count.min(self.profile.cap);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::seeded(
                &mut self.rng,
                &self.config,
                &self.profile,
                self.theme,
                self.viewport,
            ));
        }
        self.particles = particles;
        self.connections.clear();
        log::info!(
            "[field] seeded {} stars for {:?} at {:.0}x{:.0}",
            self.particles.len(),
            self.profile.tier,
            self.viewport.x,
            self.viewport.y
        );
    }

    // ---------------- accessors ----------------

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn profile(&self) -> &TierProfile {
        &self.profile
    }

    pub fn tier(&self) -> PlatformTier {
        self.profile.tier
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Eased pointer position, once the pointer has been seen.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer.eased
    }

    pub fn dimming(&self) -> f32 {
        self.dimming
    }

    /// True once the page has scrolled past the hero area.
    pub fn section_dimmed(&self) -> bool {
        self.target_dimming < self.config.hero_dimming
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.scrolling
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn temporary_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_temporary()).count()
    }

    // ---------------- lifecycle ----------------

    pub fn pause(&mut self) {
        if !self.paused {
            log::debug!("[field] paused");
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused && self.alive {
            log::debug!("[field] resumed");
            self.paused = false;
        }
    }

    /// Release every particle; the field ignores input from now on.
    pub fn destroy(&mut self) {
        self.alive = false;
        self.particles = Vec::new();
        self.connections = Vec::new();
        self.attractors.clear();
        self.pending.clear();
        log::info!("[field] destroyed");
    }

    /// Update the viewport. Crossing the mobile breakpoint swaps the
    /// Desktop/Mobile tier and reseeds unless the tier is pinned; returns
    /// whether that happened.
    pub fn resize(&mut self, viewport: Vec2) -> bool {
        let viewport = sane_viewport(viewport);
        let was_mobile = self.viewport.x <= MOBILE_BREAKPOINT;
        let is_mobile = viewport.x <= MOBILE_BREAKPOINT;
        self.viewport = viewport;
        if was_mobile != is_mobile
            && !self.tier_pinned
            && self.profile.tier != PlatformTier::Constrained
        {
            self.set_tier(PlatformTier::for_width(viewport.x));
            return true;
        }
        self.profile = TierProfile::resolve(self.profile.tier, &self.config, viewport.x);
        false
    }

    /// Switch budgets; the population is reseeded for the new tier.
    pub fn set_tier(&mut self, tier: PlatformTier) {
        if !self.alive {
            return;
        }
        self.profile = TierProfile::resolve(tier, &self.config, self.viewport.x);
        self.reseed();
    }

    /// Keep the current tier across breakpoint resizes (an explicit page
    /// attribute or host override chose it).
    pub fn pin_tier(&mut self, pinned: bool) {
        self.tier_pinned = pinned;
    }

    pub fn is_tier_pinned(&self) -> bool {
        self.tier_pinned
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    // ---------------- input ----------------

    /// Record a raw pointer sample (CSS px). The first sample snaps the eased
    /// pointer so the field does not sweep in from the origin.
    pub fn pointer_moved(&mut self, point: Vec2) {
        if !point.is_finite() || !self.alive {
            return;
        }
        self.pointer.raw = Some(point);
        if self.pointer.eased.is_none() {
            self.pointer.eased = Some(point);
        }
        if self.paused {
            return;
        }
        if self.profile.pointer_trail && self.rng.gen_bool(TRAIL_CHANCE) {
            self.spawn_burst(point, BurstKind::Trail, None);
        }
        let radius = self.config.mouse_influence;
        for p in &mut self.particles {
            let delta = point - p.pos;
            let d = delta.length();
            if d > 0.0 && d < radius {
                let influence = 1.0 - d / radius;
                if influence > POINTER_BOOST_THRESHOLD {
                    p.vel += delta / d * influence * 0.015;
                }
            }
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = PointerState::default();
    }

    /// Record the scroll offset. `max_scroll` is document height minus
    /// viewport height; `now` is the host's monotonic clock.
    pub fn scrolled(&mut self, scroll_y: f32, max_scroll: f32, now: Duration) {
        if !scroll_y.is_finite() {
            return;
        }
        self.scroll.y = scroll_y;
        self.scroll.max = if max_scroll.is_finite() {
            max_scroll.max(0.0)
        } else {
            0.0
        };
        self.scroll.scrolling = true;
        self.scroll.last_event = now;
    }

    // ---------------- effects ----------------

    /// Spawn a cluster of temporary particles at `point`. Returns how many
    /// were added.
    pub fn spawn_burst(&mut self, point: Vec2, kind: BurstKind, hue: Option<f32>) -> usize {
        if !self.alive || !point.is_finite() {
            return 0;
        }
        let burst = kind.spawn(&mut self.rng, point, hue, self.theme, self.config.trail_size);
        let n = burst.len();
        self.particles.extend(burst);
        n
    }

    /// One-shot pull toward `point` with a growth and twinkle boost for
    /// particles inside `radius`.
    pub fn attract(&mut self, point: Vec2, radius: f32) {
        if !self.alive || !point.is_finite() || !(radius > 0.0) {
            return;
        }
        for p in &mut self.particles {
            let delta = point - p.pos;
            let d = delta.length();
            if d > 0.0 && d < radius {
                let attraction = (1.0 - d / radius) * 0.6;
                p.vel += delta / d * attraction * 0.03;
                p.target_growth = p.target_growth.max(attraction * 0.8);
                p.twinkle_speed = (p.twinkle_speed * 1.5).min(TWINKLE_SPEED_MAX);
            }
        }
    }

    /// Keep pulling toward `point` for `duration`.
    pub fn attract_for(&mut self, point: Vec2, radius: f32, duration: Duration) {
        if !self.alive || !point.is_finite() || !(radius > 0.0) {
            return;
        }
        self.attract(point, radius);
        self.attractors.push(Attractor {
            point,
            radius,
            until: self.now + duration,
        });
    }

    /// Gentle wave of bursts around a headline whose text just changed,
    /// staggered over the next few hundred milliseconds.
    pub fn text_changed(&mut self, center: Vec2, width: f32) {
        if !self.alive || !center.is_finite() {
            return;
        }
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let radius = (width * 0.6).min(WAVE_MAX_RADIUS);
        for i in 0..WAVE_BURSTS {
            let angle = i as f32 / WAVE_BURSTS as f32 * TAU;
            let dist = radius * (0.3 + self.rng.gen::<f32>() * 0.4);
            self.pending.push(PendingBurst {
                at: self.now + WAVE_STAGGER * i as u32,
                point: center + Vec2::from_angle(angle) * dist,
                kind: BurstKind::Elegant,
                hue: None,
            });
        }
        self.attract(center, (width * 1.2).max(1.0));
    }

    pub fn apply(&mut self, event: FieldEvent) {
        match event {
            FieldEvent::Attract { point, radius } => {
                self.attract_for(point, radius, ATTRACT_DURATION)
            }
            FieldEvent::Burst { point, kind, hue } => {
                self.spawn_burst(point, kind, hue);
            }
            FieldEvent::TextChanged { center, width } => self.text_changed(center, width),
            FieldEvent::Theme(theme) => self.set_theme(theme),
        }
    }

    // ---------------- per-frame update ----------------

    /// Advance one executed frame.
    pub fn tick(&mut self, now: Duration) {
        if !self.alive || self.paused {
            return;
        }
        self.now = now;
        self.release_pending();
        if self.scroll.scrolling && now.saturating_sub(self.scroll.last_event) >= SCROLL_IDLE {
            self.scroll.scrolling = false;
        }
        self.attractors.retain(|a| a.until > now);

        // 1. ease the pointer toward the latest raw sample
        if let (Some(raw), Some(eased)) = (self.pointer.raw, self.pointer.eased) {
            self.pointer.eased = Some(eased + (raw - eased) * POINTER_EASE);
        }

        let scroll_delta = self.scroll.y - self.scroll.last_y;
        for i in 0..self.particles.len() {
            self.step_particle(i, scroll_delta);
        }
        self.scroll.last_y = self.scroll.y;

        self.collect_temporary();
        self.rebuild_connections();
        self.update_dimming();
        self.time += TIME_STEP;
    }

    fn step_particle(&mut self, i: usize, scroll_delta: f32) {
        let radius = self.config.mouse_influence;
        let pointer = self.pointer.eased;
        let parallax = self.config.scroll_parallax;
        let parallax_factor = self.config.parallax_factor;
        let max_scroll_velocity = self.config.max_scroll_velocity;
        let smoothing = self.config.scroll_smoothing;
        let scrolling = self.scroll.scrolling;
        let time = self.time;
        let viewport = self.viewport;
        let jitter = Vec2::new(self.rng.gen::<f32>() - 0.5, self.rng.gen::<f32>() - 0.5)
            * VELOCITY_JITTER;

        let p = &mut self.particles[i];

        // 2. twinkle, pointer attraction and growth
        p.twinkle = (p.twinkle + p.twinkle_speed) % TAU;
        if p.special {
            p.pulse_phase = (p.pulse_phase + SPECIAL_PULSE_STEP) % TAU;
        }
        let mut target = 0.0_f32;
        if let Some(m) = pointer {
            let delta = m - p.pos;
            let d = delta.length();
            if d > 0.0 && d < radius {
                let force = (1.0 - d / radius) * 0.5;
                p.vel += delta / d * force * 0.02;
                target = force;
            }
        }
        for a in &self.attractors {
            let delta = a.point - p.pos;
            let d = delta.length();
            if d > 0.0 && d < a.radius {
                let attraction = (1.0 - d / a.radius) * 0.6;
                p.vel += delta / d * attraction * 0.005;
                target = target.max(attraction * 0.8);
            }
        }
        p.target_growth = target.clamp(0.0, 1.0);
        p.growth = (p.growth + (p.target_growth - p.growth) * GROWTH_EASE).clamp(0.0, 1.0);

        // 4. integrate, damp, relax toward drift
        p.vel += jitter;
        if !p.vel.is_finite() {
            p.vel = p.base_vel;
        }
        p.vel = p.vel.clamp_length_max(MAX_SPEED);
        let next = p.pos + p.vel;
        if next.is_finite() {
            p.pos = next;
        }
        p.vel *= VELOCITY_DAMPING;
        p.vel += (p.base_vel - p.vel) * BASE_VELOCITY_RELAX;

        // 5. scroll parallax: nearer (depth -> 0) layers move more
        if parallax && scroll_delta != 0.0 {
            let strength = parallax_factor * (1.0 - p.depth);
            let sway = (p.layer as f32).sin();
            let shifted = p.pos
                + Vec2::new(
                    scroll_delta * strength * 0.1 * sway,
                    scroll_delta * strength * 0.5,
                );
            if shifted.is_finite() {
                p.pos = shifted;
            }
            if scrolling {
                let smoothed = if scroll_delta.abs() > max_scroll_velocity {
                    scroll_delta * smoothing
                } else {
                    scroll_delta
                };
                p.vel.y -= smoothed * 0.002 * strength;
                p.vel.x += smoothed * 0.0005 * (time + p.layer as f32).sin();
                p.vel = p.vel.clamp_length_max(MAX_SPEED);
            }
        }

        wrap(&mut p.pos, viewport);
        if !p.pos.is_finite() {
            p.pos = viewport * 0.5;
        }
        if !p.opacity.is_finite() {
            p.opacity = p.base_opacity;
        }
        p.opacity = p.opacity.clamp(0.0, 1.0);
    }

    fn release_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let now = self.now;
        let (due, later): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|b| b.at <= now);
        self.pending = later;
        for b in due {
            self.spawn_burst(b.point, b.kind, b.hue);
        }
    }

    fn collect_temporary(&mut self) {
        self.particles.retain_mut(|p| match p.life.as_mut() {
            Some(life) => {
                life.remaining -= life.decay;
                p.opacity = (p.base_opacity * life.remaining).clamp(0.0, 1.0);
                life.remaining > 0.0
            }
            None => true,
        });
        if self.particles.len() > self.profile.cap {
            self.particles.truncate(self.profile.cap);
        }
    }

    // 3. bounded pairwise scan; each particle joins at most `max_connections`
    fn rebuild_connections(&mut self) {
        self.connections.clear();
        if !self.profile.connections || self.config.max_connections == 0 {
            return;
        }
        let max = self.config.max_connections;
        let threshold = self.config.connection_distance;
        let n = self.particles.len();
        let mut degree = vec![0usize; n];
        for i in 0..n {
            if degree[i] >= max {
                continue;
            }
            let a = self.particles[i].pos;
            for j in (i + 1)..n {
                if degree[j] >= max {
                    continue;
                }
                let distance = a.distance(self.particles[j].pos);
                if distance < threshold {
                    self.connections.push(Connection { a: i, b: j, distance });
                    degree[i] += 1;
                    degree[j] += 1;
                    if degree[i] >= max {
                        break;
                    }
                }
            }
        }
    }

    // 6. full brightness over the hero, slightly dimmed below it
    fn update_dimming(&mut self) {
        let fraction = if self.scroll.max > 0.0 {
            self.scroll.y / self.scroll.max
        } else {
            0.0
        };
        self.target_dimming = if fraction < HERO_SCROLL_FRACTION {
            self.config.hero_dimming
        } else {
            self.config.section_dimming
        };
        let next = self.dimming + (self.target_dimming - self.dimming) * self.config.dimming_speed;
        self.dimming = finite_or(next, DIMMING_MAX).clamp(DIMMING_MIN, DIMMING_MAX);
    }

    /// Degree of each particle in this frame's connection list.
    pub fn connection_degrees(&self) -> Vec<usize> {
        let mut degree = vec![0usize; self.particles.len()];
        for c in &self.connections {
            degree[c.a] += 1;
            degree[c.b] += 1;
        }
        degree
    }
}

fn sane_viewport(v: Vec2) -> Vec2 {
    let fix = |x: f32| if x.is_finite() && x >= 1.0 { x } else { 1.0 };
    Vec2::new(fix(v.x), fix(v.y))
}

/// Wrap across the viewport once a particle leaves it by more than the margin.
pub fn wrap(pos: &mut Vec2, viewport: Vec2) {
    let m = WRAP_MARGIN;
    if pos.x < -m {
        pos.x = viewport.x + m;
    } else if pos.x > viewport.x + m {
        pos.x = -m;
    }
    if pos.y < -m {
        pos.y = viewport.y + m;
    } else if pos.y > viewport.y + m {
        pos.y = -m;
    }
}

/// Shortest distance from `point` to the segment `a..b`; `None` for a
/// degenerate segment.
pub fn segment_distance(point: Vec2, a: Vec2, b: Vec2) -> Option<f32> {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if !(len_sq > 0.0) {
        return None;
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    Some(point.distance(a + ab * t))
}
