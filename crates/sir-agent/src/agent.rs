//! The `Agent` entity: locomotion and health transitions.

use sir_core::{AgentId, Configuration, Locomotion, Plane, RandomSource, Vec2};

use crate::health::{Health, HealthState, Infection, Rgb};

// ── Locomotion constants ──────────────────────────────────────────────────────

/// Fraction of the to-waypoint vector added to velocity each tick.
pub const SEEK_GAIN: f32 = 1.0 / 400.0;

/// Seek: a waypoint counts as reached when both axis distances are within this.
pub const SEEK_ARRIVAL_MARGIN: f32 = 40.0;

/// Direct stepping: arrival margin.
pub const DIRECT_ARRIVAL_MARGIN: f32 = 20.0;

/// Direct stepping moves `clamped_delta / DIRECT_STEP_DIVISOR` per tick.
pub const DIRECT_STEP_DIVISOR: f32 = 5.0;

/// Seek waypoints keep at least this far from the plane edges.
pub const DESTINATION_MARGIN: f32 = 10.0;

/// Default rendered radius.
pub const DEFAULT_SIZE: f32 = 4.0;

/// Per-agent motion constants, fixed at creation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionLimits {
    /// Velocity bound per axis.
    pub max_speed: f32,
    /// Smallest per-axis step under [`Locomotion::Direct`].
    pub min_speed: f32,
    /// Per-tick magnitude reduction of each velocity axis under
    /// [`Locomotion::Seek`].
    pub drag: f32,
}

impl Default for MotionLimits {
    fn default() -> Self {
        Self { max_speed: 3.0, min_speed: 0.5, drag: 0.5 }
    }
}

/// One simulated individual.
///
/// Position is never clamped to the plane: seek overshoot and repulsion can
/// carry an agent outside it, and only new waypoints are drawn inside.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    id:          AgentId,
    position:    Vec2,
    destination: Vec2,
    velocity:    Vec2,
    limits:      MotionLimits,
    size:        f32,
    health:      Health,
}

impl Agent {
    /// A susceptible agent at rest.
    pub fn new(id: AgentId, position: Vec2, destination: Vec2, limits: MotionLimits, size: f32) -> Self {
        Self {
            id,
            position,
            destination,
            velocity: Vec2::ZERO,
            limits,
            size,
            health: Health::Susceptible,
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn destination(&self) -> Vec2 {
        self.destination
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn limits(&self) -> MotionLimits {
        self.limits
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn health(&self) -> &Health {
        &self.health
    }

    #[inline]
    pub fn state(&self) -> HealthState {
        self.health.state()
    }

    #[inline]
    pub fn color(&self) -> Rgb {
        self.state().color()
    }

    /// Current contagion radius, `None` unless infected.
    #[inline]
    pub fn contagion_radius(&self) -> Option<f32> {
        self.health.infection().map(|inf| inf.contagion_radius)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self.health, Health::Dead)
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move one tick toward the current waypoint, picking a new one on
    /// arrival.
    pub fn advance_position<R: RandomSource + ?Sized>(
        &mut self,
        plane:      &Plane,
        locomotion: Locomotion,
        rng:        &mut R,
    ) {
        match locomotion {
            Locomotion::Seek   => self.seek(plane, rng),
            Locomotion::Direct => self.step_direct(plane, rng),
        }
    }

    fn seek<R: RandomSource + ?Sized>(&mut self, plane: &Plane, rng: &mut R) {
        let to_dest = self.destination - self.position;
        self.velocity += to_dest * SEEK_GAIN;

        if self.position.within_box(self.destination, SEEK_ARRIVAL_MARGIN) {
            self.destination = plane.random_point_inset(DESTINATION_MARGIN, rng);
        }

        self.velocity = self.velocity.clamp_axes(self.limits.max_speed);
        self.velocity.x = apply_drag(self.velocity.x, self.limits.drag);
        self.velocity.y = apply_drag(self.velocity.y, self.limits.drag);

        self.position += self.velocity;
    }

    fn step_direct<R: RandomSource + ?Sized>(&mut self, plane: &Plane, rng: &mut R) {
        let to_dest = self.destination - self.position;

        if self.position.within_box(self.destination, DIRECT_ARRIVAL_MARGIN) {
            self.destination = plane.random_point(rng);
        }

        let step = Vec2::new(
            bound_step(to_dest.x, self.limits),
            bound_step(to_dest.y, self.limits),
        );
        self.position += step * (1.0 / DIRECT_STEP_DIVISOR);
    }

    /// Add an external velocity change (repulsion) and re-apply the speed
    /// clamp.
    #[inline]
    pub fn push(&mut self, delta: Vec2) {
        self.velocity = (self.velocity + delta).clamp_axes(self.limits.max_speed);
    }

    // ── Health ────────────────────────────────────────────────────────────

    /// Progress an active infection by one tick.
    ///
    /// Returns the terminal state entered this tick, if any.  Does nothing
    /// (and returns `None`) unless the agent is infected.
    pub fn update_status(&mut self, config: &Configuration) -> Option<HealthState> {
        let Health::Infected(infection) = &mut self.health else {
            return None;
        };
        let outcome = infection.progress(config);
        match outcome {
            Some(HealthState::Dead)   => self.health = Health::Dead,
            Some(HealthState::Immune) => self.health = Health::Immune,
            _ => {}
        }
        outcome
    }

    /// Infect a susceptible agent, drawing its timer and hit points from the
    /// configured ranges (timer first).
    ///
    /// Returns `false` (and changes nothing) for any other state.
    pub fn infect<R: RandomSource + ?Sized>(&mut self, config: &Configuration, rng: &mut R) -> bool {
        if !matches!(self.health, Health::Susceptible) {
            return false;
        }
        let timer = rng.uniform(config.infection_time_range.min, config.infection_time_range.max);
        let hit_points = rng.uniform(config.hit_point_range.min, config.hit_point_range.max);
        self.health = Health::Infected(Infection::new(timer, hit_points));
        true
    }

    /// Kill the agent outright.
    pub fn die(&mut self) {
        self.health = Health::Dead;
    }

    /// Overwrite health directly.  Intended for scenario setup and tests;
    /// the simulation itself only moves health through `infect`,
    /// `update_status`, and `die`.
    pub fn set_health(&mut self, health: Health) {
        self.health = health;
    }

    /// Teleport without touching velocity or waypoint.
    pub fn place(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// Shrink `v` toward zero by `drag` when its magnitude exceeds `drag`.
#[inline]
fn apply_drag(v: f32, drag: f32) -> f32 {
    if v.abs() > drag { v - drag * v.signum() } else { v }
}

/// Clamp a direct-mode step so its magnitude lies in `[min_speed, max_speed]`.
/// A zero delta steps in the positive direction.
#[inline]
fn bound_step(d: f32, limits: MotionLimits) -> f32 {
    let sign = if d < 0.0 { -1.0 } else { 1.0 };
    if d.abs() > limits.max_speed {
        sign * limits.max_speed
    } else if d.abs() < limits.min_speed {
        sign * limits.min_speed
    } else {
        d
    }
}
