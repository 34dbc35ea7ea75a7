//! Particle emitters for runtime spawning.
//!
//! Emitters add particles to a running container, on top of the initial
//! `particles.number`. They are provided by the built-in `emitters` plugin,
//! which every container with a non-empty `emitters` list loads.
//!
//! # Emitter Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EmitterOptions::Point`] | Continuous spawning from one point |
//! | [`EmitterOptions::Burst`] | One-time burst of particles |
//! | [`EmitterOptions::Cone`] | Continuous spawning in a directional cone |
//!
//! Positions are percentages of the canvas size, so `[50, 50]` is the
//! center whatever the surface size. Spawned particles respect
//! `particles.limit`.
//!
//! # Velocity Control
//!
//! - `speed` - launch speed in pixels per 60 Hz frame; `0` keeps the
//!   velocity the particle options give
//! - `direction` / `spread` - heading and angular spread in radians (cone only)
//!
//! # Example
//!
//! ```ignore
//! // Fountain shooting upward from the bottom center
//! {
//!     "emitters": [
//!         { "type": "cone", "position": [50, 100], "direction": [0, -1],
//!           "speed": 6, "spread": 0.3, "rate": 40 }
//!     ]
//! }
//! ```

use crate::container::ContainerCore;
use crate::options::Options;
use crate::plugins::{ContainerPlugin, Plugin};
use crate::time::Delta;
use crate::utils::{random_in_range_with, Dimension};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::trace;

/// Particle emitter configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EmitterOptions {
    /// Emit particles from a single point in random directions.
    Point {
        /// Spawn position, percent of the canvas.
        position: Vec2,
        /// Particles per second.
        rate: f32,
        #[serde(default)]
        speed: f32,
    },

    /// Spawn `count` particles in a single frame, then stop.
    Burst {
        /// Spawn position, percent of the canvas.
        position: Vec2,
        count: usize,
        #[serde(default)]
        speed: f32,
    },

    /// Emit particles in a cone around `direction`.
    Cone {
        /// Spawn position, percent of the canvas.
        position: Vec2,
        /// Center of the cone; does not need to be normalized.
        direction: Vec2,
        speed: f32,
        /// Half-angle of the cone in radians.
        spread: f32,
        /// Particles per second.
        rate: f32,
    },
}

impl EmitterOptions {
    pub fn position(&self) -> Vec2 {
        match self {
            EmitterOptions::Point { position, .. }
            | EmitterOptions::Burst { position, .. }
            | EmitterOptions::Cone { position, .. } => *position,
        }
    }

    /// Spawn position in canvas pixels.
    pub fn position_in(&self, dimension: Dimension) -> Vec2 {
        let percent = self.position() / 100.0;
        Vec2::new(percent.x * dimension.width, percent.y * dimension.height)
    }
}

/// Spawning state of one emitter.
#[derive(Debug)]
struct EmitterState {
    options: EmitterOptions,
    /// Fractional particles carried over between frames.
    accumulator: f32,
    fired: bool,
}

impl EmitterState {
    fn new(options: EmitterOptions) -> Self {
        Self {
            options,
            accumulator: 0.0,
            fired: false,
        }
    }

    /// How many particles to spawn this frame.
    fn due(&mut self, delta: &Delta) -> usize {
        match self.options {
            EmitterOptions::Point { rate, .. } | EmitterOptions::Cone { rate, .. } => {
                self.accumulator += rate.max(0.0) * delta.seconds();
                let whole = self.accumulator.floor();
                self.accumulator -= whole;
                whole as usize
            }
            EmitterOptions::Burst { count, .. } => {
                if self.fired {
                    0
                } else {
                    self.fired = true;
                    count
                }
            }
        }
    }

    fn spawn(&self, core: &mut ContainerCore) -> bool {
        let position = self.options.position_in(core.dimension());
        if core.add_particle(Some(position)).is_none() {
            return false;
        }

        let velocity = match self.options {
            EmitterOptions::Point { speed, .. } | EmitterOptions::Burst { speed, .. } if speed > 0.0 => {
                let angle = random_in_range_with(core.rng(), 0.0, TAU);
                Some(Vec2::new(angle.cos(), angle.sin()) * speed)
            }
            EmitterOptions::Cone { direction, speed, spread, .. } => {
                let base = direction.normalize_or_zero();
                let base_angle = base.y.atan2(base.x);
                let angle = base_angle + random_in_range_with(core.rng(), -spread, spread);
                Some(Vec2::new(angle.cos(), angle.sin()) * speed)
            }
            _ => None,
        };

        if let (Some(velocity), Some(particle)) = (velocity, core.particles_mut().last_mut()) {
            particle.velocity = velocity;
        }
        true
    }
}

/// Per-container emitter runner.
#[derive(Debug)]
pub struct Emitters {
    emitters: Vec<EmitterState>,
}

impl Emitters {
    pub fn new(options: &[EmitterOptions]) -> Self {
        Self {
            emitters: options.iter().cloned().map(EmitterState::new).collect(),
        }
    }
}

impl ContainerPlugin for Emitters {
    fn update(&mut self, core: &mut ContainerCore, delta: &Delta) {
        for emitter in self.emitters.iter_mut() {
            let due = emitter.due(delta);
            let mut spawned = 0;
            while spawned < due && emitter.spawn(core) {
                spawned += 1;
            }
            if spawned > 0 {
                trace!(container = %core.id(), spawned, "emitter spawned particles");
            }
        }
    }
}

/// The built-in `emitters` plugin.
#[derive(Debug, Default)]
pub struct EmittersPlugin;

impl EmittersPlugin {
    pub const ID: &'static str = "emitters";
}

impl Plugin for EmittersPlugin {
    fn id(&self) -> &str {
        Self::ID
    }

    fn needs_plugin(&self, options: &Options) -> bool {
        !options.emitters.is_empty()
    }

    fn get_plugin(&self, core: &ContainerCore) -> Box<dyn ContainerPlugin> {
        Box::new(Emitters::new(&core.options().emitters))
    }
}
