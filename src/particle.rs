//! Particles and the per-container particle collection.

use crate::options::{Color, ParticlesOptions};
use crate::utils::{get_distance, random_in_range_with, Dimension};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// A single simulated entity.
///
/// Updaters keep their per-particle state in the public fields below
/// (`life_remaining`, `opacity_velocity`); a particle that was never
/// initialized by an updater simply leaves those at their defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Unique within its container, never reused.
    pub id: u64,
    pub position: Vec2,
    /// Where the particle was created.
    pub initial_position: Vec2,
    /// Pixels per 60 Hz frame.
    pub velocity: Vec2,
    pub radius: f32,
    /// Name of the shape drawer used for this particle.
    pub shape: String,
    pub color: Color,
    pub opacity: f32,
    /// Opacity change per second while animated, `0.0` when static.
    pub opacity_velocity: f32,
    /// Seconds left to live, `None` for unlimited.
    pub life_remaining: Option<f32>,
    destroyed: bool,
    initialized: bool,
}

impl Particle {
    /// Create a particle at `position` following `options`.
    pub fn new<R: Rng + ?Sized>(id: u64, position: Vec2, options: &ParticlesOptions, rng: &mut R) -> Self {
        let types = options.shape.types.as_slice();
        let shape = if types.is_empty() {
            "circle".to_string()
        } else {
            types[rng.gen_range(0..types.len())].clone()
        };

        let movement = &options.movement;
        let velocity = if movement.enable {
            let heading = movement.direction.heading().unwrap_or_else(|| {
                let angle = random_in_range_with(rng, 0.0, TAU);
                Vec2::new(angle.cos(), angle.sin())
            });
            let speed = if movement.random {
                random_in_range_with(rng, 0.0, movement.speed)
            } else {
                movement.speed
            };
            heading * speed
        } else {
            Vec2::ZERO
        };

        Self {
            id,
            position,
            initial_position: position,
            velocity,
            radius: options.size.sample(rng).max(0.0),
            shape,
            color: options.color,
            opacity: options.opacity.value.sample(rng),
            opacity_velocity: 0.0,
            life_remaining: None,
            destroyed: false,
            initialized: false,
        }
    }

    /// Mark the particle for removal at the end of the frame.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether updaters have already run their `init` on this particle.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Snapshot suitable for uploading to a GPU instance buffer.
    pub fn to_instance(&self) -> ParticleInstance {
        ParticleInstance {
            position: self.position.to_array(),
            radius: self.radius,
            opacity: self.opacity,
            color: self.color.to_f32(),
            _pad: 0.0,
        }
    }
}

/// Plain-old-data particle record for external renderers.
///
/// 32 bytes, 16-byte friendly: `bytemuck::cast_slice` on a slice of these
/// gives the raw instance buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub opacity: f32,
    pub color: [f32; 3],
    _pad: f32,
}

/// The particle collection owned by a container.
///
/// Keeps creation order: the oldest particle is first.
#[derive(Debug, Default)]
pub struct Particles {
    items: Vec<Particle>,
    next_id: u64,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.items
    }

    pub fn get(&self, id: u64) -> Option<&Particle> {
        self.items.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Particle> {
        self.items.iter_mut().find(|p| p.id == id)
    }

    /// The most recently added particle.
    pub fn last_mut(&mut self) -> Option<&mut Particle> {
        self.items.last_mut()
    }

    /// Create a particle and append it.
    ///
    /// `position` defaults to a random point in `dimension`. Returns `None`
    /// when `options.limit` is already reached.
    pub fn add<R: Rng + ?Sized>(
        &mut self,
        options: &ParticlesOptions,
        dimension: Dimension,
        position: Option<Vec2>,
        rng: &mut R,
    ) -> Option<u64> {
        if options.limit > 0 && self.items.len() >= options.limit {
            return None;
        }

        let position = position.unwrap_or_else(|| {
            Vec2::new(
                random_in_range_with(rng, 0.0, dimension.width),
                random_in_range_with(rng, 0.0, dimension.height),
            )
        });

        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Particle::new(id, position, options, rng));
        Some(id)
    }

    /// Remove up to `quantity` of the oldest particles.
    pub fn remove_quantity(&mut self, quantity: usize) -> usize {
        let n = quantity.min(self.items.len());
        self.items.drain(..n);
        n
    }

    /// Drop every particle marked destroyed; returns how many went.
    pub fn remove_destroyed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|p| !p.is_destroyed());
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Ids of particles whose circle contains `point`.
    pub fn ids_at(&self, point: Vec2) -> Vec<u64> {
        self.items
            .iter()
            .filter(|p| get_distance(p.position, point) <= p.radius)
            .map(|p| p.id)
            .collect()
    }

    /// GPU-friendly snapshot of every particle.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.items.iter().map(Particle::to_instance).collect()
    }
}
