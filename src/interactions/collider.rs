use crate::container::ContainerCore;
use crate::error::InteractorError;
use crate::interactor::Interactor;
use crate::options::CollisionMode;
use crate::particle::Particle;
use crate::time::Delta;
use crate::utils::get_distances;

/// Resolves touching particles each frame.
///
/// `bounce` exchanges the velocity components along the contact normal, as
/// for an elastic collision between equal masses. `destroy` removes the
/// smaller particle, or both when they are the same size.
///
/// Pairs are tested exhaustively, which is fine for the few hundred
/// particles a container usually holds.
#[derive(Debug)]
pub struct Collider {
    enable: bool,
    mode: CollisionMode,
}

impl Collider {
    pub fn new(core: &ContainerCore) -> Self {
        let collisions = &core.options().particles.collisions;
        Self::with_mode(collisions.enable, collisions.mode)
    }

    pub fn with_mode(enable: bool, mode: CollisionMode) -> Self {
        Self { enable, mode }
    }

    /// Resolve every touching pair in `particles`.
    pub fn resolve(&self, particles: &mut [Particle]) {
        for i in 0..particles.len() {
            let (head, tail) = particles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if a.is_destroyed() {
                    break;
                }
                if b.is_destroyed() {
                    continue;
                }
                self.collide(a, b);
            }
        }
    }

    fn collide(&self, a: &mut Particle, b: &mut Particle) {
        let (offset, d) = get_distances(b.position, a.position);
        if d >= a.radius + b.radius {
            return;
        }

        match self.mode {
            CollisionMode::Bounce => {
                // Coincident centers have no contact normal
                if d <= 0.0 {
                    return;
                }
                let normal = offset / d;
                let closing = (a.velocity - b.velocity).dot(normal);
                if closing > 0.0 {
                    a.velocity -= normal * closing;
                    b.velocity += normal * closing;
                }
            }
            CollisionMode::Destroy => {
                if a.radius <= b.radius {
                    a.destroy();
                }
                if b.radius <= a.radius {
                    b.destroy();
                }
            }
        }
    }
}

impl Interactor for Collider {
    fn is_enabled(&self, _core: &ContainerCore) -> bool {
        self.enable
    }

    fn reset(&mut self) {}

    fn interact(&mut self, core: &mut ContainerCore, _delta: &Delta) -> Result<(), InteractorError> {
        self.resolve(core.particles_mut().as_mut_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParticlesOptions;
    use glam::Vec2;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn particle(id: u64, x: f32, vx: f32, radius: f32) -> Particle {
        let mut p = Particle::new(id, Vec2::new(x, 0.0), &ParticlesOptions::default(), &mut SmallRng::seed_from_u64(id));
        p.velocity = Vec2::new(vx, 0.0);
        p.radius = radius;
        p
    }

    #[test]
    fn test_head_on_bounce_swaps_velocities() {
        let collider = Collider::with_mode(true, CollisionMode::Bounce);
        let mut particles = vec![particle(0, 0.0, 2.0, 1.0), particle(1, 1.5, -1.0, 1.0)];
        collider.resolve(&mut particles);

        assert_eq!(particles[0].velocity, Vec2::new(-1.0, 0.0));
        assert_eq!(particles[1].velocity, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_separating_pair_is_left_alone() {
        let collider = Collider::with_mode(true, CollisionMode::Bounce);
        let mut particles = vec![particle(0, 0.0, -2.0, 1.0), particle(1, 1.5, 1.0, 1.0)];
        collider.resolve(&mut particles);

        assert_eq!(particles[0].velocity, Vec2::new(-2.0, 0.0));
        assert_eq!(particles[1].velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_destroy_smaller_or_both() {
        let collider = Collider::with_mode(true, CollisionMode::Destroy);

        let mut uneven = vec![particle(0, 0.0, 0.0, 1.0), particle(1, 1.5, 0.0, 2.0)];
        collider.resolve(&mut uneven);
        assert!(uneven[0].is_destroyed());
        assert!(!uneven[1].is_destroyed());

        let mut even = vec![particle(0, 0.0, 0.0, 1.0), particle(1, 1.5, 0.0, 1.0)];
        collider.resolve(&mut even);
        assert!(even[0].is_destroyed() && even[1].is_destroyed());
    }

    #[test]
    fn test_apart_particles_do_not_collide() {
        let collider = Collider::with_mode(true, CollisionMode::Destroy);
        let mut particles = vec![particle(0, 0.0, 0.0, 1.0), particle(1, 2.0, 0.0, 1.0)];
        collider.resolve(&mut particles);
        assert!(particles.iter().all(|p| !p.is_destroyed()));
    }
}
