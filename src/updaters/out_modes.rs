use super::{ParticleUpdater, UpdateContext};
use crate::container::ContainerCore;
use crate::options::OutMode;
use crate::particle::Particle;
use crate::utils::{are_bounds_inside, calculate_bounds, is_point_inside};
use rand::rngs::SmallRng;

/// Applies the configured out mode at the viewport edges.
#[derive(Debug)]
pub struct OutModesUpdater {
    mode: OutMode,
}

impl OutModesUpdater {
    pub fn new(core: &ContainerCore) -> Self {
        Self::with_mode(core.options().particles.movement.out_mode)
    }

    pub fn with_mode(mode: OutMode) -> Self {
        Self { mode }
    }

    fn bounce(particle: &mut Particle, ctx: &UpdateContext) {
        let bounds = calculate_bounds(particle.position, particle.radius);
        let (w, h) = (ctx.dimension.width, ctx.dimension.height);

        if (bounds.left < 0.0 && particle.velocity.x < 0.0) || (bounds.right > w && particle.velocity.x > 0.0) {
            particle.velocity.x = -particle.velocity.x;
        }
        if (bounds.top < 0.0 && particle.velocity.y < 0.0) || (bounds.bottom > h && particle.velocity.y > 0.0) {
            particle.velocity.y = -particle.velocity.y;
        }
    }

    fn wrap(particle: &mut Particle, ctx: &UpdateContext) {
        let r = particle.radius;
        let bounds = calculate_bounds(particle.position, r);
        if are_bounds_inside(&bounds, ctx.dimension) {
            return;
        }

        let (w, h) = (ctx.dimension.width, ctx.dimension.height);
        if bounds.right < 0.0 {
            particle.position.x = w + r;
        } else if bounds.left > w {
            particle.position.x = -r;
        }
        if bounds.bottom < 0.0 {
            particle.position.y = h + r;
        } else if bounds.top > h {
            particle.position.y = -r;
        }
    }
}

impl ParticleUpdater for OutModesUpdater {
    fn init(&mut self, _particle: &mut Particle, _rng: &mut SmallRng) {}

    fn is_enabled(&self, particle: &Particle) -> bool {
        self.mode != OutMode::None && !particle.is_destroyed()
    }

    fn update(&mut self, particle: &mut Particle, ctx: &UpdateContext) {
        match self.mode {
            OutMode::Bounce => Self::bounce(particle, ctx),
            OutMode::Destroy => {
                if !is_point_inside(particle.position, ctx.dimension, particle.radius) {
                    particle.destroy();
                }
            }
            OutMode::Out => Self::wrap(particle, ctx),
            OutMode::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updaters::test_support::{ctx, particle_at};
    use glam::Vec2;

    #[test]
    fn test_bounce_reflects_only_outgoing_velocity() {
        let mut updater = OutModesUpdater::with_mode(OutMode::Bounce);

        let mut p = particle_at(Vec2::new(99.5, 50.0), Vec2::new(2.0, 1.0), 1.0);
        updater.update(&mut p, &ctx(16.0));
        assert_eq!(p.velocity, Vec2::new(-2.0, 1.0));

        // Already heading back in: left alone
        updater.update(&mut p, &ctx(16.0));
        assert_eq!(p.velocity, Vec2::new(-2.0, 1.0));

        let mut top = particle_at(Vec2::new(50.0, 0.5), Vec2::new(0.0, -3.0), 1.0);
        updater.update(&mut top, &ctx(16.0));
        assert_eq!(top.velocity, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_destroy_when_no_longer_inside() {
        let mut updater = OutModesUpdater::with_mode(OutMode::Destroy);

        let mut touching = particle_at(Vec2::new(100.5, 50.0), Vec2::ZERO, 1.0);
        updater.update(&mut touching, &ctx(16.0));
        assert!(!touching.is_destroyed());

        let mut gone = particle_at(Vec2::new(102.0, 50.0), Vec2::ZERO, 1.0);
        updater.update(&mut gone, &ctx(16.0));
        assert!(gone.is_destroyed());
        assert!(!updater.is_enabled(&gone));
    }

    #[test]
    fn test_out_wraps_to_opposite_edge() {
        let mut updater = OutModesUpdater::with_mode(OutMode::Out);

        let mut p = particle_at(Vec2::new(-3.0, 50.0), Vec2::new(-1.0, 0.0), 2.0);
        updater.update(&mut p, &ctx(16.0));
        assert_eq!(p.position, Vec2::new(102.0, 50.0));

        // Reappearing particle touches the edge and is not wrapped back
        updater.update(&mut p, &ctx(16.0));
        assert_eq!(p.position, Vec2::new(102.0, 50.0));

        let mut below = particle_at(Vec2::new(50.0, 105.0), Vec2::ZERO, 2.0);
        updater.update(&mut below, &ctx(16.0));
        assert_eq!(below.position, Vec2::new(50.0, -2.0));
    }

    #[test]
    fn test_none_is_disabled() {
        let updater = OutModesUpdater::with_mode(OutMode::None);
        let p = particle_at(Vec2::new(500.0, 500.0), Vec2::ZERO, 1.0);
        assert!(!updater.is_enabled(&p));
    }
}
