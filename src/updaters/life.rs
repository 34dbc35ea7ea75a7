use super::{ParticleUpdater, UpdateContext};
use crate::container::ContainerCore;
use crate::options::{LifeOptions, RangeValue};
use crate::particle::Particle;
use rand::rngs::SmallRng;

/// Destroys particles when their configured lifetime runs out.
#[derive(Debug, Default)]
pub struct LifeUpdater {
    duration: Option<RangeValue>,
}

impl LifeUpdater {
    pub fn new(core: &ContainerCore) -> Self {
        Self::from_options(&core.options().particles.life)
    }

    pub fn from_options(options: &LifeOptions) -> Self {
        Self {
            duration: options.duration,
        }
    }
}

impl ParticleUpdater for LifeUpdater {
    fn init(&mut self, particle: &mut Particle, rng: &mut SmallRng) {
        particle.life_remaining = self.duration.map(|d| d.sample(rng).max(0.0));
    }

    fn is_enabled(&self, particle: &Particle) -> bool {
        particle.life_remaining.is_some() && !particle.is_destroyed()
    }

    fn update(&mut self, particle: &mut Particle, ctx: &UpdateContext) {
        let Some(remaining) = particle.life_remaining.as_mut() else {
            return;
        };

        *remaining -= ctx.delta.seconds();
        if *remaining <= 0.0 {
            particle.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::updaters::test_support::{ctx, particle_at, rng};
    use glam::Vec2;

    #[test]
    fn test_unlimited_life_is_disabled() {
        let mut updater = LifeUpdater::from_options(&LifeOptions::default());
        let mut p = particle_at(Vec2::ZERO, Vec2::ZERO, 1.0);
        updater.init(&mut p, &mut rng());
        assert!(p.life_remaining.is_none());
        assert!(!updater.is_enabled(&p));
    }

    #[test]
    fn test_particle_dies_when_life_runs_out() {
        let mut updater = LifeUpdater::from_options(&LifeOptions {
            duration: Some(RangeValue::Fixed(0.25)),
        });
        let mut p = particle_at(Vec2::ZERO, Vec2::ZERO, 1.0);
        updater.init(&mut p, &mut rng());
        assert!(updater.is_enabled(&p));

        updater.update(&mut p, &ctx(100.0));
        assert!(!p.is_destroyed());
        updater.update(&mut p, &ctx(100.0));
        assert!(!p.is_destroyed());
        updater.update(&mut p, &ctx(100.0));
        assert!(p.is_destroyed());
    }

    #[test]
    fn test_uninitialized_particle_is_left_alone() {
        let mut updater = LifeUpdater::from_options(&LifeOptions {
            duration: Some(RangeValue::Fixed(1.0)),
        });
        let mut p = particle_at(Vec2::ZERO, Vec2::ZERO, 1.0);
        assert!(!updater.is_enabled(&p));
        updater.update(&mut p, &ctx(100.0));
        assert!(!p.is_destroyed());
    }
}
