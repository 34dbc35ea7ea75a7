use super::{ParticleUpdater, UpdateContext};
use crate::container::ContainerCore;
use crate::options::OpacityOptions;
use crate::particle::Particle;
use crate::utils::clamp;
use rand::rngs::SmallRng;
use rand::Rng;

/// Oscillates particle opacity between the bounds of the opacity range.
#[derive(Debug)]
pub struct OpacityUpdater {
    enable: bool,
    speed: f32,
    min: f32,
    max: f32,
}

impl OpacityUpdater {
    pub fn new(core: &ContainerCore) -> Self {
        Self::from_options(&core.options().particles.opacity)
    }

    pub fn from_options(options: &OpacityOptions) -> Self {
        let (min, max) = (options.value.min(), options.value.max());
        Self {
            // A fixed value has nothing to oscillate between
            enable: options.animation.enable && min < max,
            speed: options.animation.speed.abs(),
            min,
            max,
        }
    }
}

impl ParticleUpdater for OpacityUpdater {
    fn init(&mut self, particle: &mut Particle, rng: &mut SmallRng) {
        if !self.enable {
            return;
        }
        particle.opacity_velocity = if rng.gen_bool(0.5) { self.speed } else { -self.speed };
    }

    fn is_enabled(&self, particle: &Particle) -> bool {
        self.enable && particle.opacity_velocity != 0.0
    }

    fn update(&mut self, particle: &mut Particle, ctx: &UpdateContext) {
        let next = particle.opacity + particle.opacity_velocity * ctx.delta.seconds();

        if next >= self.max {
            particle.opacity_velocity = -particle.opacity_velocity.abs();
        } else if next <= self.min {
            particle.opacity_velocity = particle.opacity_velocity.abs();
        }
        particle.opacity = clamp(next, self.min, self.max);
    }
}
