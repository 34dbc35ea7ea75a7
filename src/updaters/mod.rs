//! Per-particle updaters.
//!
//! Updaters run once per particle per frame, after the particle moved and
//! in registration order. Each container owns its own updater instances,
//! built from the registered [`UpdaterInitializer`]s when the container
//! resolves its plugins.
//!
//! A particle is handed to [`ParticleUpdater::init`] the first frame it is
//! seen, whether it was created at startup, pushed by a click or spawned
//! by an emitter. After a refresh the new updaters may meet particles they
//! never initialized; they treat such particles by their current fields.

mod life;
mod opacity;
mod out_modes;

pub use life::LifeUpdater;
pub use opacity::OpacityUpdater;
pub use out_modes::OutModesUpdater;

use crate::container::ContainerCore;
use crate::particle::Particle;
use crate::time::Delta;
use crate::utils::Dimension;
use rand::rngs::SmallRng;
use std::sync::Arc;

/// Frame data shared by every updater call.
#[derive(Clone, Copy, Debug)]
pub struct UpdateContext {
    pub delta: Delta,
    pub dimension: Dimension,
}

/// Evolves one aspect of a particle over time.
pub trait ParticleUpdater {
    /// Set up per-particle state the first time a particle is seen.
    fn init(&mut self, particle: &mut Particle, rng: &mut SmallRng);

    /// Whether `update` has anything to do for `particle`.
    fn is_enabled(&self, particle: &Particle) -> bool;

    fn update(&mut self, particle: &mut Particle, ctx: &UpdateContext);
}

/// Builds an updater for the container it is given.
pub type UpdaterInitializer = Arc<dyn Fn(&ContainerCore) -> Box<dyn ParticleUpdater> + Send + Sync>;

/// Updaters every engine registers on `init`, by name.
pub fn builtins() -> Vec<(&'static str, UpdaterInitializer)> {
    fn life(core: &ContainerCore) -> Box<dyn ParticleUpdater> {
        Box::new(LifeUpdater::new(core))
    }
    fn opacity(core: &ContainerCore) -> Box<dyn ParticleUpdater> {
        Box::new(OpacityUpdater::new(core))
    }
    fn out_modes(core: &ContainerCore) -> Box<dyn ParticleUpdater> {
        Box::new(OutModesUpdater::new(core))
    }

    vec![
        ("life", Arc::new(life) as UpdaterInitializer),
        ("opacity", Arc::new(opacity) as UpdaterInitializer),
        ("outModes", Arc::new(out_modes) as UpdaterInitializer),
    ]
}
