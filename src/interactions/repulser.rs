use crate::container::ContainerCore;
use crate::error::InteractorError;
use crate::interactor::Interactor;
use crate::options::{HoverMode, RepulseMode};
use crate::time::Delta;
use crate::utils::{clamp, get_distances, is_in_array};
use glam::Vec2;

/// Largest displacement applied to one particle in one 60 Hz frame.
const MAX_REPULSE: f32 = 50.0;

/// Pushes particles away from the hovering pointer.
///
/// Strength falls off with the square of the distance and is zero at the
/// edge of the repulse radius.
#[derive(Debug)]
pub struct Repulser {
    distance: f32,
    speed: f32,
}

impl Repulser {
    pub fn new(core: &ContainerCore) -> Self {
        Self::from_mode(&core.options().interactivity.modes.repulse)
    }

    pub fn from_mode(mode: &RepulseMode) -> Self {
        Self {
            distance: mode.distance,
            speed: mode.speed,
        }
    }

    /// Displacement per 60 Hz frame for a particle at `position`.
    pub fn displacement(&self, position: Vec2, pointer: Vec2) -> Vec2 {
        let (offset, d) = get_distances(position, pointer);
        if d >= self.distance || d <= 0.0 {
            return Vec2::ZERO;
        }

        let strength = clamp((1.0 - (d / self.distance).powi(2)) * self.speed, 0.0, MAX_REPULSE);
        offset / d * strength
    }
}

impl Interactor for Repulser {
    fn is_enabled(&self, core: &ContainerCore) -> bool {
        let hover = &core.options().interactivity.events.on_hover;
        self.distance > 0.0
            && hover.enable
            && core.pointer().position.is_some()
            && is_in_array(&HoverMode::Repulse, &hover.mode)
    }

    fn reset(&mut self) {}

    fn interact(&mut self, core: &mut ContainerCore, delta: &Delta) -> Result<(), InteractorError> {
        let Some(pointer) = core.pointer().position else {
            return Ok(());
        };

        for particle in core.particles_mut().iter_mut() {
            particle.position += self.displacement(particle.position, pointer) * delta.factor;
        }
        Ok(())
    }
}
