use crate::container::ContainerCore;
use crate::error::InteractorError;
use crate::interactor::Interactor;
use crate::options::ClickMode;
use crate::time::Delta;
use tracing::debug;

/// Adds particles at the click position on the `push` click mode.
#[derive(Debug)]
pub struct Pusher {
    quantity: usize,
}

impl Pusher {
    pub fn new(core: &ContainerCore) -> Self {
        Self {
            quantity: core.options().interactivity.modes.push.quantity,
        }
    }
}

impl Interactor for Pusher {
    fn is_enabled(&self, _core: &ContainerCore) -> bool {
        false
    }

    fn reset(&mut self) {}

    fn interact(&mut self, _core: &mut ContainerCore, _delta: &Delta) -> Result<(), InteractorError> {
        Ok(())
    }

    fn handle_click_mode(&mut self, mode: &ClickMode, core: &mut ContainerCore) -> Result<(), InteractorError> {
        if *mode != ClickMode::Push {
            return Ok(());
        }

        let position = core.pointer().click_position;
        let mut added = 0;
        while added < self.quantity && core.add_particle(position).is_some() {
            added += 1;
        }
        debug!(container = %core.id(), added, "pushed particles");
        Ok(())
    }
}
