use crate::container::ContainerCore;
use crate::error::InteractorError;
use crate::interactor::Interactor;
use crate::options::ClickMode;
use crate::time::Delta;
use tracing::debug;

/// Removes the oldest particles on the `remove` click mode.
#[derive(Debug)]
pub struct Remover {
    quantity: usize,
}

impl Remover {
    pub fn new(core: &ContainerCore) -> Self {
        Self {
            quantity: core.options().interactivity.modes.remove.quantity,
        }
    }
}

impl Interactor for Remover {
    fn is_enabled(&self, _core: &ContainerCore) -> bool {
        false
    }

    fn reset(&mut self) {}

    fn interact(&mut self, _core: &mut ContainerCore, _delta: &Delta) -> Result<(), InteractorError> {
        Ok(())
    }

    fn handle_click_mode(&mut self, mode: &ClickMode, core: &mut ContainerCore) -> Result<(), InteractorError> {
        if *mode == ClickMode::Remove {
            let removed = core.remove_particles(self.quantity);
            debug!(container = %core.id(), removed, "removed particles");
        }
        Ok(())
    }
}
