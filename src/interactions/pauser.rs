use crate::container::ContainerCore;
use crate::error::InteractorError;
use crate::interactor::Interactor;
use crate::options::ClickMode;
use crate::time::Delta;

/// Toggles the container between playing and paused on the `pause` click mode.
///
/// Event-driven: `interact` does nothing, so being enabled every frame
/// costs a no-op call.
#[derive(Debug, Default)]
pub struct Pauser;

impl Interactor for Pauser {
    fn is_enabled(&self, _core: &ContainerCore) -> bool {
        true
    }

    fn reset(&mut self) {}

    fn interact(&mut self, _core: &mut ContainerCore, _delta: &Delta) -> Result<(), InteractorError> {
        Ok(())
    }

    fn handle_click_mode(&mut self, mode: &ClickMode, core: &mut ContainerCore) -> Result<(), InteractorError> {
        if *mode != ClickMode::Pause {
            return Ok(());
        }

        if core.get_animation_status()? {
            core.pause()?;
        } else {
            core.play()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::AnimationState;
    use crate::options::Options;
    use crate::utils::Dimension;

    fn core() -> ContainerCore {
        let mut options = Options::default();
        options.particles.number = 0;
        ContainerCore::new("pauser".into(), options, Dimension::new(100.0, 100.0))
    }

    #[test]
    fn test_toggles_play_state() {
        let mut core = core();
        let mut pauser = Pauser;
        assert!(pauser.is_enabled(&core));

        core.play().unwrap();
        pauser.handle_click_mode(&ClickMode::Pause, &mut core).unwrap();
        assert_eq!(core.state(), AnimationState::Paused);
        pauser.handle_click_mode(&ClickMode::Pause, &mut core).unwrap();
        assert_eq!(core.state(), AnimationState::Playing);
    }

    #[test]
    fn test_custom_mode_named_pause_is_pause() {
        let mut core = core();
        core.play().unwrap();
        Pauser
            .handle_click_mode(&ClickMode::Custom("pause".into()), &mut core)
            .unwrap();
        assert_eq!(core.state(), AnimationState::Paused);
    }

    #[test]
    fn test_other_modes_ignored() {
        let mut core = core();
        core.play().unwrap();
        Pauser.handle_click_mode(&ClickMode::Push, &mut core).unwrap();
        assert_eq!(core.state(), AnimationState::Playing);
    }
}
