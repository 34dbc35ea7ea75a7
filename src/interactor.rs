//! Interactor contract.
//!
//! An interactor reacts to the pointer or other external input on behalf of
//! one container. It can work in two styles, or both:
//!
//! - **frame-driven**: [`Interactor::interact`] runs once per frame while
//!   [`Interactor::is_enabled`] says so (e.g. hover repulsion);
//! - **event-driven**: [`Interactor::handle_click_mode`] is called for every
//!   click mode dispatched by the container (e.g. pause-on-click). Such
//!   interactors leave `interact` as a no-op.
//!
//! Interactors are created by an [`InteractorInitializer`] for exactly one
//! container and are never moved to another. The container passes its
//! [`ContainerCore`] into every call instead of the interactor holding a
//! reference to it.

use crate::container::ContainerCore;
use crate::error::InteractorError;
use crate::options::ClickMode;
use crate::time::Delta;
use std::sync::Arc;

/// Reactive behavior attached to a container.
pub trait Interactor {
    /// Whether `interact` should run this frame.
    fn is_enabled(&self, core: &ContainerCore) -> bool;

    /// Clear interactor-local transient state.
    fn reset(&mut self);

    /// One frame's worth of work. Runs to completion within the frame.
    ///
    /// An error skips only this interactor for the current frame.
    fn interact(&mut self, core: &mut ContainerCore, delta: &Delta) -> Result<(), InteractorError>;

    /// Called for every click mode the container dispatches; interactors
    /// ignore modes that are not theirs.
    fn handle_click_mode(&mut self, _mode: &ClickMode, _core: &mut ContainerCore) -> Result<(), InteractorError> {
        Ok(())
    }
}

/// Builds an interactor for the container it is given.
pub type InteractorInitializer = Arc<dyn Fn(&ContainerCore) -> Box<dyn Interactor> + Send + Sync>;
