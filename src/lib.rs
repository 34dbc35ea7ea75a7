//! # Flurry - particle animation engine
//!
//! Simulates and draws large numbers of independently moving particles on a
//! host-provided drawing surface, reacting to clicks, hover, focus and
//! resizes.
//!
//! Flurry does not rasterize anything itself and does not own the frame
//! loop. The host implements [`Canvas`] on top of whatever it renders with
//! and calls [`Engine::tick`] from its display-refresh callback.
//!
//! ## Quick Start
//!
//! ```ignore
//! use flurry::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.init();
//!
//! let canvas = HeadlessCanvas::new(Dimension::new(800.0, 600.0));
//! engine.load("hero", Box::new(canvas), Options::default())?;
//!
//! // Host frame callback, timestamp in milliseconds
//! engine.tick(timestamp);
//! ```
//!
//! ## Core Concepts
//!
//! ### Containers
//!
//! A [`Container`] is one simulation bound to one canvas. It moves through
//! `Uninitialized → Playing ⇄ Paused → Destroyed`; see [`container`] for
//! the frame pipeline.
//!
//! ### Extensions
//!
//! Everything a container does beyond moving particles is pulled by name
//! from the shared [`Registry`]:
//!
//! | Kind | Trait | Built-ins |
//! |------|-------|-----------|
//! | Shape drawer | [`ShapeDrawer`] | `circle`, `square` |
//! | Interactor | [`Interactor`] | `pauser`, `pusher`, `remover`, `repulser`, `collider` |
//! | Particle updater | [`ParticleUpdater`] | `life`, `opacity`, `outModes` |
//! | Full plugin | [`Plugin`] | `emitters` |
//! | Move path | [`MovePathGenerator`] | |
//! | Preset | [`Options`] | |
//!
//! Registering through the [`Engine`] refreshes every live container, so a
//! new shape is drawn on the next frame without recreating any particle.
//!
//! ### Custom shapes
//!
//! ```ignore
//! engine.add_shape_fn("diamond", ShapeDrawerFns::new(|canvas, p, radius, opacity| {
//!     let half = Vec2::splat(radius * 0.7);
//!     canvas.fill_rect(p.position - half, half * 2.0, p.color, opacity);
//! }));
//! ```

pub mod canvas;
pub mod container;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod input;
pub mod interactions;
pub mod interactor;
pub mod loader;
pub mod options;
pub mod particle;
pub mod plugins;
pub mod shapes;
pub mod time;
pub mod updaters;
pub mod utils;

pub use bytemuck;
pub use canvas::{Canvas, DrawCall, HeadlessCanvas};
pub use container::{AnimationState, ClickHandler, Container, ContainerCore, FrameOutcome};
pub use emitter::{EmitterOptions, EmittersPlugin};
pub use engine::Engine;
pub use error::{ContainerError, InteractorError, LoadError, OptionsError};
pub use glam::Vec2;
pub use input::{HostEvent, Pointer, PointerTracker};
pub use interactor::{Interactor, InteractorInitializer};
pub use loader::Loader;
pub use options::{ClickMode, Color, HoverMode, Options, OutMode, RangeValue};
pub use particle::{Particle, ParticleInstance, Particles};
pub use plugins::{ContainerPlugin, MovePathGenerator, Plugin, Registry};
pub use shapes::{CircleDrawer, ShapeDrawer, ShapeDrawerFns, SquareDrawer};
pub use time::{Delta, FrameClock};
pub use updaters::{ParticleUpdater, UpdateContext, UpdaterInitializer};
pub use utils::{Bounds, Dimension, SingleOrMultiple};

/// Convenient re-exports for hosts and plugin authors.
///
/// ```ignore
/// use flurry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::canvas::{Canvas, HeadlessCanvas};
    pub use crate::container::{AnimationState, Container, ContainerCore, FrameOutcome};
    pub use crate::emitter::EmitterOptions;
    pub use crate::engine::Engine;
    pub use crate::error::{ContainerError, InteractorError, LoadError};
    pub use crate::input::{HostEvent, PointerTracker};
    pub use crate::interactor::Interactor;
    pub use crate::options::{ClickMode, Color, HoverMode, Options, OutMode, RangeValue};
    pub use crate::particle::Particle;
    pub use crate::plugins::{ContainerPlugin, MovePathGenerator, Plugin};
    pub use crate::shapes::{ShapeDrawer, ShapeDrawerFns};
    pub use crate::time::Delta;
    pub use crate::updaters::{ParticleUpdater, UpdateContext};
    pub use crate::utils::Dimension;
    pub use glam::Vec2;
}
