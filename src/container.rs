//! Simulation container and its frame loop.
//!
//! A [`Container`] is one particle simulation bound to one drawing surface.
//! It is created by the [`Loader`](crate::Loader), resolves its plugins from
//! the shared [`Registry`], and advances one frame each time the host calls
//! [`Container::tick`] with a display-refresh timestamp.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──play──▶ Playing ◀──play/pause──▶ Paused
//!        │                   │                      │
//!        └───────────── destroy ────────────────────┴──▶ Destroyed
//! ```
//!
//! Destroyed is terminal: every operation afterwards returns
//! [`ContainerError::InvalidState`].
//!
//! # Frame pipeline
//!
//! Each rendered frame runs, in this order:
//!
//! 1. frame clock (fps limit, delta)
//! 2. interactors, in registration order
//! 3. full plugins' `update`
//! 4. particles: first-time updater init, movement, updaters, removal
//! 5. drawing: clear, plugins' `draw`, one drawer call per particle
//!
//! # State split
//!
//! The container keeps the simulation state in a [`ContainerCore`] that is
//! lent to interactors, updater factories and plugins, while it owns the
//! plugin instances itself. That keeps every callback free to mutate the
//! simulation without aliasing the collections being iterated.

use crate::canvas::Canvas;
use crate::error::ContainerError;
use crate::input::{HostEvent, Pointer};
use crate::interactor::Interactor;
use crate::options::{ClickMode, Options};
use crate::particle::{Particle, ParticleInstance, Particles};
use crate::plugins::{ContainerPlugin, MovePathGenerator, Plugin, Registry};
use crate::shapes::ShapeDrawer;
use crate::time::{Delta, FrameClock};
use crate::updaters::{ParticleUpdater, UpdateContext};
use crate::utils::{get_distance, Dimension};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// External callback notified of clicks with the particles under the pointer.
pub type ClickHandler = Arc<dyn Fn(Vec2, &[&Particle]) + Send + Sync>;

/// Where a container is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Uninitialized,
    Playing,
    Paused,
    Destroyed,
}

/// What one call to [`Container::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// No frame was pending (the container is paused or not started).
    Idle,
    /// A frame was pending but the fps limit has not elapsed; still pending.
    Skipped,
    /// A frame was simulated and drawn.
    Rendered(Delta),
}

/// Simulation state of a container, lent to plugins and interactors.
#[derive(Debug)]
pub struct ContainerCore {
    id: String,
    options: Options,
    state: AnimationState,
    /// At most one pending frame; cleared by `pause`, consumed by `tick`.
    frame_requested: bool,
    particles_initialized: bool,
    paused_by_blur: bool,
    particles: Particles,
    pointer: Pointer,
    dimension: Dimension,
    clock: FrameClock,
    rng: SmallRng,
}

impl ContainerCore {
    pub(crate) fn new(id: String, options: Options, dimension: Dimension) -> Self {
        let clock = FrameClock::new(options.fps_limit);
        Self {
            id,
            options,
            state: AnimationState::Uninitialized,
            frame_requested: false,
            particles_initialized: false,
            paused_by_blur: false,
            particles: Particles::new(),
            pointer: Pointer::default(),
            dimension,
            clock,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.state == AnimationState::Destroyed
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut Particles {
        &mut self.particles
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Whether a frame is pending for the next `tick`.
    #[inline]
    pub fn is_frame_requested(&self) -> bool {
        self.frame_requested
    }

    fn ensure_alive(&self, operation: &'static str) -> Result<(), ContainerError> {
        if self.is_destroyed() {
            return Err(ContainerError::InvalidState {
                id: self.id.clone(),
                operation,
            });
        }
        Ok(())
    }

    /// Whether the container is playing.
    pub fn get_animation_status(&self) -> Result<bool, ContainerError> {
        self.ensure_alive("query animation status")?;
        Ok(self.state == AnimationState::Playing)
    }

    /// Start or resume the frame loop.
    ///
    /// The first `play` creates the initial particles.
    pub fn play(&mut self) -> Result<(), ContainerError> {
        self.ensure_alive("play")?;

        if !self.particles_initialized {
            self.init_particles();
        }

        self.paused_by_blur = false;
        if self.state != AnimationState::Playing {
            info!(container = %self.id, "playing");
        }
        self.state = AnimationState::Playing;
        self.clock.resume();
        self.frame_requested = true;
        Ok(())
    }

    /// Halt the frame loop, keeping every particle as it is.
    ///
    /// Cancels the pending frame only; a frame already running completes.
    pub fn pause(&mut self) -> Result<(), ContainerError> {
        self.ensure_alive("pause")?;

        if self.state != AnimationState::Paused {
            info!(container = %self.id, "paused");
        }
        self.state = AnimationState::Paused;
        self.frame_requested = false;
        self.clock.pause();
        Ok(())
    }

    /// Create a particle from the container's particle options.
    ///
    /// `position` defaults to a random point on the canvas. Returns `None`
    /// when the particle limit is reached.
    pub fn add_particle(&mut self, position: Option<Vec2>) -> Option<u64> {
        self.particles
            .add(&self.options.particles, self.dimension, position, &mut self.rng)
    }

    /// Remove up to `quantity` of the oldest particles.
    pub fn remove_particles(&mut self, quantity: usize) -> usize {
        self.particles.remove_quantity(quantity)
    }

    fn init_particles(&mut self) {
        for _ in 0..self.options.particles.number {
            if self.add_particle(None).is_none() {
                break;
            }
        }
        self.particles_initialized = true;
        debug!(container = %self.id, count = self.particles.count(), "particles initialized");
    }
}

/// A resolved full plugin and its instance for this container.
struct PluginSlot {
    plugin: Arc<dyn Plugin>,
    instance: Box<dyn ContainerPlugin>,
    started: bool,
}

/// One particle simulation bound to one drawing surface.
pub struct Container {
    core: ContainerCore,
    registry: Registry,
    canvas: Box<dyn Canvas>,
    interactors: Vec<Box<dyn Interactor>>,
    updaters: Vec<Box<dyn ParticleUpdater>>,
    drawers: HashMap<String, Arc<dyn ShapeDrawer>>,
    path_generator: Option<Arc<dyn MovePathGenerator>>,
    plugins: Vec<PluginSlot>,
    /// Shapes already reported as having no drawer since the last refresh.
    missing_shapes: HashSet<String>,
    click_handler: Option<ClickHandler>,
}

impl Container {
    /// Create a container and resolve its plugins. It starts Uninitialized.
    pub fn new(id: impl Into<String>, options: Options, canvas: Box<dyn Canvas>, registry: Registry) -> Self {
        let core = ContainerCore::new(id.into(), options, canvas.dimension());
        let mut container = Self {
            core,
            registry,
            canvas,
            interactors: Vec::new(),
            updaters: Vec::new(),
            drawers: HashMap::new(),
            path_generator: None,
            plugins: Vec::new(),
            missing_shapes: HashSet::new(),
            click_handler: None,
        };
        container.resolve();
        debug!(container = %container.core.id, "container created");
        container
    }

    pub fn id(&self) -> &str {
        self.core.id()
    }

    pub fn core(&self) -> &ContainerCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ContainerCore {
        &mut self.core
    }

    pub fn options(&self) -> &Options {
        self.core.options()
    }

    pub fn state(&self) -> AnimationState {
        self.core.state()
    }

    pub fn is_destroyed(&self) -> bool {
        self.core.is_destroyed()
    }

    pub fn particles(&self) -> &Particles {
        self.core.particles()
    }

    pub fn canvas(&self) -> &dyn Canvas {
        self.canvas.as_ref()
    }

    /// Measured frames per second.
    pub fn fps(&self) -> f32 {
        self.core.clock.fps()
    }

    /// GPU-friendly snapshot of every particle.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.core.particles.instances()
    }

    pub fn play(&mut self) -> Result<(), ContainerError> {
        self.core.play()
    }

    /// Pause and clear interactors' transient state.
    pub fn pause(&mut self) -> Result<(), ContainerError> {
        let before = self.core.state;
        self.core.pause()?;
        self.reset_if_paused(before);
        Ok(())
    }

    /// Reset every interactor when the container went from running to
    /// paused, whichever path paused it.
    fn reset_if_paused(&mut self, before: AnimationState) {
        if before != AnimationState::Paused && self.core.state == AnimationState::Paused {
            for interactor in self.interactors.iter_mut() {
                interactor.reset();
            }
        }
    }

    /// Whether the container is playing.
    pub fn get_animation_status(&self) -> Result<bool, ContainerError> {
        self.core.get_animation_status()
    }

    /// Notify `handler` of every click on this container.
    pub fn set_on_click_handler(&mut self, handler: ClickHandler) {
        self.click_handler = Some(handler);
    }

    /// Re-resolve plugins from the registry.
    ///
    /// Particles are kept as they are and the play state is preserved. Full
    /// plugins whose registration did not change keep their instance, and
    /// with it their state.
    pub fn refresh(&mut self) -> Result<(), ContainerError> {
        self.core.ensure_alive("refresh")?;

        for interactor in self.interactors.iter_mut() {
            interactor.reset();
        }
        self.release_drawers();
        self.resolve();

        if self.core.state == AnimationState::Playing {
            self.core.frame_requested = true;
        }
        debug!(container = %self.core.id, "refreshed");
        Ok(())
    }

    /// Tear down the container. Every later operation fails.
    pub fn destroy(&mut self) -> Result<(), ContainerError> {
        self.core.ensure_alive("destroy")?;

        self.stop_plugins();
        self.release_drawers();
        self.interactors.clear();
        self.updaters.clear();
        self.core.particles.clear();
        self.core.frame_requested = false;
        self.core.state = AnimationState::Destroyed;
        info!(container = %self.core.id, "destroyed");
        Ok(())
    }

    /// Deliver one host event.
    ///
    /// Clicks are dispatched right away, outside the frame loop, so a
    /// paused container can still be resumed by a click.
    pub fn handle_event(&mut self, event: HostEvent) -> Result<(), ContainerError> {
        self.core.ensure_alive("handle events")?;
        self.core.pointer.apply(&event);

        match event {
            HostEvent::Click(position) => self.click(position),
            HostEvent::Resize(dimension) => {
                self.core.dimension = dimension;
                self.canvas.resize(dimension);
                debug!(container = %self.core.id, width = dimension.width, height = dimension.height, "resized");
            }
            HostEvent::Blur => {
                if self.core.options.pause_on_blur && self.core.state == AnimationState::Playing {
                    self.pause()?;
                    self.core.paused_by_blur = true;
                }
            }
            HostEvent::Focus => {
                if self.core.paused_by_blur && self.core.state == AnimationState::Paused {
                    self.core.play()?;
                }
            }
            HostEvent::PointerMove(_) | HostEvent::PointerLeave | HostEvent::PointerDown | HostEvent::PointerUp => {}
        }
        Ok(())
    }

    /// Dispatch `mode` to every interactor, then to every plugin.
    pub fn dispatch_click_mode(&mut self, mode: &ClickMode) -> Result<(), ContainerError> {
        self.core.ensure_alive("dispatch click modes")?;
        self.dispatch(mode);
        Ok(())
    }

    fn dispatch(&mut self, mode: &ClickMode) {
        let before = self.core.state;
        for interactor in self.interactors.iter_mut() {
            if let Err(err) = interactor.handle_click_mode(mode, &mut self.core) {
                warn!(container = %self.core.id, mode = %mode, error = %err, "click mode handler failed");
            }
        }
        for slot in self.plugins.iter_mut() {
            slot.instance.handle_click_mode(mode, &mut self.core);
        }
        self.reset_if_paused(before);
    }

    fn click(&mut self, position: Vec2) {
        if let Some(handler) = &self.click_handler {
            let hits: Vec<&Particle> = self
                .core
                .particles
                .iter()
                .filter(|p| get_distance(p.position, position) <= p.radius)
                .collect();
            handler(position, hits.as_slice());
        }

        let events = &self.core.options.interactivity.events;
        if !events.on_click.enable {
            return;
        }

        let modes = events.on_click.mode.as_slice().to_vec();
        for mode in &modes {
            self.dispatch(mode);
        }
    }

    /// Host frame callback.
    ///
    /// Runs the whole frame pipeline when a frame is pending and the fps
    /// limit allows it, then requests the next frame if still playing.
    pub fn tick(&mut self, timestamp: f64) -> Result<FrameOutcome, ContainerError> {
        self.core.ensure_alive("tick")?;

        if !self.core.frame_requested {
            return Ok(FrameOutcome::Idle);
        }

        let Some(delta) = self.core.clock.update(timestamp) else {
            return Ok(FrameOutcome::Skipped);
        };
        self.core.frame_requested = false;
        let before = self.core.state;

        self.start_plugins();
        self.run_interactors(&delta);
        for slot in self.plugins.iter_mut() {
            slot.instance.update(&mut self.core, &delta);
        }
        self.update_particles(&delta);
        self.draw();
        self.reset_if_paused(before);

        if self.core.state == AnimationState::Playing {
            self.core.frame_requested = true;
        }
        Ok(FrameOutcome::Rendered(delta))
    }

    fn resolve(&mut self) {
        let resolved = self.registry.resolve(&self.core.options);

        for drawer in resolved.drawers.values() {
            drawer.init();
        }
        if let Some(generator) = &resolved.path_generator {
            generator.init(&self.core);
        }

        self.interactors = resolved.interactors.iter().map(|init| init(&self.core)).collect();
        self.updaters = resolved.updaters.iter().map(|init| init(&self.core)).collect();

        let mut previous = std::mem::take(&mut self.plugins);
        self.plugins = resolved
            .plugins
            .into_iter()
            .map(|plugin| match previous.iter().position(|slot| Arc::ptr_eq(&slot.plugin, &plugin)) {
                Some(index) => previous.swap_remove(index),
                None => PluginSlot {
                    instance: plugin.get_plugin(&self.core),
                    plugin,
                    started: false,
                },
            })
            .collect();
        for mut slot in previous {
            if slot.started {
                slot.instance.stop(&mut self.core);
            }
        }
        self.drawers = resolved.drawers;
        self.path_generator = resolved.path_generator;
        self.missing_shapes.clear();

        if let Some(path) = &self.core.options.particles.movement.path {
            if self.path_generator.is_none() {
                warn!(container = %self.core.id, path = %path, "no path generator registered, using velocity");
            }
        }
    }

    fn stop_plugins(&mut self) {
        for slot in self.plugins.iter_mut() {
            if slot.started {
                slot.instance.stop(&mut self.core);
                slot.started = false;
            }
        }
        self.plugins.clear();
    }

    fn release_drawers(&mut self) {
        for drawer in self.drawers.values() {
            drawer.destroy();
        }
        self.drawers.clear();
        self.path_generator = None;
    }

    fn start_plugins(&mut self) {
        for slot in self.plugins.iter_mut().filter(|slot| !slot.started) {
            slot.instance.start(&mut self.core);
            slot.started = true;
        }
    }

    fn run_interactors(&mut self, delta: &Delta) {
        for interactor in self.interactors.iter_mut() {
            if !interactor.is_enabled(&self.core) {
                continue;
            }
            if let Err(err) = interactor.interact(&mut self.core, delta) {
                warn!(container = %self.core.id, error = %err, "interactor failed, skipped for this frame");
            }
        }
    }

    fn update_particles(&mut self, delta: &Delta) {
        let core = &mut self.core;
        let ctx = UpdateContext {
            delta: *delta,
            dimension: core.dimension,
        };
        let moving = core.options.particles.movement.enable;

        for particle in core.particles.iter_mut() {
            if particle.is_destroyed() {
                continue;
            }

            if !particle.is_initialized() {
                for updater in self.updaters.iter_mut() {
                    updater.init(particle, &mut core.rng);
                }
                particle.mark_initialized();
            }

            if moving {
                if let Some(generator) = &self.path_generator {
                    particle.velocity = generator.generate(particle, delta);
                }
                particle.position += particle.velocity * delta.factor;
            }

            for updater in self.updaters.iter_mut() {
                if updater.is_enabled(particle) {
                    updater.update(particle, &ctx);
                }
            }
        }

        if let Some(generator) = &self.path_generator {
            generator.update();
        }
        core.particles.remove_destroyed();
    }

    fn draw(&mut self) {
        self.canvas.clear();

        for slot in self.plugins.iter_mut() {
            slot.instance.draw(self.canvas.as_mut(), &self.core);
        }

        for particle in self.core.particles.iter() {
            match self.drawers.get(&particle.shape) {
                Some(drawer) => {
                    drawer.draw(self.canvas.as_mut(), particle, particle.radius, particle.opacity);
                    drawer.after_effect(self.canvas.as_mut(), particle, particle.radius, particle.opacity);
                }
                None => {
                    if self.missing_shapes.insert(particle.shape.clone()) {
                        warn!(container = %self.core.id, shape = %particle.shape, "no drawer for shape, skipping");
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.core.id)
            .field("state", &self.core.state)
            .field("particles", &self.core.particles.count())
            .field("interactors", &self.interactors.len())
            .field("updaters", &self.updaters.len())
            .field("plugins", &self.plugins.len())
            .finish()
    }
}
