//! Engine facade.
//!
//! [`Engine`] bundles the [`Registry`] with a [`Loader`] and is what most
//! hosts hold. Every registration made through it refreshes the live
//! containers, so new shapes, interactors or plugins show up on the next
//! frame without reloading anything.
//!
//! # Example
//!
//! ```ignore
//! let mut engine = Engine::new();
//! engine.init();
//! engine.load("hero", Box::new(canvas), Options::default())?;
//!
//! // later, from the host's display-refresh callback
//! engine.tick(timestamp_ms);
//! ```

use crate::canvas::Canvas;
use crate::container::{ClickHandler, Container};
use crate::emitter::EmittersPlugin;
use crate::error::LoadError;
use crate::interactions;
use crate::interactor::InteractorInitializer;
use crate::loader::Loader;
use crate::options::Options;
use crate::plugins::{MovePathGenerator, Plugin, Registry};
use crate::shapes::{CircleDrawer, ShapeDrawer, ShapeDrawerFns, SquareDrawer};
use crate::updaters::{self, UpdaterInitializer};
use std::sync::Arc;
use tracing::debug;

/// Registry plus loader, with refresh-on-register.
#[derive(Debug)]
pub struct Engine {
    registry: Registry,
    loader: Loader,
    initialized: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine with an empty registry. Call [`init`](Self::init) to add the
    /// built-in shapes, interactors, updaters and plugins.
    pub fn new() -> Self {
        let registry = Registry::new();
        Self {
            loader: Loader::new(registry.clone()),
            registry,
            initialized: false,
        }
    }

    /// Register the built-ins. Calling it again does nothing.
    pub fn init(&mut self) -> &mut Self {
        if self.initialized {
            return self;
        }

        self.registry.add_shape_drawer("circle", Arc::new(CircleDrawer));
        self.registry.add_shape_drawer("square", Arc::new(SquareDrawer));
        for (name, initializer) in interactions::builtins() {
            self.registry.add_interactor(name, initializer);
        }
        for (name, initializer) in updaters::builtins() {
            self.registry.add_particle_updater(name, initializer);
        }
        self.registry.add_plugin(Arc::new(EmittersPlugin));

        self.initialized = true;
        self.loader.refresh_all();
        debug!("built-in plugins registered");
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut Loader {
        &mut self.loader
    }

    pub fn load(
        &mut self,
        id: impl Into<String>,
        canvas: Box<dyn Canvas>,
        options: Options,
    ) -> Result<&mut Container, LoadError> {
        self.loader.load(id, canvas, options)
    }

    pub fn load_from_array(
        &mut self,
        id: impl Into<String>,
        canvas: Box<dyn Canvas>,
        options: &[Options],
        index: Option<usize>,
    ) -> Result<&mut Container, LoadError> {
        self.loader.load_from_array(id, canvas, options, index)
    }

    pub fn load_preset(
        &mut self,
        id: impl Into<String>,
        canvas: Box<dyn Canvas>,
        name: &str,
    ) -> Result<&mut Container, LoadError> {
        self.loader.load_preset(id, canvas, name)
    }

    pub fn dom(&self) -> &[Container] {
        self.loader.dom()
    }

    pub fn dom_item(&self, index: usize) -> Option<&Container> {
        self.loader.dom_item(index)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut Container> {
        self.loader.container_mut(id)
    }

    /// Host frame callback; returns how many containers rendered.
    pub fn tick(&mut self, timestamp: f64) -> usize {
        self.loader.tick(timestamp)
    }

    /// Refresh every live container against the registry.
    pub fn refresh(&mut self) {
        self.loader.refresh_all();
    }

    pub fn set_on_click_handler(&mut self, handler: ClickHandler) {
        self.loader.set_on_click_handler(handler);
    }

    pub fn add_shape(&mut self, name: impl Into<String>, drawer: Arc<dyn ShapeDrawer>) {
        self.registry.add_shape_drawer(name, drawer);
        self.refresh();
    }

    pub fn add_shape_fn(&mut self, name: impl Into<String>, drawer: ShapeDrawerFns) {
        self.add_shape(name, Arc::new(drawer));
    }

    /// Register a preset; an existing one is kept unless `override_existing`.
    pub fn add_preset(&mut self, name: impl Into<String>, options: Options, override_existing: bool) -> bool {
        let stored = self.registry.add_preset(name, options, override_existing);
        self.refresh();
        stored
    }

    pub fn add_plugin(&mut self, plugin: Arc<dyn Plugin>) {
        self.registry.add_plugin(plugin);
        self.refresh();
    }

    pub fn add_path_generator(&mut self, name: impl Into<String>, generator: Arc<dyn MovePathGenerator>) {
        self.registry.add_path_generator(name, generator);
        self.refresh();
    }

    pub fn add_interactor(&mut self, name: impl Into<String>, initializer: InteractorInitializer) {
        self.registry.add_interactor(name, initializer);
        self.refresh();
    }

    pub fn add_particle_updater(&mut self, name: impl Into<String>, initializer: UpdaterInitializer) {
        self.registry.add_particle_updater(name, initializer);
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let mut engine = Engine::new();
        engine.init();
        let shapes = engine.registry().shape_names();
        engine.init();

        assert!(engine.is_initialized());
        assert_eq!(engine.registry().shape_names(), shapes);
        assert!(engine.registry().has_interactor("pauser"));
        assert!(engine.registry().has_particle_updater("outModes"));
        assert!(engine.registry().plugin(EmittersPlugin::ID).is_some());
    }

    #[test]
    fn test_add_preset_reports_storage() {
        let mut engine = Engine::new();
        assert!(engine.add_preset("calm", Options::default(), false));
        assert!(!engine.add_preset("calm", Options::default(), false));
        assert!(engine.add_preset("calm", Options::default(), true));
    }
}
