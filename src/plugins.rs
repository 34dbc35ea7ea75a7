//! Plugin registry.
//!
//! One [`Registry`] holds every named extension: shape drawers, presets,
//! full plugins, move-path generators, interactors and particle updaters.
//! It is created once (usually by the [`Engine`](crate::Engine)), handed to
//! the loader and every container, and lives as long as the process needs
//! it. There is no teardown.
//!
//! Registration never reaches into containers. A container picks up new
//! entries when it is refreshed, pulling them by name.
//!
//! # Name collisions
//!
//! Presets keep the first registration unless the caller asks to override.
//! Every other kind silently replaces the previous entry, so repeated setup
//! calls are harmless.
//!
//! # Concurrency
//!
//! The handle is cheap to clone and thread-safe. [`Registry::resolve`] reads
//! all entries under a single lock, so a refresh sees exactly the
//! registrations that completed before it started.

use crate::canvas::Canvas;
use crate::container::ContainerCore;
use crate::interactor::InteractorInitializer;
use crate::options::{ClickMode, Options};
use crate::particle::Particle;
use crate::shapes::ShapeDrawer;
use crate::time::Delta;
use crate::updaters::UpdaterInitializer;
use glam::Vec2;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Drives particle velocity along a custom path.
///
/// Registered as a shared instance; containers select one by name through
/// `particles.move.path`.
pub trait MovePathGenerator: Send + Sync {
    /// Called when a container resolves this generator.
    fn init(&self, _core: &ContainerCore) {}

    /// Velocity for `particle` this frame, in pixels per 60 Hz frame.
    fn generate(&self, particle: &Particle, delta: &Delta) -> Vec2;

    /// Called once per frame after every particle moved.
    fn update(&self) {}
}

/// Per-container instance of a full plugin.
pub trait ContainerPlugin {
    /// Called before the first frame after the plugin was resolved.
    fn start(&mut self, _core: &mut ContainerCore) {}

    /// Called when the container drops the plugin: on destroy, or on a
    /// refresh that no longer resolves the same registration.
    fn stop(&mut self, _core: &mut ContainerCore) {}

    /// Called each frame after the interactors.
    fn update(&mut self, _core: &mut ContainerCore, _delta: &Delta) {}

    /// Called each frame before the particles are drawn.
    fn draw(&mut self, _canvas: &mut dyn Canvas, _core: &ContainerCore) {}

    /// Called for every click mode the container dispatches.
    fn handle_click_mode(&mut self, _mode: &ClickMode, _core: &mut ContainerCore) {}
}

/// A full plugin, registered under its id.
pub trait Plugin: Send + Sync {
    fn id(&self) -> &str;

    /// Whether a container with these options should load the plugin.
    fn needs_plugin(&self, options: &Options) -> bool;

    /// Create the plugin instance for one container.
    fn get_plugin(&self, core: &ContainerCore) -> Box<dyn ContainerPlugin>;
}

#[derive(Default)]
struct Entries {
    drawers: Vec<(String, Arc<dyn ShapeDrawer>)>,
    presets: Vec<(String, Options)>,
    plugins: Vec<(String, Arc<dyn Plugin>)>,
    path_generators: Vec<(String, Arc<dyn MovePathGenerator>)>,
    interactors: Vec<(String, InteractorInitializer)>,
    updaters: Vec<(String, UpdaterInitializer)>,
}

fn upsert<T>(entries: &mut Vec<(String, T)>, name: String, value: T) {
    match entries.iter_mut().find(|(n, _)| *n == name) {
        Some(slot) => slot.1 = value,
        None => entries.push((name, value)),
    }
}

fn lookup<T: Clone>(entries: &[(String, T)], name: &str) -> Option<T> {
    entries.iter().find(|(n, _)| n == name).map(|(_, v)| v.clone())
}

/// What a container takes from the registry for its options.
pub struct Resolved {
    /// Drawers for the shape names the options use; missing names are absent.
    pub drawers: HashMap<String, Arc<dyn ShapeDrawer>>,
    /// Plugins whose `needs_plugin` accepted the options.
    pub plugins: Vec<Arc<dyn Plugin>>,
    /// Generator named by `particles.move.path`, if registered.
    pub path_generator: Option<Arc<dyn MovePathGenerator>>,
    /// Every interactor, in registration order.
    pub interactors: Vec<InteractorInitializer>,
    /// Every particle updater, in registration order.
    pub updaters: Vec<UpdaterInitializer>,
}

/// Shared handle to the named extensions.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<Entries>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register (or replace) the drawer for `name`.
    pub fn add_shape_drawer(&self, name: impl Into<String>, drawer: Arc<dyn ShapeDrawer>) {
        upsert(&mut self.write().drawers, name.into(), drawer);
    }

    /// Register a preset.
    ///
    /// An existing preset is only replaced when `override_existing` is set.
    /// Returns whether `options` was stored.
    pub fn add_preset(&self, name: impl Into<String>, options: Options, override_existing: bool) -> bool {
        let name = name.into();
        let mut entries = self.write();
        match entries.presets.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) if override_existing => {
                slot.1 = options;
                true
            }
            Some(_) => false,
            None => {
                entries.presets.push((name, options));
                true
            }
        }
    }

    /// Register (or replace) a full plugin under its id.
    pub fn add_plugin(&self, plugin: Arc<dyn Plugin>) {
        let id = plugin.id().to_string();
        upsert(&mut self.write().plugins, id, plugin);
    }

    /// Register (or replace) a move-path generator.
    pub fn add_path_generator(&self, name: impl Into<String>, generator: Arc<dyn MovePathGenerator>) {
        upsert(&mut self.write().path_generators, name.into(), generator);
    }

    /// Register (or replace) an interactor initializer.
    pub fn add_interactor(&self, name: impl Into<String>, initializer: InteractorInitializer) {
        upsert(&mut self.write().interactors, name.into(), initializer);
    }

    /// Register (or replace) a particle updater initializer.
    pub fn add_particle_updater(&self, name: impl Into<String>, initializer: UpdaterInitializer) {
        upsert(&mut self.write().updaters, name.into(), initializer);
    }

    pub fn shape_drawer(&self, name: &str) -> Option<Arc<dyn ShapeDrawer>> {
        lookup(&self.read().drawers, name)
    }

    pub fn preset(&self, name: &str) -> Option<Options> {
        lookup(&self.read().presets, name)
    }

    pub fn plugin(&self, id: &str) -> Option<Arc<dyn Plugin>> {
        lookup(&self.read().plugins, id)
    }

    pub fn path_generator(&self, name: &str) -> Option<Arc<dyn MovePathGenerator>> {
        lookup(&self.read().path_generators, name)
    }

    pub fn has_interactor(&self, name: &str) -> bool {
        self.read().interactors.iter().any(|(n, _)| n == name)
    }

    pub fn has_particle_updater(&self, name: &str) -> bool {
        self.read().updaters.iter().any(|(n, _)| n == name)
    }

    /// Names of all registered shapes.
    pub fn shape_names(&self) -> Vec<String> {
        self.read().drawers.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Snapshot everything a container with `options` needs.
    ///
    /// The lock is released before any plugin code (`needs_plugin`) runs.
    pub fn resolve(&self, options: &Options) -> Resolved {
        let (drawers, plugins, path_generator, interactors, updaters) = {
            let entries = self.read();

            let drawers: HashMap<_, _> = options
                .particles
                .shape
                .types
                .as_slice()
                .iter()
                .filter_map(|name| lookup(&entries.drawers, name).map(|d| (name.clone(), d)))
                .collect();

            let path_generator = options
                .particles
                .movement
                .path
                .as_deref()
                .and_then(|name| lookup(&entries.path_generators, name));

            (
                drawers,
                entries.plugins.iter().map(|(_, p)| p.clone()).collect::<Vec<_>>(),
                path_generator,
                entries.interactors.iter().map(|(_, i)| i.clone()).collect(),
                entries.updaters.iter().map(|(_, u)| u.clone()).collect(),
            )
        };

        Resolved {
            drawers,
            plugins: plugins.into_iter().filter(|p| p.needs_plugin(options)).collect(),
            path_generator,
            interactors,
            updaters,
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.read();
        f.debug_struct("Registry")
            .field("drawers", &entries.drawers.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("presets", &entries.presets.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("plugins", &entries.plugins.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("path_generators", &entries.path_generators.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("interactors", &entries.interactors.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .field("updaters", &entries.updaters.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{CircleDrawer, SquareDrawer};

    struct Marker(&'static str, bool);

    impl ContainerPlugin for Marker {}

    impl Plugin for Marker {
        fn id(&self) -> &str {
            self.0
        }

        fn needs_plugin(&self, _options: &Options) -> bool {
            self.1
        }

        fn get_plugin(&self, _core: &ContainerCore) -> Box<dyn ContainerPlugin> {
            Box::new(Marker(self.0, self.1))
        }
    }

    #[test]
    fn test_preset_override_flag() {
        let registry = Registry::new();
        let mut first = Options::default();
        first.particles.number = 1;
        let mut second = Options::default();
        second.particles.number = 2;

        assert!(registry.add_preset("snow", first, false));
        assert!(!registry.add_preset("snow", second.clone(), false));
        assert_eq!(registry.preset("snow").map(|o| o.particles.number), Some(1));

        assert!(registry.add_preset("snow", second, true));
        assert_eq!(registry.preset("snow").map(|o| o.particles.number), Some(2));
    }

    #[test]
    fn test_other_kinds_replace_silently() {
        let registry = Registry::new();
        registry.add_shape_drawer("dot", Arc::new(CircleDrawer));
        registry.add_shape_drawer("dot", Arc::new(SquareDrawer));
        assert_eq!(registry.shape_names(), vec!["dot".to_string()]);

        registry.add_plugin(Arc::new(Marker("m", true)));
        registry.add_plugin(Arc::new(Marker("m", false)));
        let plugin = registry.plugin("m").unwrap();
        assert!(!plugin.needs_plugin(&Options::default()));
    }

    #[test]
    fn test_resolve_picks_referenced_shapes_and_needed_plugins() {
        let registry = Registry::new();
        registry.add_shape_drawer("circle", Arc::new(CircleDrawer));
        registry.add_shape_drawer("square", Arc::new(SquareDrawer));
        registry.add_plugin(Arc::new(Marker("wanted", true)));
        registry.add_plugin(Arc::new(Marker("unwanted", false)));

        let mut options = Options::default();
        options.particles.shape.types = vec!["circle".to_string(), "star".to_string()].into();

        let resolved = registry.resolve(&options);
        assert!(resolved.drawers.contains_key("circle"));
        assert!(!resolved.drawers.contains_key("square"));
        assert!(!resolved.drawers.contains_key("star"));
        assert_eq!(resolved.plugins.len(), 1);
        assert_eq!(resolved.plugins[0].id(), "wanted");
        assert!(resolved.path_generator.is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let registry = Registry::new();
        let handle = registry.clone();
        handle.add_shape_drawer("circle", Arc::new(CircleDrawer));
        assert!(registry.shape_drawer("circle").is_some());
    }

    #[test]
    fn test_registration_from_another_thread() {
        let registry = Registry::new();
        let handle = registry.clone();
        std::thread::spawn(move || handle.add_shape_drawer("circle", Arc::new(CircleDrawer)))
            .join()
            .unwrap();
        assert!(registry.shape_drawer("circle").is_some());
    }
}
