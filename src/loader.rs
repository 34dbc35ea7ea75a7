//! Container creation and bookkeeping.
//!
//! The [`Loader`] is the only place containers are created. It hands each
//! one the resolved options and the shared [`Registry`], keeps them by id,
//! and forwards the host's frame callback to all of them.

use crate::canvas::Canvas;
use crate::container::{ClickHandler, Container, FrameOutcome};
use crate::error::LoadError;
use crate::options::Options;
use crate::plugins::Registry;
use rand::Rng;
use tracing::{debug, info, warn};

/// Creates and owns containers.
pub struct Loader {
    registry: Registry,
    containers: Vec<Container>,
    click_handler: Option<ClickHandler>,
}

impl Loader {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            containers: Vec::new(),
            click_handler: None,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Create a container on `canvas`.
    ///
    /// A container already loaded under `id` is destroyed and replaced in
    /// place. The new container starts playing when `options.autoplay` is set.
    pub fn load(
        &mut self,
        id: impl Into<String>,
        canvas: Box<dyn Canvas>,
        options: Options,
    ) -> Result<&mut Container, LoadError> {
        let id = id.into();
        let autoplay = options.autoplay;

        let mut container = Container::new(id.clone(), options, canvas, self.registry.clone());
        if let Some(handler) = &self.click_handler {
            container.set_on_click_handler(handler.clone());
        }
        if autoplay {
            container.play()?;
        }

        let index = match self.containers.iter().position(|c| c.id() == id) {
            Some(index) => {
                let old = &mut self.containers[index];
                if !old.is_destroyed() {
                    old.destroy()?;
                }
                debug!(container = %id, "replacing container");
                self.containers[index] = container;
                index
            }
            None => {
                self.containers.push(container);
                self.containers.len() - 1
            }
        };

        info!(container = %id, autoplay, "container loaded");
        Ok(&mut self.containers[index])
    }

    /// Load one item of `options`: the one at `index`, or a random one.
    pub fn load_from_array(
        &mut self,
        id: impl Into<String>,
        canvas: Box<dyn Canvas>,
        options: &[Options],
        index: Option<usize>,
    ) -> Result<&mut Container, LoadError> {
        if options.is_empty() {
            return Err(LoadError::EmptyOptions);
        }

        let index = match index {
            Some(index) if index >= options.len() => {
                return Err(LoadError::IndexOutOfRange {
                    index,
                    len: options.len(),
                });
            }
            Some(index) => index,
            None => rand::thread_rng().gen_range(0..options.len()),
        };

        self.load(id, canvas, options[index].clone())
    }

    /// Load a registered preset.
    pub fn load_preset(
        &mut self,
        id: impl Into<String>,
        canvas: Box<dyn Canvas>,
        name: &str,
    ) -> Result<&mut Container, LoadError> {
        let options = self
            .registry
            .preset(name)
            .ok_or_else(|| LoadError::UnknownPreset(name.to_string()))?;
        self.load(id, canvas, options)
    }

    /// Every container loaded, in load order (destroyed ones included).
    pub fn dom(&self) -> &[Container] {
        &self.containers
    }

    /// The container at `index`, unless it was destroyed.
    pub fn dom_item(&self, index: usize) -> Option<&Container> {
        self.containers.get(index).filter(|c| !c.is_destroyed())
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id() == id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| c.id() == id)
    }

    /// Refresh every live container against the registry.
    pub fn refresh_all(&mut self) {
        for container in self.containers.iter_mut().filter(|c| !c.is_destroyed()) {
            if let Err(err) = container.refresh() {
                warn!(container = %container.id(), error = %err, "refresh failed");
            }
        }
    }

    /// Notify `handler` of clicks on every container, now and future.
    pub fn set_on_click_handler(&mut self, handler: ClickHandler) {
        for container in self.containers.iter_mut() {
            container.set_on_click_handler(handler.clone());
        }
        self.click_handler = Some(handler);
    }

    /// Host frame callback for all live containers.
    ///
    /// Returns how many containers rendered a frame.
    pub fn tick(&mut self, timestamp: f64) -> usize {
        let mut rendered = 0;
        for container in self.containers.iter_mut().filter(|c| !c.is_destroyed()) {
            match container.tick(timestamp) {
                Ok(FrameOutcome::Rendered(_)) => rendered += 1,
                Ok(_) => {}
                Err(err) => warn!(container = %container.id(), error = %err, "tick failed"),
            }
        }
        rendered
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader").field("containers", &self.containers).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::HeadlessCanvas;
    use crate::container::AnimationState;
    use crate::utils::Dimension;

    fn canvas() -> Box<dyn Canvas> {
        Box::new(HeadlessCanvas::new(Dimension::new(100.0, 100.0)))
    }

    fn options(number: usize) -> Options {
        let mut options = Options::default();
        options.particles.number = number;
        options
    }

    #[test]
    fn test_load_autoplays() {
        let mut loader = Loader::new(Registry::new());
        let container = loader.load("a", canvas(), options(3)).unwrap();
        assert_eq!(container.state(), AnimationState::Playing);
        assert_eq!(container.particles().count(), 3);

        let mut manual = options(3);
        manual.autoplay = false;
        let container = loader.load("b", canvas(), manual).unwrap();
        assert_eq!(container.state(), AnimationState::Uninitialized);
        assert_eq!(loader.dom().len(), 2);
    }

    #[test]
    fn test_same_id_replaces_in_place() {
        let mut loader = Loader::new(Registry::new());
        loader.load("a", canvas(), options(1)).unwrap();
        loader.load("b", canvas(), options(1)).unwrap();
        loader.load("a", canvas(), options(5)).unwrap();

        assert_eq!(loader.dom().len(), 2);
        assert_eq!(loader.dom()[0].id(), "a");
        assert_eq!(loader.dom()[0].particles().count(), 5);
    }

    #[test]
    fn test_load_from_array_errors() {
        let mut loader = Loader::new(Registry::new());
        assert!(matches!(
            loader.load_from_array("a", canvas(), &[], None),
            Err(LoadError::EmptyOptions)
        ));
        assert!(matches!(
            loader.load_from_array("a", canvas(), &[options(1)], Some(1)),
            Err(LoadError::IndexOutOfRange { index: 1, len: 1 })
        ));

        let container = loader
            .load_from_array("a", canvas(), &[options(1), options(2)], Some(1))
            .unwrap();
        assert_eq!(container.particles().count(), 2);
    }

    #[test]
    fn test_random_item_from_array() {
        let mut loader = Loader::new(Registry::new());
        let container = loader
            .load_from_array("a", canvas(), &[options(1), options(2)], None)
            .unwrap();
        assert!((1..=2).contains(&container.particles().count()));
    }

    #[test]
    fn test_unknown_preset() {
        let mut loader = Loader::new(Registry::new());
        let err = loader.load_preset("a", canvas(), "nope").unwrap_err();
        assert!(matches!(err, LoadError::UnknownPreset(name) if name == "nope"));
    }

    #[test]
    fn test_dom_item_hides_destroyed() {
        let mut loader = Loader::new(Registry::new());
        loader.load("a", canvas(), options(1)).unwrap();
        assert!(loader.dom_item(0).is_some());

        loader.container_mut("a").unwrap().destroy().unwrap();
        assert!(loader.dom_item(0).is_none());
        assert!(loader.dom_item(5).is_none());
    }

    #[test]
    fn test_tick_counts_rendered_frames() {
        let mut loader = Loader::new(Registry::new());
        loader.load("a", canvas(), options(1)).unwrap();
        let mut paused = options(1);
        paused.autoplay = false;
        loader.load("b", canvas(), paused).unwrap();

        assert_eq!(loader.tick(0.0), 1);
    }
}
