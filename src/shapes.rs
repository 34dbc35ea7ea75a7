//! Shape drawers.
//!
//! A drawer is registered once per shape name and shared by every container
//! that uses the shape. It can be a type implementing [`ShapeDrawer`], or a
//! bundle of closures ([`ShapeDrawerFns`]); both end up as the same
//! `Arc<dyn ShapeDrawer>` at registration time, so drawing never checks
//! which kind it got.
//!
//! # Example
//!
//! ```ignore
//! engine.add_shape_fn("diamond", ShapeDrawerFns::new(|canvas, particle, radius, opacity| {
//!     let half = Vec2::splat(radius * 0.7);
//!     canvas.fill_rect(particle.position - half, half * 2.0, particle.color, opacity);
//! }));
//! ```

use crate::canvas::Canvas;
use crate::particle::Particle;
use glam::Vec2;

/// Draws one shape for a particle.
pub trait ShapeDrawer: Send + Sync {
    /// Called when a container resolves this drawer.
    fn init(&self) {}

    /// Draw `particle` with the given radius and opacity.
    fn draw(&self, canvas: &mut dyn Canvas, particle: &Particle, radius: f32, opacity: f32);

    /// Called after `draw` for effects layered on top of the shape.
    fn after_effect(&self, _canvas: &mut dyn Canvas, _particle: &Particle, _radius: f32, _opacity: f32) {}

    /// Called when the container releases this drawer.
    fn destroy(&self) {}
}

/// Signature of a drawing closure.
pub type DrawFn = Box<dyn Fn(&mut dyn Canvas, &Particle, f32, f32) + Send + Sync>;

/// Signature of an init or destroy closure.
pub type HookFn = Box<dyn Fn() + Send + Sync>;

/// A shape drawer made of closures.
pub struct ShapeDrawerFns {
    draw: DrawFn,
    init: Option<HookFn>,
    after_effect: Option<DrawFn>,
    destroy: Option<HookFn>,
}

impl ShapeDrawerFns {
    pub fn new<F>(draw: F) -> Self
    where
        F: Fn(&mut dyn Canvas, &Particle, f32, f32) + Send + Sync + 'static,
    {
        Self {
            draw: Box::new(draw),
            init: None,
            after_effect: None,
            destroy: None,
        }
    }

    pub fn with_init<F: Fn() + Send + Sync + 'static>(mut self, init: F) -> Self {
        self.init = Some(Box::new(init));
        self
    }

    pub fn with_after_effect<F>(mut self, after_effect: F) -> Self
    where
        F: Fn(&mut dyn Canvas, &Particle, f32, f32) + Send + Sync + 'static,
    {
        self.after_effect = Some(Box::new(after_effect));
        self
    }

    pub fn with_destroy<F: Fn() + Send + Sync + 'static>(mut self, destroy: F) -> Self {
        self.destroy = Some(Box::new(destroy));
        self
    }
}

impl ShapeDrawer for ShapeDrawerFns {
    fn init(&self) {
        if let Some(init) = &self.init {
            init();
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, particle: &Particle, radius: f32, opacity: f32) {
        (self.draw)(canvas, particle, radius, opacity);
    }

    fn after_effect(&self, canvas: &mut dyn Canvas, particle: &Particle, radius: f32, opacity: f32) {
        if let Some(after_effect) = &self.after_effect {
            after_effect(canvas, particle, radius, opacity);
        }
    }

    fn destroy(&self) {
        if let Some(destroy) = &self.destroy {
            destroy();
        }
    }
}

/// Filled circle.
#[derive(Clone, Copy, Debug, Default)]
pub struct CircleDrawer;

impl ShapeDrawer for CircleDrawer {
    fn draw(&self, canvas: &mut dyn Canvas, particle: &Particle, radius: f32, opacity: f32) {
        canvas.fill_circle(particle.position, radius, particle.color, opacity);
    }
}

/// Filled square inscribed in the particle's circle.
#[derive(Clone, Copy, Debug, Default)]
pub struct SquareDrawer;

impl ShapeDrawer for SquareDrawer {
    fn draw(&self, canvas: &mut dyn Canvas, particle: &Particle, radius: f32, opacity: f32) {
        let half = radius / std::f32::consts::SQRT_2;
        canvas.fill_rect(
            particle.position - Vec2::splat(half),
            Vec2::splat(half * 2.0),
            particle.color,
            opacity,
        );
    }
}
