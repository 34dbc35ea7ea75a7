//! Host events and pointer state.
//!
//! The host delivers raw events to a container as [`HostEvent`]s. On native
//! targets, [`PointerTracker`] turns winit window events into them; a web
//! host would build them from DOM events the same way.
//!
//! # Usage
//!
//! ```ignore
//! fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
//!     for host_event in self.tracker.translate(&event) {
//!         container.handle_event(host_event)?;
//!     }
//! }
//! ```

use crate::utils::Dimension;
use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

/// An event delivered by the host environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// Pointer moved to a position in canvas pixels.
    PointerMove(Vec2),
    /// Pointer left the canvas.
    PointerLeave,
    /// Primary button went down.
    PointerDown,
    /// Primary button went up.
    PointerUp,
    /// Completed click at a position in canvas pixels.
    Click(Vec2),
    /// Canvas was resized.
    Resize(Dimension),
    /// Host surface lost focus.
    Blur,
    /// Host surface regained focus.
    Focus,
}

/// Pointer state a container keeps between events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    /// Current position, `None` while outside the canvas.
    pub position: Option<Vec2>,
    /// Whether the primary button is held.
    pub clicking: bool,
    /// Position of the most recent click.
    pub click_position: Option<Vec2>,
}

impl Pointer {
    /// Apply a pointer event; other events are ignored.
    pub(crate) fn apply(&mut self, event: &HostEvent) {
        match *event {
            HostEvent::PointerMove(position) => self.position = Some(position),
            HostEvent::PointerLeave => {
                self.position = None;
                self.clicking = false;
            }
            HostEvent::PointerDown => self.clicking = true,
            HostEvent::PointerUp => self.clicking = false,
            HostEvent::Click(position) => {
                self.click_position = Some(position);
                self.position = Some(position);
            }
            HostEvent::Resize(_) | HostEvent::Blur | HostEvent::Focus => {}
        }
    }
}

/// Translates winit window events into host events.
///
/// winit reports button presses without a position, so the tracker keeps
/// the last cursor position and emits a [`HostEvent::Click`] on release of
/// the left button.
#[derive(Debug, Default)]
pub struct PointerTracker {
    last_position: Option<Vec2>,
    pressed: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host events produced by one window event, in delivery order.
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<HostEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let pos = Vec2::new(position.x as f32, position.y as f32);
                self.last_position = Some(pos);
                vec![HostEvent::PointerMove(pos)]
            }
            WindowEvent::CursorLeft { .. } => {
                self.last_position = None;
                self.pressed = false;
                vec![HostEvent::PointerLeave]
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.button(*state == ElementState::Pressed)
            }
            WindowEvent::Resized(size) => vec![HostEvent::Resize(Dimension::new(
                size.width as f32,
                size.height as f32,
            ))],
            WindowEvent::Focused(true) => vec![HostEvent::Focus],
            WindowEvent::Focused(false) => vec![HostEvent::Blur],
            _ => Vec::new(),
        }
    }

    fn button(&mut self, pressed: bool) -> Vec<HostEvent> {
        if pressed {
            self.pressed = true;
            return vec![HostEvent::PointerDown];
        }

        let mut events = vec![HostEvent::PointerUp];
        if self.pressed {
            if let Some(pos) = self.last_position {
                events.push(HostEvent::Click(pos));
            }
        }
        self.pressed = false;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_state() {
        let mut pointer = Pointer::default();
        assert!(pointer.position.is_none());

        pointer.apply(&HostEvent::PointerMove(Vec2::new(4.0, 5.0)));
        pointer.apply(&HostEvent::PointerDown);
        assert_eq!(pointer.position, Some(Vec2::new(4.0, 5.0)));
        assert!(pointer.clicking);

        pointer.apply(&HostEvent::PointerLeave);
        assert!(pointer.position.is_none());
        assert!(!pointer.clicking);
    }

    #[test]
    fn test_click_records_position() {
        let mut pointer = Pointer::default();
        pointer.apply(&HostEvent::Click(Vec2::new(1.0, 2.0)));
        assert_eq!(pointer.click_position, Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_release_emits_click_at_last_position() {
        let mut tracker = PointerTracker::new();
        tracker.last_position = Some(Vec2::new(30.0, 40.0));

        assert_eq!(tracker.button(true), vec![HostEvent::PointerDown]);
        assert_eq!(
            tracker.button(false),
            vec![HostEvent::PointerUp, HostEvent::Click(Vec2::new(30.0, 40.0))]
        );

        // Release without a press is not a click
        assert_eq!(tracker.button(false), vec![HostEvent::PointerUp]);
    }

    #[test]
    fn test_focus_and_resize() {
        let mut tracker = PointerTracker::new();
        assert_eq!(tracker.translate(&WindowEvent::Focused(false)), vec![HostEvent::Blur]);
        assert_eq!(
            tracker.translate(&WindowEvent::Resized(winit::dpi::PhysicalSize::new(640, 480))),
            vec![HostEvent::Resize(Dimension::new(640.0, 480.0))]
        );
    }
}
