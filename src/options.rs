//! Resolved container options.
//!
//! Options arrive here already resolved: schema merging and preset layering
//! happen upstream. Every struct is `serde`-enabled with defaults so a JSON
//! file only needs the fields it changes.
//!
//! # Example
//!
//! ```ignore
//! let options: Options = serde_json::from_str(r#"{
//!     "particles": { "number": 200, "move": { "speed": 3.0, "outMode": "bounce" } },
//!     "interactivity": { "events": { "onClick": { "enable": true, "mode": "pause" } } }
//! }"#)?;
//! ```

use crate::emitter::EmitterOptions;
use crate::error::OptionsError;
use crate::utils::{random_in_range_with, SingleOrMultiple};
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::fs;
use std::path::Path;

/// Complete options for one container.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Start playing as soon as the container is loaded.
    pub autoplay: bool,
    /// Frames per second cap, `0.0` for none.
    pub fps_limit: f32,
    /// Pause while the host surface is blurred.
    pub pause_on_blur: bool,
    pub particles: ParticlesOptions,
    pub interactivity: InteractivityOptions,
    pub emitters: Vec<EmitterOptions>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            autoplay: true,
            fps_limit: 120.0,
            pause_on_blur: true,
            particles: ParticlesOptions::default(),
            interactivity: InteractivityOptions::default(),
            emitters: Vec::new(),
        }
    }
}

impl Options {
    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save options to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OptionsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Either a fixed value or a `{ min, max }` range sampled per particle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RangeValue {
    Fixed(f32),
    Range { min: f32, max: f32 },
}

impl RangeValue {
    /// Draw a value (fixed values are returned as is).
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match *self {
            RangeValue::Fixed(v) => v,
            RangeValue::Range { min, max } => random_in_range_with(rng, min, max),
        }
    }

    pub fn min(&self) -> f32 {
        match *self {
            RangeValue::Fixed(v) => v,
            RangeValue::Range { min, .. } => min,
        }
    }

    pub fn max(&self) -> f32 {
        match *self {
            RangeValue::Fixed(v) => v,
            RangeValue::Range { max, .. } => max,
        }
    }
}

impl From<f32> for RangeValue {
    fn from(v: f32) -> Self {
        RangeValue::Fixed(v)
    }
}

/// RGB color.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in `0.0..=1.0`.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Settings applied to every particle the container creates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticlesOptions {
    /// Particles created when the container starts.
    pub number: usize,
    /// Upper bound on live particles, `0` for none.
    pub limit: usize,
    pub shape: ShapeOptions,
    /// Radius in pixels.
    pub size: RangeValue,
    pub color: Color,
    pub opacity: OpacityOptions,
    #[serde(rename = "move")]
    pub movement: MoveOptions,
    pub life: LifeOptions,
    pub collisions: CollisionOptions,
}

impl Default for ParticlesOptions {
    fn default() -> Self {
        Self {
            number: 100,
            limit: 0,
            shape: ShapeOptions::default(),
            size: RangeValue::Range { min: 1.0, max: 3.0 },
            color: Color::WHITE,
            opacity: OpacityOptions::default(),
            movement: MoveOptions::default(),
            life: LifeOptions::default(),
            collisions: CollisionOptions::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShapeOptions {
    /// Shape names; each particle picks one at random.
    #[serde(rename = "type")]
    pub types: SingleOrMultiple<String>,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            types: SingleOrMultiple::Single("circle".to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OpacityOptions {
    pub value: RangeValue,
    pub animation: AnimationOptions,
}

impl Default for OpacityOptions {
    fn default() -> Self {
        Self {
            value: RangeValue::Fixed(1.0),
            animation: AnimationOptions::default(),
        }
    }
}

/// Oscillation of an animated value between its range bounds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationOptions {
    pub enable: bool,
    /// Change per second.
    pub speed: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self { enable: false, speed: 1.0 }
    }
}

/// Initial direction of travel.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum MoveDirection {
    /// Random heading per particle.
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
}

impl MoveDirection {
    /// Unit heading, or `None` when the heading is random.
    pub fn heading(self) -> Option<Vec2> {
        match self {
            MoveDirection::None => None,
            MoveDirection::Top => Some(Vec2::new(0.0, -1.0)),
            MoveDirection::Bottom => Some(Vec2::new(0.0, 1.0)),
            MoveDirection::Left => Some(Vec2::new(-1.0, 0.0)),
            MoveDirection::Right => Some(Vec2::new(1.0, 0.0)),
        }
    }
}

/// What happens when a particle reaches the viewport edge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum OutMode {
    /// Reflect off the edge.
    Bounce,
    /// Remove the particle once it is no longer inside.
    Destroy,
    /// Reappear on the opposite edge once fully outside.
    #[default]
    Out,
    /// Keep going.
    None,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveOptions {
    pub enable: bool,
    /// Pixels per 60 Hz frame.
    pub speed: f32,
    /// Scale each particle's speed by a random factor in `[0, 1]`.
    pub random: bool,
    pub direction: MoveDirection,
    pub out_mode: OutMode,
    /// Registered path generator that drives velocity, if any.
    pub path: Option<String>,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            enable: true,
            speed: 2.0,
            random: false,
            direction: MoveDirection::None,
            out_mode: OutMode::Out,
            path: None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LifeOptions {
    /// Lifetime in seconds; unlimited when absent.
    pub duration: Option<RangeValue>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum CollisionMode {
    #[default]
    Bounce,
    Destroy,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollisionOptions {
    pub enable: bool,
    pub mode: CollisionMode,
}

/// Named behavior selector dispatched on pointer click.
///
/// Serialized as its plain name (`"pause"`), unknown names become
/// [`ClickMode::Custom`] so third-party interactors can claim them.
/// Modes compare by name, so `Custom("pause")` equals `Pause`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClickMode {
    Pause,
    Push,
    Remove,
    Custom(String),
}

impl ClickMode {
    pub fn as_str(&self) -> &str {
        match self {
            ClickMode::Pause => "pause",
            ClickMode::Push => "push",
            ClickMode::Remove => "remove",
            ClickMode::Custom(name) => name,
        }
    }
}

impl From<&str> for ClickMode {
    fn from(name: &str) -> Self {
        match name {
            "pause" => ClickMode::Pause,
            "push" => ClickMode::Push,
            "remove" => ClickMode::Remove,
            other => ClickMode::Custom(other.to_string()),
        }
    }
}

impl From<String> for ClickMode {
    fn from(name: String) -> Self {
        ClickMode::from(name.as_str())
    }
}

impl From<ClickMode> for String {
    fn from(mode: ClickMode) -> Self {
        mode.as_str().to_string()
    }
}

impl PartialEq for ClickMode {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ClickMode {}

impl Hash for ClickMode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for ClickMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named behavior selector applied while the pointer hovers.
///
/// Compares by name, like [`ClickMode`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HoverMode {
    Repulse,
    Custom(String),
}

impl HoverMode {
    pub fn as_str(&self) -> &str {
        match self {
            HoverMode::Repulse => "repulse",
            HoverMode::Custom(name) => name,
        }
    }
}

impl From<&str> for HoverMode {
    fn from(name: &str) -> Self {
        match name {
            "repulse" => HoverMode::Repulse,
            other => HoverMode::Custom(other.to_string()),
        }
    }
}

impl From<String> for HoverMode {
    fn from(name: String) -> Self {
        HoverMode::from(name.as_str())
    }
}

impl PartialEq for HoverMode {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for HoverMode {}

impl Hash for HoverMode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<HoverMode> for String {
    fn from(mode: HoverMode) -> Self {
        mode.as_str().to_string()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractivityOptions {
    pub events: EventsOptions,
    pub modes: ModesOptions,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EventsOptions {
    pub on_click: ClickEvent,
    pub on_hover: HoverEvent,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClickEvent {
    pub enable: bool,
    pub mode: SingleOrMultiple<ClickMode>,
}

impl Default for ClickEvent {
    fn default() -> Self {
        Self {
            enable: true,
            mode: SingleOrMultiple::Single(ClickMode::Pause),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HoverEvent {
    pub enable: bool,
    pub mode: SingleOrMultiple<HoverMode>,
}

impl Default for HoverEvent {
    fn default() -> Self {
        Self {
            enable: false,
            mode: SingleOrMultiple::Single(HoverMode::Repulse),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModesOptions {
    pub push: QuantityMode,
    pub remove: QuantityMode,
    pub repulse: RepulseMode,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuantityMode {
    pub quantity: usize,
}

impl Default for QuantityMode {
    fn default() -> Self {
        Self { quantity: 4 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RepulseMode {
    /// Reach around the pointer, in pixels.
    pub distance: f32,
    /// Push strength multiplier.
    pub speed: f32,
}

impl Default for RepulseMode {
    fn default() -> Self {
        Self {
            distance: 100.0,
            speed: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_from_empty_json() {
        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_partial_json() {
        let options: Options = serde_json::from_str(
            r#"{
                "fpsLimit": 30,
                "particles": {
                    "number": 5,
                    "shape": { "type": ["circle", "star"] },
                    "size": { "min": 2, "max": 4 },
                    "move": { "speed": 3, "outMode": "bounce", "path": "zigzag" }
                },
                "interactivity": {
                    "events": { "onClick": { "enable": true, "mode": ["push", "sparkle"] } }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(options.fps_limit, 30.0);
        assert_eq!(options.particles.number, 5);
        assert_eq!(options.particles.shape.types.as_slice().len(), 2);
        assert_eq!(options.particles.size, RangeValue::Range { min: 2.0, max: 4.0 });
        assert_eq!(options.particles.movement.out_mode, OutMode::Bounce);
        assert_eq!(options.particles.movement.path.as_deref(), Some("zigzag"));
        assert_eq!(
            options.interactivity.events.on_click.mode.as_slice(),
            &[ClickMode::Push, ClickMode::Custom("sparkle".into())]
        );
    }

    #[test]
    fn test_click_mode_round_trip_names() {
        for name in ["pause", "push", "remove", "confetti"] {
            assert_eq!(ClickMode::from(name).as_str(), name);
        }
    }

    #[test]
    fn test_modes_compare_by_name() {
        use std::collections::HashSet;

        assert_eq!(ClickMode::Custom("pause".into()), ClickMode::Pause);
        assert_ne!(ClickMode::Custom("sparkle".into()), ClickMode::Pause);
        assert_eq!(HoverMode::Custom("repulse".into()), HoverMode::Repulse);

        let modes: HashSet<ClickMode> = [ClickMode::Push, ClickMode::Custom("push".into())].into_iter().collect();
        assert_eq!(modes.len(), 1);
    }

    #[test]
    fn test_range_value_sample() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(RangeValue::Fixed(3.0).sample(&mut rng), 3.0);

        let range = RangeValue::Range { min: 1.0, max: 2.0 };
        for _ in 0..100 {
            let v = range.sample(&mut rng);
            assert!((1.0..=2.0).contains(&v));
        }
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("flurry-options-{}.json", std::process::id()));
        let mut options = Options::default();
        options.particles.number = 42;
        options.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.particles.number, 42);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Options::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, OptionsError::Io(_)));
    }
}
