//! JSON reel scripts: a declarative list of play/freeze steps over keyframed shapes.
//!
//! ```json
//! {
//!   "backdrop": { "x": 0, "y": 0, "width": 320, "height": 180, "fill": [16, 16, 24, 255] },
//!   "steps": [
//!     { "play": { "layers": [ {
//!         "shape": "rect",
//!         "keys": [
//!           { "x": 20, "y": 60, "width": 60, "height": 60, "fill": [230, 80, 60, 255] },
//!           { "x": 240, "y": 60, "width": 60, "height": 60, "fill": [60, 120, 230, 255] }
//!         ],
//!         "durations": 1.5,
//!         "ease": "in_out_cubic"
//!     } ] } },
//!     { "freeze": 0.5 }
//!   ]
//! }
//! ```

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    animation::{
        ease::Ease,
        keyframes::{Animated, PerSegment},
        tween::Tween,
    },
    drawable::{Drawable, DrawableRef, Ellipse, Group, Rectangle},
    foundation::core::{Rect, Rgba8Premul},
    foundation::error::{ReelError, ReelResult},
    scene::playbook::{Playbook, Timeline},
};

/// Parsed reel script.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReelScript {
    /// Timeline steps in order.
    pub steps: Vec<Step>,
    /// Static shape drawn under the layers of every play step.
    #[serde(default)]
    pub backdrop: Option<ShapeState>,
}

/// One timeline step.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Play a group of layers.
    Play(PlayStep),
    /// Hold the previous step's last frame for this many seconds.
    Freeze(f64),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayStep {
    pub layers: Vec<Layer>,
    /// Step length in seconds. Defaults to the longest layer timeline.
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rect,
    Ellipse,
}

/// Keyframed shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    pub shape: ShapeKind,
    /// Keyframe states. A single key gives a still shape.
    pub keys: Vec<ShapeState>,
    #[serde(default = "default_durations")]
    pub durations: PerSegment<f64>,
    #[serde(default = "default_ease")]
    pub ease: PerSegment<Ease>,
    #[serde(default)]
    pub start_time: f64,
}

/// Geometry and color of a shape at one keyframe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeState {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Straight-alpha RGBA8.
    #[serde(default = "default_fill")]
    pub fill: [u8; 4],
    /// Ignored for ellipses.
    #[serde(default)]
    pub corner_radius: f64,
}

fn default_durations() -> PerSegment<f64> {
    PerSegment::Uniform(1.0)
}

fn default_ease() -> PerSegment<Ease> {
    PerSegment::Uniform(Ease::default())
}

fn default_fill() -> [u8; 4] {
    [255, 255, 255, 255]
}

impl ShapeState {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn fill(&self) -> Rgba8Premul {
        let [r, g, b, a] = self.fill;
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }

    fn rectangle(&self) -> Rectangle {
        Rectangle::new(self.rect(), self.fill()).with_corner_radius(self.corner_radius)
    }

    fn ellipse(&self) -> Ellipse {
        Ellipse::new(self.rect(), self.fill())
    }
}

impl Layer {
    /// Build the drawable for this layer.
    pub fn to_drawable(&self) -> ReelResult<DrawableRef> {
        match self.keys.as_slice() {
            [] => Err(ReelError::animation("layer needs at least one key")),
            [only] => {
                let still: DrawableRef = match self.shape {
                    ShapeKind::Rect => Arc::new(only.rectangle()),
                    ShapeKind::Ellipse => Arc::new(only.ellipse()),
                };
                Ok(still)
            }
            keys => match self.shape {
                ShapeKind::Rect => self.animate(keys.iter().map(ShapeState::rectangle).collect()),
                ShapeKind::Ellipse => self.animate(keys.iter().map(ShapeState::ellipse).collect()),
            },
        }
    }

    fn animate<S>(&self, states: Vec<S>) -> ReelResult<DrawableRef>
    where
        S: Drawable + Tween + Clone + 'static,
    {
        Ok(
            Animated::new(states, self.durations.clone(), self.ease.clone())?
                .starting_at(self.start_time)?
                .into_ref(),
        )
    }
}

impl ReelScript {
    /// Parse a script from a JSON string.
    pub fn from_json(json: &str) -> ReelResult<Self> {
        serde_json::from_str(json).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Parse a script from a JSON reader.
    pub fn from_reader(reader: impl Read) -> ReelResult<Self> {
        serde_json::from_reader(reader).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Read and parse a script file.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open reel script '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Serialize back to pretty JSON.
    pub fn to_json(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReelError::serde(e.to_string()))
    }

    /// Build the playbook described by the steps.
    pub fn to_playbook(&self) -> ReelResult<Playbook> {
        Playbook::build(&mut ScriptTimeline(self))
    }
}

struct ScriptTimeline<'a>(&'a ReelScript);

impl Timeline for ScriptTimeline<'_> {
    fn timeline(&mut self, book: &mut Playbook) -> ReelResult<()> {
        let script = self.0;
        for (i, step) in script.steps.iter().enumerate() {
            match step {
                Step::Play(play) => {
                    let mut group = Group::default();
                    if let Some(backdrop) = &script.backdrop {
                        group.push(Arc::new(backdrop.rectangle()));
                    }
                    for layer in &play.layers {
                        group.push(layer.to_drawable()?);
                    }
                    book.play(group.into_ref(), play.duration)?;
                }
                Step::Freeze(secs) => book.freeze(*secs)?,
            }
            tracing::trace!(step = i, cursor = book.cursor(), "script step applied");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/script.rs"]
mod tests;
