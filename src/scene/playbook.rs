use crate::{
    drawable::{DrawableRef, timeline_duration},
    foundation::error::{ReelError, ReelResult},
    scene::scene::Scene,
};

/// Declarative timeline content, filled into a [`Playbook`] once.
pub trait Timeline {
    /// Append scenes to `book`.
    fn timeline(&mut self, book: &mut Playbook) -> ReelResult<()>;
}

/// Ordered list of scenes that folds into one.
///
/// Built in two steps: an empty book is created, then the timeline hook fills it.
#[derive(Debug, Default)]
pub struct Playbook {
    scenes: Vec<Scene>,
    cursor: f64,
}

impl Playbook {
    /// Run `timeline` against a fresh playbook.
    #[tracing::instrument(skip_all)]
    pub fn build(timeline: &mut impl Timeline) -> ReelResult<Self> {
        let mut book = Self::default();
        timeline.timeline(&mut book)?;
        tracing::debug!(scenes = book.len(), duration = book.cursor, "playbook built");
        Ok(book)
    }

    /// Run a closure against a fresh playbook.
    pub fn from_fn(f: impl FnOnce(&mut Playbook) -> ReelResult<()>) -> ReelResult<Self> {
        let mut book = Self::default();
        f(&mut book)?;
        Ok(book)
    }

    /// Play `drawable` for `duration` seconds, or for its longest keyframe timeline when `None`.
    pub fn play(&mut self, drawable: DrawableRef, duration: Option<f64>) -> ReelResult<()> {
        let duration = duration.unwrap_or_else(|| timeline_duration(&drawable));
        self.add_scene(Scene::timed(drawable, duration)?);
        Ok(())
    }

    /// Hold the last scene's final frame for `duration` seconds.
    pub fn freeze(&mut self, duration: f64) -> ReelResult<()> {
        let last = self
            .scenes
            .last()
            .ok_or_else(|| ReelError::usage("freeze() called before any scene was added"))?;
        let held = last.freeze(duration)?;
        self.add_scene(held);
        Ok(())
    }

    /// Append a caller-built scene.
    pub fn add_scene(&mut self, scene: Scene) {
        self.cursor += scene.duration();
        self.scenes.push(scene);
    }

    /// All scenes joined in order.
    pub fn combined_scene(&self) -> ReelResult<Scene> {
        let mut scenes = self.scenes.iter();
        let first = scenes
            .next()
            .ok_or_else(|| ReelError::usage("playbook has no scenes to combine"))?;
        Ok(scenes.fold(first.clone(), |acc, next| acc.concat(next)))
    }

    /// Running total of appended durations in seconds.
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Scenes in play order.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Number of scenes added so far.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene has been added yet.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/playbook.rs"]
mod tests;
