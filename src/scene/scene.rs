use std::fmt;
use std::ops::Add;
use std::sync::Arc;

use crate::drawable::{Drawable, DrawableRef};
use crate::foundation::error::{ReelError, ReelResult};

/// Frame function of a leaf scene: query time in seconds to the drawable shown at that time.
pub type FrameFn = Arc<dyn Fn(f64) -> DrawableRef + Send + Sync>;

#[derive(Clone)]
struct Leaf {
    duration: f64,
    frame: FrameFn,
}

/// A duration plus a function from time to drawable.
///
/// Scenes are immutable and cheap to clone. Concatenation keeps a flat list of leaf scenes, so
/// `(a + b) + c` and `a + (b + c)` are the same scene.
#[derive(Clone)]
pub struct Scene {
    init: Arc<[Leaf]>,
    last: Leaf,
    duration: f64,
}

impl Scene {
    /// Scene of `duration` seconds drawn by `frame`.
    ///
    /// Fails when `duration` is negative or not finite.
    pub fn new<F>(duration: f64, frame: F) -> ReelResult<Self>
    where
        F: Fn(f64) -> DrawableRef + Send + Sync + 'static,
    {
        check_duration(duration)?;
        Ok(Self::leaf(duration, Arc::new(frame)))
    }

    /// Scene that moves `drawable`'s time cursor to the query time and shows it.
    ///
    /// The returned frames are the live drawable, not snapshots.
    pub fn timed(drawable: DrawableRef, duration: f64) -> ReelResult<Self> {
        Self::new(duration, move |t| {
            drawable.set_time(t);
            Arc::clone(&drawable)
        })
    }

    fn leaf(duration: f64, frame: FrameFn) -> Self {
        Self {
            init: Arc::from(Vec::new()),
            last: Leaf { duration, frame },
            duration,
        }
    }

    fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.init.iter().chain(std::iter::once(&self.last))
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Number of leaf scenes joined into this one.
    pub fn segment_count(&self) -> usize {
        self.init.len() + 1
    }

    /// Drawable to show at `t` seconds.
    ///
    /// Each leaf owns `[start, start + duration)`; times past the end go to the last leaf.
    pub fn frame(&self, t: f64) -> DrawableRef {
        let mut local = t;
        for leaf in self.init.iter() {
            if local < leaf.duration {
                return (leaf.frame)(local);
            }
            local -= leaf.duration;
        }
        (self.last.frame)(local)
    }

    /// Play `self`, then `next`.
    pub fn concat(&self, next: &Scene) -> Scene {
        let init: Vec<Leaf> = self
            .leaves()
            .chain(next.init.iter())
            .cloned()
            .collect();
        let duration = init
            .iter()
            .chain(std::iter::once(&next.last))
            .fold(0.0, |acc, leaf| acc + leaf.duration);
        Self {
            init: Arc::from(init),
            last: next.last.clone(),
            duration,
        }
    }

    /// Hold the final frame of `self` for `duration` seconds.
    ///
    /// The held frame is evaluated again on every query.
    pub fn freeze(&self, duration: f64) -> ReelResult<Scene> {
        let src = self.clone();
        Scene::new(duration, move |_| src.frame(src.duration()))
    }

    /// Play `self` backwards: `t` maps to `duration - t`.
    pub fn reverse(&self) -> Scene {
        let src = self.clone();
        let duration = self.duration;
        Self::leaf(duration, Arc::new(move |t| src.frame(duration - t)))
    }
}

impl Add for Scene {
    type Output = Scene;

    fn add(self, rhs: Scene) -> Scene {
        self.concat(&rhs)
    }
}

impl Add<&Scene> for &Scene {
    type Output = Scene;

    fn add(self, rhs: &Scene) -> Scene {
        self.concat(rhs)
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("duration", &self.duration)
            .field("segments", &self.segment_count())
            .finish()
    }
}

pub(crate) fn check_duration(duration: f64) -> ReelResult<()> {
    if !duration.is_finite() || duration < 0.0 {
        return Err(ReelError::validation(format!(
            "scene duration must be finite and >= 0, got {duration}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
