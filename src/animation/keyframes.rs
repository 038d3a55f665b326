use std::sync::Arc;

use crate::{
    animation::ease::Ease,
    animation::tween::{Tween, tween},
    drawable::{Drawable, DrawableRef, TimeCursor},
    foundation::core::Rect,
    foundation::error::{ReelError, ReelResult},
    render::display_list::DisplayList,
};

/// Per-segment parameter: either one value for every segment or one value per segment.
///
/// Deserializes from either a bare value or a list.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PerSegment<T> {
    /// Broadcast to every segment.
    Uniform(T),
    /// Exactly one entry per segment.
    Each(Vec<T>),
}

impl<T: Clone> PerSegment<T> {
    fn expand(self, segments: usize) -> Vec<T> {
        match self {
            Self::Uniform(v) => vec![v; segments],
            Self::Each(v) => v,
        }
    }
}

impl From<f64> for PerSegment<f64> {
    fn from(v: f64) -> Self {
        Self::Uniform(v)
    }
}

impl From<Ease> for PerSegment<Ease> {
    fn from(v: Ease) -> Self {
        Self::Uniform(v)
    }
}

impl<T> From<Vec<T>> for PerSegment<T> {
    fn from(v: Vec<T>) -> Self {
        Self::Each(v)
    }
}

impl<T, const N: usize> From<[T; N]> for PerSegment<T> {
    fn from(v: [T; N]) -> Self {
        Self::Each(v.into())
    }
}

/// Drawable that interpolates through a sequence of keyframe states.
///
/// Segment `i` runs from `states[i]` to `states[i + 1]` over `durations[i]` seconds using
/// `eases[i]`. Segments are right-exclusive: a query landing exactly on a boundary belongs to
/// the next segment. Before `start_time` the first state is shown, from
/// [`Animated::total_duration`] on the last one.
///
/// [`Drawable`] reads (`bounds`, `children`, `draw`) resolve the state at the current time set
/// through [`Drawable::set_time`]; [`Animated::evaluate`] is the pure equivalent.
#[derive(Debug)]
pub struct Animated<S> {
    states: Vec<S>,
    durations: Vec<f64>,
    eases: Vec<Ease>,
    start_time: f64,
    total_duration: f64,
    time: TimeCursor,
}

impl<S> Animated<S>
where
    S: Tween + Clone,
{
    /// Build a keyframe sequence starting at time zero.
    ///
    /// Scalar `durations`/`eases` are broadcast to every segment before the counts are checked.
    pub fn new(
        states: Vec<S>,
        durations: impl Into<PerSegment<f64>>,
        eases: impl Into<PerSegment<Ease>>,
    ) -> ReelResult<Self> {
        let segments = states.len().saturating_sub(1);
        let durations = durations.into().expand(segments);
        let eases = eases.into().expand(segments);

        if states.len() < 2 {
            return Err(ReelError::animation(
                "keyframe sequence needs at least two states",
            ));
        }
        if durations.len() != segments {
            return Err(ReelError::animation(format!(
                "every pair of states needs a duration: {} states, {} durations",
                states.len(),
                durations.len()
            )));
        }
        if eases.len() != segments {
            return Err(ReelError::animation(format!(
                "every pair of states needs an ease: {} states, {} eases",
                states.len(),
                eases.len()
            )));
        }
        if let Some(bad) = durations.iter().find(|d| !d.is_finite() || **d < 0.0) {
            return Err(ReelError::animation(format!(
                "segment durations must be finite and >= 0, got {bad}"
            )));
        }

        let span: f64 = durations.iter().sum();
        Ok(Self {
            states,
            durations,
            eases,
            start_time: 0.0,
            total_duration: span,
            time: TimeCursor::default(),
        })
    }

    /// Delay the whole sequence by `start_time` seconds.
    pub fn starting_at(mut self, start_time: f64) -> ReelResult<Self> {
        if !start_time.is_finite() {
            return Err(ReelError::animation(format!(
                "start time must be finite, got {start_time}"
            )));
        }
        let span: f64 = self.durations.iter().sum();
        self.start_time = start_time;
        self.total_duration = span + start_time;
        Ok(self)
    }

    /// Resolve the state at `t` seconds.
    pub fn evaluate(&self, t: f64) -> S {
        let local = t - self.start_time;
        if local < 0.0 {
            return self.states[0].clone();
        }
        if local >= self.total_duration - self.start_time {
            return self.last_state().clone();
        }

        let mut elapsed = 0.0;
        for (i, &duration) in self.durations.iter().enumerate() {
            if elapsed + duration > local {
                let progress = (local - elapsed) / duration;
                return tween(&self.states[i], &self.states[i + 1], progress, self.eases[i]);
            }
            elapsed += duration;
        }
        // Rounding between `total_duration - start_time` and the running sum.
        self.last_state().clone()
    }

    /// Resolve the state at `t`, or at the end of the sequence when `t` is `None`.
    pub fn frozen(&self, t: Option<f64>) -> S {
        self.evaluate(t.unwrap_or(self.total_duration))
    }

    /// `sum(durations) + start_time`.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Offset before the first segment starts.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Keyframe states in order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Per-segment durations in seconds.
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Per-segment easing.
    pub fn eases(&self) -> &[Ease] {
        &self.eases
    }

    /// Time last set through [`Drawable::set_time`].
    pub fn current_time(&self) -> f64 {
        self.time.get()
    }

    fn last_state(&self) -> &S {
        &self.states[self.states.len() - 1]
    }
}

impl<S> Animated<S>
where
    S: Drawable + Tween + Clone + 'static,
{
    /// Finish into a shared handle.
    pub fn into_ref(self) -> DrawableRef {
        Arc::new(self)
    }

    fn current(&self) -> S {
        self.evaluate(self.time.get())
    }
}

impl<S> Drawable for Animated<S>
where
    S: Drawable + Tween + Clone + 'static,
{
    fn bounds(&self) -> Rect {
        self.current().bounds()
    }

    fn children(&self) -> Vec<DrawableRef> {
        self.current().children()
    }

    fn draw(&self, list: &mut DisplayList) {
        self.current().draw(list);
    }

    fn set_time(&self, t: f64) {
        self.time.set(t);
        for child in self.current().children() {
            child.set_time(t);
        }
    }

    fn total_duration(&self) -> Option<f64> {
        Some(self.total_duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
