use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{mul_div255_u16, unpremul_rgba8};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Position of a frame in output order, starting at 0.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames `start..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex,
}

impl FrameRange {
    /// Fails when `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReelResult<Self> {
        if start > end {
            return Err(ReelError::validation(format!(
                "frame range {}..{} runs backwards",
                start.0, end.0
            )));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0 - self.start.0
    }

    pub fn frames(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Rational frame rate: `num` frames every `den` seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32,
}

impl Fps {
    /// Both parts must be non-zero.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if num == 0 || den == 0 {
            return Err(ReelError::validation(format!(
                "frame rate {num}/{den} needs a non-zero numerator and denominator"
            )));
        }
        Ok(Self { num, den })
    }

    /// `num` frames per second.
    pub fn whole(num: u32) -> ReelResult<Self> {
        Self::new(num, 1)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Sample time of `frame` in seconds: `k * den / num`.
    ///
    /// Dividing last keeps `k / fps` exact for whole rates.
    pub fn frame_time_secs(self, frame: FrameIndex) -> f64 {
        (frame.0 as f64 * f64::from(self.den)) / f64::from(self.num)
    }

    /// Whole frames that fit in `secs`; negative input gives 0.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        ((secs * f64::from(self.num)) / f64::from(self.den))
            .floor()
            .max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// RGBA8 color with the color channels already scaled by alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque color from straight RGB.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Premultiply a straight-alpha color, rounding to nearest.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let premul = |c: u8| mul_div255_u16(u16::from(c), u16::from(a)) as u8;
        Self {
            r: premul(r),
            g: premul(g),
            b: premul(b),
            a,
        }
    }

    pub fn to_straight_rgba(self) -> [u8; 4] {
        unpremul_rgba8([self.r, self.g, self.b, self.a])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
