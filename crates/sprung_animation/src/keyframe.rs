//! Sampled spring keyframes

use serde::Serialize;

/// A single sample of a spring curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpringKeyframe {
    /// Position in the animation (0.0 to 1.0)
    pub offset: f64,
    /// Interpolated value at this offset
    pub value: f64,
}

/// Ordered keyframes produced by [`SpringModel::generate_keyframes`]
///
/// Offsets are strictly increasing from 0.0 to 1.0.
///
/// [`SpringModel::generate_keyframes`]: crate::SpringModel::generate_keyframes
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpringKeyframes {
    frames: Vec<SpringKeyframe>,
}

impl SpringKeyframes {
    pub(crate) fn new(frames: Vec<SpringKeyframe>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn as_slice(&self) -> &[SpringKeyframe] {
        &self.frames
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SpringKeyframe> {
        self.frames.iter()
    }

    pub fn first(&self) -> Option<&SpringKeyframe> {
        self.frames.first()
    }

    pub fn last(&self) -> Option<&SpringKeyframe> {
        self.frames.last()
    }
}

impl<'a> IntoIterator for &'a SpringKeyframes {
    type Item = &'a SpringKeyframe;
    type IntoIter = std::slice::Iter<'a, SpringKeyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl IntoIterator for SpringKeyframes {
    type Item = SpringKeyframe;
    type IntoIter = std::vec::IntoIter<SpringKeyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}
