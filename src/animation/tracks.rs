use glam::Vec4;

use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

impl From<gltf::animation::Interpolation> for InterpolationMode {
    fn from(interpolation: gltf::animation::Interpolation) -> Self {
        match interpolation {
            gltf::animation::Interpolation::Linear => Self::Linear,
            gltf::animation::Interpolation::Step => Self::Step,
            gltf::animation::Interpolation::CubicSpline => Self::CubicSpline,
        }
    }
}

/// Keyframe track: times plus one padded four-lane value per keyframe.
///
/// Scalar, vec2 and vec3 outputs are zero-padded to four lanes. For
/// `CubicSpline`, `outputs` holds `(in_tangent, value, out_tangent)` per
/// keyframe, so its length is `inputs.len() * 3`.
#[derive(Debug, Clone)]
pub struct AnimationSampler {
    pub interpolation: InterpolationMode,
    pub inputs: Vec<f32>,
    pub outputs: Vec<Vec4>,
}

impl AnimationSampler {
    #[must_use]
    pub fn new(inputs: Vec<f32>, outputs: Vec<Vec4>, interpolation: InterpolationMode) -> Self {
        Self {
            interpolation,
            inputs,
            outputs,
        }
    }

    /// `(min, max)` of the keyframe times, `None` for an empty track.
    #[must_use]
    pub fn time_range(&self) -> Option<(f32, f32)> {
        self.inputs.iter().fold(None, |range, &t| match range {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }

    /// First interval `i` with `inputs[i] <= time <= inputs[i + 1]`.
    ///
    /// Scans linearly from the first keyframe. `None` when `time` lies outside
    /// every interval (including single-keyframe tracks).
    #[must_use]
    pub fn find_interval(&self, time: f32) -> Option<usize> {
        self.inputs
            .windows(2)
            .position(|pair| time >= pair[0] && time <= pair[1])
    }

    fn value_at(&self, index: usize) -> Option<Vec4> {
        let slot = match self.interpolation {
            InterpolationMode::CubicSpline => index * 3 + 1,
            _ => index,
        };
        self.outputs.get(slot).copied()
    }

    /// Samples the track at `time`.
    ///
    /// Returns `None` when no interval contains `time` or the output array is
    /// too short for the interval; the caller keeps its previous value.
    #[must_use]
    pub fn sample<T: Interpolatable>(&self, time: f32) -> Option<T> {
        let i = self.find_interval(time)?;
        let t0 = self.inputs[i];
        let t1 = self.inputs[i + 1];
        let dt = t1 - t0;

        // Repeated keyframe times collapse to the left keyframe.
        let a = if dt > 0.0 { (time - t0) / dt } else { 0.0 };

        match self.interpolation {
            InterpolationMode::Step => {
                // Holds the left keyframe until the right one's time is reached.
                let key = if dt > 0.0 && time >= t1 { i + 1 } else { i };
                self.value_at(key).map(T::from_keyframe)
            }
            InterpolationMode::Linear => {
                let v0 = T::from_keyframe(self.value_at(i)?);
                let v1 = T::from_keyframe(self.value_at(i + 1)?);
                Some(T::interpolate_linear(v0, v1, a))
            }
            InterpolationMode::CubicSpline => {
                let prev = i * 3;
                let next = (i + 1) * 3;
                let key = |slot: usize| self.outputs.get(slot).copied().map(T::from_keyframe);

                let v0 = key(prev + 1)?;
                let out_tangent0 = key(prev + 2)?;
                let in_tangent1 = key(next)?;
                let v1 = key(next + 1)?;

                Some(T::interpolate_cubic(v0, out_tangent0, in_tangent1, v1, a, dt))
            }
        }
    }
}
