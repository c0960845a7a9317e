use glam::{Quat, Vec3};

use crate::animation::binding::{AnimationChannel, TargetPath};
use crate::animation::tracks::AnimationSampler;
use crate::scene::SceneGraph;

/// One glTF animation: samplers, channels and a looping play-head.
#[derive(Debug, Clone)]
pub struct Animation {
    pub name: String,
    pub samplers: Vec<AnimationSampler>,
    pub channels: Vec<AnimationChannel>,

    start: f32,
    end: f32,
    current_time: f32,
}

impl Animation {
    /// Builds the animation and caches its `[start, end]` window as the min and
    /// max of every sampler's keyframe times. The play-head starts at `start`.
    #[must_use]
    pub fn new(name: String, samplers: Vec<AnimationSampler>, channels: Vec<AnimationChannel>) -> Self {
        let (start, end) = samplers
            .iter()
            .filter_map(AnimationSampler::time_range)
            .reduce(|(lo, hi), (s, e)| (lo.min(s), hi.max(e)))
            .unwrap_or((0.0, 0.0));

        Self {
            name,
            samplers,
            channels,
            start,
            end,
            current_time: start,
        }
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> f32 {
        self.end
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }

    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Moves the play-head to `time` without wrapping.
    pub fn seek(&mut self, time: f32) {
        self.current_time = time;
    }

    /// Advances the play-head by `dt` and wraps it back into the window.
    ///
    /// Wrapping subtracts the window length while the play-head is past `end`,
    /// so one large step can skip several loops. An empty window (`end <=
    /// start`) never wraps.
    #[allow(clippy::float_cmp)]
    pub fn advance_time(&mut self, dt: f32) {
        self.current_time += dt;

        let span = self.end - self.start;
        if span <= 0.0 {
            return;
        }

        while self.current_time > self.end {
            let wrapped = self.current_time - span;
            if wrapped == self.current_time {
                // Span is below the play-head's precision; subtraction stalls.
                self.current_time = self.start + (self.current_time - self.start).rem_euclid(span);
                break;
            }
            self.current_time = wrapped;
        }
    }

    /// Writes every channel's value at the current play-head into its node.
    ///
    /// Channels whose sampler has no interval containing the play-head, or
    /// whose node or sampler index is out of range, leave their node untouched.
    pub fn apply(&self, graph: &mut SceneGraph) {
        let time = self.current_time;

        for channel in &self.channels {
            let Some(sampler) = self.samplers.get(channel.sampler) else {
                continue;
            };
            let Some(node) = graph.get_mut(channel.node) else {
                continue;
            };

            match channel.target {
                TargetPath::Translation => {
                    if let Some(value) = sampler.sample::<Vec3>(time) {
                        node.transform.translation = value;
                    }
                }
                TargetPath::Rotation => {
                    if let Some(value) = sampler.sample::<Quat>(time) {
                        node.transform.rotation = value;
                    }
                }
                TargetPath::Scale => {
                    if let Some(value) = sampler.sample::<Vec3>(time) {
                        node.transform.scale = value;
                    }
                }
            }
        }
    }
}
