use crate::animation::clip::Animation;
use crate::errors::{ArmatureError, Result};
use crate::scene::SceneGraph;

/// Drives the single active animation of a model.
///
/// Holding no animation, or having no active selection, is a valid state in
/// which [`AnimationPlayer::update`] does nothing.
#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    animations: Vec<Animation>,
    active: Option<usize>,
    /// Multiplier applied to every delta passed to [`AnimationPlayer::update`].
    pub time_scale: f32,
}

impl AnimationPlayer {
    /// Creates a player with the first animation (if any) active.
    #[must_use]
    pub fn new(animations: Vec<Animation>) -> Self {
        let active = if animations.is_empty() { None } else { Some(0) };
        Self {
            animations,
            active,
            time_scale: 1.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    #[inline]
    pub fn animations_mut(&mut self) -> &mut [Animation] {
        &mut self.animations
    }

    pub fn animation_names(&self) -> impl Iterator<Item = &str> {
        self.animations.iter().map(|a| a.name.as_str())
    }

    #[inline]
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn active(&self) -> Option<&Animation> {
        self.active.and_then(|i| self.animations.get(i))
    }

    /// Selects the animation driven by `update`.
    pub fn set_active(&mut self, index: usize) -> Result<()> {
        if index >= self.animations.len() {
            return Err(ArmatureError::AnimationIndexOutOfBounds {
                index,
                count: self.animations.len(),
            });
        }
        self.active = Some(index);
        Ok(())
    }

    /// Stops driving any animation; node transforms keep their last values.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Advances the active animation by `dt * time_scale` seconds and writes
    /// its channels into `graph`.
    ///
    /// Returns `false` when there is nothing to play.
    pub fn update(&mut self, dt: f32, graph: &mut SceneGraph) -> bool {
        let Some(animation) = self.active.and_then(|i| self.animations.get_mut(i)) else {
            return false;
        };

        animation.advance_time(dt * self.time_scale);
        animation.apply(graph);
        true
    }
}
