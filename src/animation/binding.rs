use crate::scene::NodeIndex;

/// Node property driven by an animation channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
}

impl TargetPath {
    /// Maps a glTF channel property. Morph target weights are not animated.
    #[must_use]
    pub fn from_gltf(property: gltf::animation::Property) -> Option<Self> {
        match property {
            gltf::animation::Property::Translation => Some(Self::Translation),
            gltf::animation::Property::Rotation => Some(Self::Rotation),
            gltf::animation::Property::Scale => Some(Self::Scale),
            gltf::animation::Property::MorphTargetWeights => None,
        }
    }
}

/// Binds sampler `sampler` of the owning animation to one node property.
#[derive(Debug, Clone)]
pub struct AnimationChannel {
    pub target: TargetPath,
    pub sampler: usize,
    pub node: NodeIndex,
}
