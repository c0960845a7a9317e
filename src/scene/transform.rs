use glam::{Mat4, Quat, Vec3};

/// Local transform of a node.
///
/// Holds the animatable TRS fields plus the node's baked `matrix`. glTF sets
/// either the matrix or the TRS fields; whichever is absent stays at its
/// identity default, so both can be composed unconditionally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub matrix: Mat4,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
        matrix: Mat4::IDENTITY,
    };

    #[must_use]
    pub fn from_trs(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
            matrix: Mat4::IDENTITY,
        }
    }

    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self {
            matrix,
            ..Self::IDENTITY
        }
    }

    /// Local matrix `T * R * S * M`.
    ///
    /// The baked matrix is applied to points first, then scale, rotation and
    /// translation. The order is fixed and does not depend on which fields the
    /// asset supplied.
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_scale(self.scale)
            * self.matrix
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<gltf::scene::Transform> for Transform {
    fn from(transform: gltf::scene::Transform) -> Self {
        match transform {
            gltf::scene::Transform::Matrix { matrix } => {
                Self::from_matrix(Mat4::from_cols_array_2d(&matrix))
            }
            gltf::scene::Transform::Decomposed {
                translation,
                rotation,
                scale,
            } => Self::from_trs(
                Vec3::from_array(translation),
                Quat::from_array(rotation),
                Vec3::from_array(scale),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn scale_applies_before_rotation_and_translation() {
        let t = Transform::from_trs(
            Vec3::new(10.0, 0.0, 0.0),
            Quat::from_rotation_z(FRAC_PI_2),
            Vec3::splat(2.0),
        );
        let p = t.local_matrix().transform_point3(Vec3::X);
        // scale → (2,0,0), rotate → (0,2,0), translate → (10,2,0)
        assert!(p.abs_diff_eq(Vec3::new(10.0, 2.0, 0.0), 1e-5), "{p:?}");
    }

    #[test]
    fn baked_matrix_applies_first() {
        let mut t = Transform::from_matrix(Mat4::from_translation(Vec3::X));
        t.scale = Vec3::splat(3.0);
        let p = t.local_matrix().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-5), "{p:?}");
    }
}
