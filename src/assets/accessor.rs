//! Typed, strided accessor decoding
//!
//! A glTF accessor stores `count` elements of `lanes` numeric components, each
//! component in one of several binary encodings. Instead of one code path per
//! (component type, cardinality) pair, decoding is driven by a small table:
//! every [`ComponentType`] maps to a [`LaneCodec`] that reads one lane as `f32`
//! or as `u32`, and the cardinality only decides how many lanes are read.
//!
//! Values are never normalized: an `U8` lane of `255` decodes to `255.0`.

use glam::{Mat4, Vec4};

use crate::errors::{ArmatureError, Result};

/// Binary encoding of a single accessor component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl ComponentType {
    /// Size in bytes of one component.
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        CODECS[self as usize].size
    }
}

impl From<gltf::accessor::DataType> for ComponentType {
    fn from(data_type: gltf::accessor::DataType) -> Self {
        use gltf::accessor::DataType;
        match data_type {
            DataType::I8 => Self::I8,
            DataType::U8 => Self::U8,
            DataType::I16 => Self::I16,
            DataType::U16 => Self::U16,
            DataType::U32 => Self::U32,
            DataType::F32 => Self::F32,
        }
    }
}

/// Number of components per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
}

impl Cardinality {
    #[inline]
    #[must_use]
    pub const fn lanes(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat4 => 16,
        }
    }

    /// `Mat2`/`Mat3` carry column padding for small component types and are
    /// not used by any attribute this crate consumes.
    #[must_use]
    pub fn from_dimensions(dimensions: gltf::accessor::Dimensions) -> Option<Self> {
        use gltf::accessor::Dimensions;
        match dimensions {
            Dimensions::Scalar => Some(Self::Scalar),
            Dimensions::Vec2 => Some(Self::Vec2),
            Dimensions::Vec3 => Some(Self::Vec3),
            Dimensions::Vec4 => Some(Self::Vec4),
            Dimensions::Mat4 => Some(Self::Mat4),
            Dimensions::Mat2 | Dimensions::Mat3 => None,
        }
    }
}

/// Lane readers for one component type.
///
/// `unsigned` reinterprets the stored bits at the component's own width, so a
/// signed byte holding `-1` reads as `255`. Joint indices go through this path.
struct LaneCodec {
    size: usize,
    float: fn(&[u8]) -> f32,
    unsigned: fn(&[u8]) -> u32,
}

#[inline]
fn le<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0; N];
    out.copy_from_slice(&bytes[..N]);
    out
}

// Indexed by `ComponentType as usize`.
const CODECS: [LaneCodec; 8] = [
    // I8
    LaneCodec {
        size: 1,
        float: |b| f32::from(i8::from_le_bytes([b[0]])),
        unsigned: |b| u32::from(b[0]),
    },
    // U8
    LaneCodec {
        size: 1,
        float: |b| f32::from(b[0]),
        unsigned: |b| u32::from(b[0]),
    },
    // I16
    LaneCodec {
        size: 2,
        float: |b| f32::from(i16::from_le_bytes(le(b))),
        unsigned: |b| u32::from(u16::from_le_bytes(le(b))),
    },
    // U16
    LaneCodec {
        size: 2,
        float: |b| f32::from(u16::from_le_bytes(le(b))),
        unsigned: |b| u32::from(u16::from_le_bytes(le(b))),
    },
    // I32
    LaneCodec {
        size: 4,
        float: |b| i32::from_le_bytes(le(b)) as f32,
        unsigned: |b| u32::from_le_bytes(le(b)),
    },
    // U32
    LaneCodec {
        size: 4,
        float: |b| u32::from_le_bytes(le(b)) as f32,
        unsigned: |b| u32::from_le_bytes(le(b)),
    },
    // F32
    LaneCodec {
        size: 4,
        float: |b| f32::from_le_bytes(le(b)),
        unsigned: |b| f32::from_le_bytes(le(b)) as u32,
    },
    // F64
    LaneCodec {
        size: 8,
        float: |b| f64::from_le_bytes(le(b)) as f32,
        unsigned: |b| f64::from_le_bytes(le(b)) as u32,
    },
];

/// Read-only view of one accessor's elements inside a raw buffer.
///
/// A view with no backing bytes (an accessor without a buffer view) reads as
/// all zeros, matching glTF semantics.
#[derive(Debug, Clone, Copy)]
pub struct AccessorView<'a> {
    bytes: &'a [u8],
    component_type: ComponentType,
    cardinality: Cardinality,
    count: usize,
    stride: usize,
}

impl<'a> AccessorView<'a> {
    /// Creates a view over `bytes`, which must start at the first element.
    ///
    /// `stride` defaults to the tightly packed element size.
    pub fn new(
        bytes: &'a [u8],
        component_type: ComponentType,
        cardinality: Cardinality,
        count: usize,
        stride: Option<usize>,
    ) -> Result<Self> {
        let element_size = component_type.size() * cardinality.lanes();
        let stride = stride.filter(|&s| s > 0).unwrap_or(element_size);

        if count > 0 {
            let required = (count - 1) * stride + element_size;
            if required > bytes.len() {
                return Err(ArmatureError::BufferOutOfRange {
                    context: format!(
                        "accessor needs {required} bytes, view holds {}",
                        bytes.len()
                    ),
                    index: count,
                });
            }
        }

        Ok(Self {
            bytes,
            component_type,
            cardinality,
            count,
            stride,
        })
    }

    /// A view of `count` zero elements.
    #[must_use]
    pub fn zeroed(component_type: ComponentType, cardinality: Cardinality, count: usize) -> Self {
        Self {
            bytes: &[],
            component_type,
            cardinality,
            count,
            stride: component_type.size() * cardinality.lanes(),
        }
    }

    /// Resolves a glTF accessor against decoded buffer bytes.
    ///
    /// Returns `Ok(None)` for matrix shapes other than `MAT4`. Sparse
    /// substitution is not applied.
    pub fn from_gltf(accessor: &gltf::Accessor<'_>, buffers: &'a [Vec<u8>]) -> Result<Option<Self>> {
        let Some(cardinality) = Cardinality::from_dimensions(accessor.dimensions()) else {
            log::warn!(
                "Accessor {} has unsupported shape {:?}",
                accessor.index(),
                accessor.dimensions()
            );
            return Ok(None);
        };
        let component_type = ComponentType::from(accessor.data_type());

        if accessor.sparse().is_some() {
            log::warn!("Accessor {} is sparse; sparse values are ignored", accessor.index());
        }

        let Some(view) = accessor.view() else {
            return Ok(Some(Self::zeroed(component_type, cardinality, accessor.count())));
        };

        let buffer = buffers
            .get(view.buffer().index())
            .ok_or_else(|| ArmatureError::BufferOutOfRange {
                context: "buffer view references a missing buffer".to_string(),
                index: view.buffer().index(),
            })?;

        let view_end = view.offset() + view.length();
        let start = view.offset() + accessor.offset();
        if view_end > buffer.len() || start > view_end {
            return Err(ArmatureError::BufferOutOfRange {
                context: format!("buffer view {} exceeds its buffer", view.index()),
                index: view.index(),
            });
        }

        Self::new(
            &buffer[start..view_end],
            component_type,
            cardinality,
            accessor.count(),
            view.stride(),
        )
        .map(Some)
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    #[inline]
    #[must_use]
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    #[inline]
    fn lane_bytes(&self, index: usize, lane: usize) -> Option<&'a [u8]> {
        if self.bytes.is_empty() {
            return None;
        }
        let size = self.component_type.size();
        let start = index * self.stride + lane * size;
        Some(&self.bytes[start..start + size])
    }

    /// Decodes element `index` as floats into `out`.
    ///
    /// Writes only the lanes the accessor actually carries (at most
    /// `out.len()`), leaving the rest of `out` untouched. Returns the number of
    /// lanes written. Out-of-range `index` writes nothing.
    pub fn read_f32(&self, index: usize, out: &mut [f32]) -> usize {
        if index >= self.count {
            return 0;
        }
        let codec = &CODECS[self.component_type as usize];
        let lanes = self.cardinality.lanes().min(out.len());
        for (lane, slot) in out.iter_mut().take(lanes).enumerate() {
            *slot = self.lane_bytes(index, lane).map_or(0.0, codec.float);
        }
        lanes
    }

    /// Decodes element `index` as unsigned integers into `out`.
    ///
    /// Same lane rules as [`Self::read_f32`].
    pub fn read_u32(&self, index: usize, out: &mut [u32]) -> usize {
        if index >= self.count {
            return 0;
        }
        let codec = &CODECS[self.component_type as usize];
        let lanes = self.cardinality.lanes().min(out.len());
        for (lane, slot) in out.iter_mut().take(lanes).enumerate() {
            *slot = self.lane_bytes(index, lane).map_or(0, codec.unsigned);
        }
        lanes
    }

    /// First lane of every element.
    #[must_use]
    pub fn to_scalars(&self) -> Vec<f32> {
        (0..self.count)
            .map(|i| {
                let mut lane = [0.0];
                self.read_f32(i, &mut lane);
                lane[0]
            })
            .collect()
    }

    /// Every element widened to four lanes, unused lanes zero.
    #[must_use]
    pub fn to_vec4_padded(&self) -> Vec<Vec4> {
        (0..self.count)
            .map(|i| {
                let mut lanes = [0.0; 4];
                self.read_f32(i, &mut lanes);
                Vec4::from_array(lanes)
            })
            .collect()
    }

    /// Every element as a column-major 4x4 matrix.
    #[must_use]
    pub fn to_mat4(&self) -> Vec<Mat4> {
        (0..self.count)
            .map(|i| {
                let mut cols = [0.0; 16];
                self.read_f32(i, &mut cols);
                Mat4::from_cols_array(&cols)
            })
            .collect()
    }

    /// Every element's first lane as an index.
    #[must_use]
    pub fn to_indices(&self) -> Vec<u32> {
        (0..self.count)
            .map(|i| {
                let mut lane = [0];
                self.read_u32(i, &mut lane);
                lane[0]
            })
            .collect()
    }
}
