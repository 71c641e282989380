use std::fmt;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::errors::{FrameError, Result};

/// The closed set of value kinds the GPU submission sink can marshal.
///
/// Anything outside this set (booleans, integer vectors, textures, …) is
/// rejected when the value getter is constructed; a mismatch must surface at
/// setup time, not at GPU-submission time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Int,
    UInt,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl UniformKind {
    /// Every supported kind.
    pub const ALL: [Self; 9] = [
        Self::Int,
        Self::UInt,
        Self::Float,
        Self::Vec2,
        Self::Vec3,
        Self::Vec4,
        Self::Mat2,
        Self::Mat3,
        Self::Mat4,
    ];

    /// Maps a WGSL type name to a kind.
    ///
    /// Accepts both the long form (`vec3<f32>`) and the shorthand (`vec3f`),
    /// so a name lifted straight from shader reflection works.
    ///
    /// # Errors
    ///
    /// [`FrameError::UnsupportedUniformType`] for any other name.
    pub fn parse(wgsl_type: &str) -> Result<Self> {
        match wgsl_type {
            "i32" => Ok(Self::Int),
            "u32" => Ok(Self::UInt),
            "f32" => Ok(Self::Float),
            "vec2<f32>" | "vec2f" => Ok(Self::Vec2),
            "vec3<f32>" | "vec3f" => Ok(Self::Vec3),
            "vec4<f32>" | "vec4f" => Ok(Self::Vec4),
            "mat2x2<f32>" | "mat2x2f" => Ok(Self::Mat2),
            "mat3x3<f32>" | "mat3x3f" => Ok(Self::Mat3),
            "mat4x4<f32>" | "mat4x4f" => Ok(Self::Mat4),
            other => Err(FrameError::UnsupportedUniformType(other.to_string())),
        }
    }

    /// The canonical WGSL name of the kind.
    #[must_use]
    pub const fn wgsl_name(self) -> &'static str {
        match self {
            Self::Int => "i32",
            Self::UInt => "u32",
            Self::Float => "f32",
            Self::Vec2 => "vec2<f32>",
            Self::Vec3 => "vec3<f32>",
            Self::Vec4 => "vec4<f32>",
            Self::Mat2 => "mat2x2<f32>",
            Self::Mat3 => "mat3x3<f32>",
            Self::Mat4 => "mat4x4<f32>",
        }
    }

    /// Size in bytes of the kind's uniform-layout image
    /// (see [`UniformValue::write_gpu_bytes`]).
    #[must_use]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::Int | Self::UInt | Self::Float => 4,
            Self::Vec2 => 8,
            Self::Vec3 => 12,
            Self::Vec4 | Self::Mat2 => 16,
            Self::Mat3 => 48,
            Self::Mat4 => 64,
        }
    }
}

impl fmt::Display for UniformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wgsl_name())
    }
}

/// A uniform value in one of the allow-listed kinds.
///
/// Value equality (`PartialEq`) is what drives dirty tracking: two values
/// compare equal exactly when re-applying the second would be a redundant
/// GPU write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    UInt(u32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl UniformValue {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> UniformKind {
        match self {
            Self::Int(_) => UniformKind::Int,
            Self::UInt(_) => UniformKind::UInt,
            Self::Float(_) => UniformKind::Float,
            Self::Vec2(_) => UniformKind::Vec2,
            Self::Vec3(_) => UniformKind::Vec3,
            Self::Vec4(_) => UniformKind::Vec4,
            Self::Mat2(_) => UniformKind::Mat2,
            Self::Mat3(_) => UniformKind::Mat3,
            Self::Mat4(_) => UniformKind::Mat4,
        }
    }

    /// Appends the WGSL uniform-layout byte image of the value to `out`.
    ///
    /// `mat3x3<f32>` columns are padded to vec4 stride (the GPU ignores the
    /// fourth float of each column); every other kind is its plain byte
    /// representation.
    pub fn write_gpu_bytes(&self, out: &mut Vec<u8>) {
        match *self {
            Self::Int(v) => out.extend_from_slice(bytemuck::bytes_of(&v)),
            Self::UInt(v) => out.extend_from_slice(bytemuck::bytes_of(&v)),
            Self::Float(v) => out.extend_from_slice(bytemuck::bytes_of(&v)),
            Self::Vec2(v) => out.extend_from_slice(bytemuck::bytes_of(&v)),
            Self::Vec3(v) => out.extend_from_slice(bytemuck::bytes_of(&v)),
            Self::Vec4(v) => out.extend_from_slice(bytemuck::bytes_of(&v)),
            Self::Mat2(m) => out.extend_from_slice(bytemuck::bytes_of(&m)),
            Self::Mat3(m) => {
                for col in [m.x_axis, m.y_axis, m.z_axis] {
                    out.extend_from_slice(bytemuck::bytes_of(&col.extend(0.0)));
                }
            }
            Self::Mat4(m) => out.extend_from_slice(bytemuck::bytes_of(&m)),
        }
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for UniformValue {
    fn from(v: u32) -> Self {
        Self::UInt(v)
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        Self::Vec4(v)
    }
}

impl From<Mat2> for UniformValue {
    fn from(v: Mat2) -> Self {
        Self::Mat2(v)
    }
}

impl From<Mat3> for UniformValue {
    fn from(v: Mat3) -> Self {
        Self::Mat3(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}
