use texbake_util::math::{Vec3, Vec4};

use crate::NodeId;

/// Default value carried by an unlinked input socket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SocketValue {
    Scalar(f32),
    Color(Vec4),
    Vector(Vec3),
}

impl SocketValue {
    /// Collapses the value to a single channel, as a grayscale bake would.
    #[inline]
    pub fn scalar(&self) -> f32 {
        match *self {
            Self::Scalar(value) => value,
            Self::Color(color) => (color.x + color.y + color.z) / 3.0,
            Self::Vector(vector) => vector.x,
        }
    }

    /// Widens the value to an RGBA color, splatting scalars across RGB.
    #[inline]
    pub fn color(&self) -> Vec4 {
        match *self {
            Self::Scalar(value) => Vec4::new(value, value, value, 1.0),
            Self::Color(color) => color,
            Self::Vector(vector) => vector.extend(1.0),
        }
    }
}

/// Named inputs of the Principled BSDF node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrincipledInput {
    BaseColor,
    Metallic,
    Roughness,
    Normal,
    Alpha,
    EmissionColor,
    EmissionStrength,
}

impl PrincipledInput {
    pub const ALL: [Self; 7] = [
        Self::BaseColor,
        Self::Metallic,
        Self::Roughness,
        Self::Normal,
        Self::Alpha,
        Self::EmissionColor,
        Self::EmissionStrength,
    ];

    pub const fn socket_name(self) -> &'static str {
        match self {
            Self::BaseColor => "Base Color",
            Self::Metallic => "Metallic",
            Self::Roughness => "Roughness",
            Self::Normal => "Normal",
            Self::Alpha => "Alpha",
            Self::EmissionColor => "Emission Color",
            Self::EmissionStrength => "Emission Strength",
        }
    }

    pub fn default_value(self) -> SocketValue {
        match self {
            Self::BaseColor => SocketValue::Color(Vec4::new(0.8, 0.8, 0.8, 1.0)),
            Self::Metallic => SocketValue::Scalar(0.0),
            Self::Roughness => SocketValue::Scalar(0.5),
            Self::Normal => SocketValue::Vector(Vec3::ZERO),
            Self::Alpha => SocketValue::Scalar(1.0),
            Self::EmissionColor => SocketValue::Color(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            Self::EmissionStrength => SocketValue::Scalar(0.0),
        }
    }
}

/// Input socket key, closed over the node kinds the graph models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKey {
    Principled(PrincipledInput),
    Surface,
}

/// Output socket key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputKey {
    Bsdf,
    Color,
    Alpha,
    Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutputRef {
    pub node: NodeId,
    pub socket: OutputKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputRef {
    pub node: NodeId,
    pub key: InputKey,
}

impl InputRef {
    #[inline]
    pub const fn principled(node: NodeId, input: PrincipledInput) -> Self {
        Self {
            node,
            key: InputKey::Principled(input),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputSocket {
    pub key: InputKey,
    pub value: SocketValue,
}
