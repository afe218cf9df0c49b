use texbake_util::math::Vec4;

use crate::{InputKey, InputSocket, PrincipledInput, SocketValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

/// Shader node kinds the bake procedure has to understand.
///
/// Source nodes carry their output payload inline, the way an RGB node
/// stores its color on its output socket.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    PrincipledBsdf,
    MaterialOutput,
    /// Samples a project image by name in UV space.
    ImageTexture { image: String },
    Rgb { value: Vec4 },
    Value { value: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub inputs: Vec<InputSocket>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
        let inputs = match kind {
            NodeKind::PrincipledBsdf => PrincipledInput::ALL
                .into_iter()
                .map(|input| InputSocket {
                    key: InputKey::Principled(input),
                    value: input.default_value(),
                })
                .collect(),
            NodeKind::MaterialOutput => vec![InputSocket {
                key: InputKey::Surface,
                value: SocketValue::Color(Vec4::ZERO),
            }],
            _ => Vec::new(),
        };

        Self {
            id,
            name: name.into(),
            kind,
            inputs,
        }
    }

    #[inline]
    pub fn input(&self, key: InputKey) -> Option<&InputSocket> {
        self.inputs.iter().find(|socket| socket.key == key)
    }

    #[inline]
    pub fn input_mut(&mut self, key: InputKey) -> Option<&mut InputSocket> {
        self.inputs.iter_mut().find(|socket| socket.key == key)
    }
}
