use texbake_util::smallvec::SmallVec;

use crate::{InputRef, NodeId, NodeTree, OutputKey, OutputRef, PrincipledInput, SocketValue};

/// Reversible rewire of a material's emission socket.
///
/// Metallic and opacity have no native bake pass, so their value is fed
/// through the emission output and captured with an emission bake. The
/// patch records the prior emission wiring and defaults on apply, and
/// `revert` puts back exactly that recorded state. Every applied patch
/// must be reverted before the bake run returns.
#[derive(Debug)]
pub struct EmissionRewire {
    principled: NodeId,
    prior_links: SmallVec<[OutputRef; 1]>,
    prior_color: SocketValue,
    prior_strength: SocketValue,
    scratch: Option<NodeId>,
}

impl EmissionRewire {
    /// Routes `source` into the emission color socket with strength 1.0.
    ///
    /// Returns `None` when the tree has no Principled BSDF node, in which
    /// case nothing was modified.
    pub fn apply(tree: &mut NodeTree, source: PrincipledInput) -> Option<Self> {
        let principled = tree.principled()?;

        let emission = InputRef::principled(principled, PrincipledInput::EmissionColor);
        let strength = InputRef::principled(principled, PrincipledInput::EmissionStrength);

        let prior_links = tree.links_into(emission).map(|link| link.from).collect();
        let prior_color = tree.input_value(emission)?;
        let prior_strength = tree.input_value(strength)?;

        tree.disconnect_input(emission);

        let source_input = InputRef::principled(principled, source);
        let scratch = match tree.input_source(source_input) {
            Some(from) => {
                tree.connect(from, emission);
                None
            }
            None => {
                // Unlinked source: splat the constant through a scratch
                // RGB node, removed again on revert.
                let value = tree.input_value(source_input)?.color();
                let rgb = tree.add_rgb("_bake_rewire", value);
                tree.connect(
                    OutputRef {
                        node: rgb,
                        socket: OutputKey::Color,
                    },
                    emission,
                );
                Some(rgb)
            }
        };

        tree.set_input_value(strength, SocketValue::Scalar(1.0));

        Some(Self {
            principled,
            prior_links,
            prior_color,
            prior_strength,
            scratch,
        })
    }

    /// Restores the emission wiring and defaults recorded by `apply`.
    pub fn revert(self, tree: &mut NodeTree) {
        let emission = InputRef::principled(self.principled, PrincipledInput::EmissionColor);
        let strength = InputRef::principled(self.principled, PrincipledInput::EmissionStrength);

        tree.disconnect_input(emission);

        if let Some(scratch) = self.scratch {
            tree.remove_node(scratch);
        }

        for from in self.prior_links {
            tree.connect(from, emission);
        }

        tree.set_input_value(emission, self.prior_color);
        tree.set_input_value(strength, self.prior_strength);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texbake_util::math::Vec4;

    #[test]
    fn rewire_constant_roundtrip() {
        let mut tree = NodeTree::standard_surface();
        let principled = tree.principled().unwrap();
        tree.set_input_value(
            InputRef::principled(principled, PrincipledInput::Metallic),
            SocketValue::Scalar(0.75),
        );

        let before = tree.clone();

        let patch = EmissionRewire::apply(&mut tree, PrincipledInput::Metallic).unwrap();
        assert_ne!(tree, before);

        let emission = InputRef::principled(principled, PrincipledInput::EmissionColor);
        let from = tree.input_source(emission).unwrap();
        match &tree.node(from.node).unwrap().kind {
            crate::NodeKind::Rgb { value } => {
                assert_eq!(*value, Vec4::new(0.75, 0.75, 0.75, 1.0));
            }
            kind => panic!("expected scratch rgb node, got {kind:?}"),
        }

        patch.revert(&mut tree);
        assert_eq!(tree, before);
    }

    #[test]
    fn rewire_linked_roundtrip() {
        let mut tree = NodeTree::standard_surface();
        let principled = tree.principled().unwrap();
        let texture = tree.add_image_texture("Metallic Texture", "metal_mask");
        tree.connect(
            OutputRef {
                node: texture,
                socket: OutputKey::Color,
            },
            InputRef::principled(principled, PrincipledInput::Metallic),
        );

        let before = tree.clone();

        let patch = EmissionRewire::apply(&mut tree, PrincipledInput::Metallic).unwrap();

        let emission = InputRef::principled(principled, PrincipledInput::EmissionColor);
        assert_eq!(
            tree.input_source(emission),
            Some(OutputRef {
                node: texture,
                socket: OutputKey::Color,
            })
        );

        patch.revert(&mut tree);
        assert_eq!(tree, before);
    }

    #[test]
    fn rewire_preserves_existing_emission_link() {
        let mut tree = NodeTree::standard_surface();
        let principled = tree.principled().unwrap();
        let glow = tree.add_image_texture("Glow", "glow_map");
        let emission = InputRef::principled(principled, PrincipledInput::EmissionColor);
        tree.connect(
            OutputRef {
                node: glow,
                socket: OutputKey::Color,
            },
            emission,
        );
        tree.set_input_value(
            InputRef::principled(principled, PrincipledInput::EmissionStrength),
            SocketValue::Scalar(3.0),
        );

        let before = tree.clone();

        let patch = EmissionRewire::apply(&mut tree, PrincipledInput::Alpha).unwrap();
        patch.revert(&mut tree);

        assert_eq!(tree, before);
    }
}
