use crate::{NodeId, NodeTree};

/// A material wrapping one node tree.
///
/// `library` is `Some` while the material is linked from an external
/// library file and therefore must not be edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub use_nodes: bool,
    pub library: Option<String>,
    pub tree: NodeTree,
}

impl Material {
    /// A local node material with the standard Principled surface.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_nodes: true,
            library: None,
            tree: NodeTree::standard_surface(),
        }
    }

    pub fn linked(name: impl Into<String>, library: impl Into<String>) -> Self {
        Self {
            library: Some(library.into()),
            ..Self::new(name)
        }
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.library.is_some()
    }

    /// Whether the bake procedure can read and patch this material's graph.
    #[inline]
    pub fn has_node_tree(&self) -> bool {
        self.use_nodes
    }

    #[inline]
    pub fn principled(&self) -> Option<NodeId> {
        if self.use_nodes {
            self.tree.principled()
        } else {
            None
        }
    }
}
