use texbake_util::math::Vec4;

use crate::{InputKey, InputRef, Node, NodeId, NodeKind, OutputKey, OutputRef, SocketValue};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub from: OutputRef,
    pub to: InputRef,
}

/// A material node tree.
///
/// Equality compares nodes, sockets, and links, which is what the bake
/// procedure's restore guarantees are stated in terms of; the id counter
/// is deliberately left out, since a reverted scratch node still consumed
/// an id.
#[derive(Clone, Debug, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
    links: Vec<Link>,
    next_id: u32,
}

impl PartialEq for NodeTree {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.links == other.links
    }
}

impl NodeTree {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node::new(id, name, kind));
        id
    }

    #[inline]
    pub fn add_principled(&mut self) -> NodeId {
        self.add_node("Principled BSDF", NodeKind::PrincipledBsdf)
    }

    #[inline]
    pub fn add_material_output(&mut self) -> NodeId {
        self.add_node("Material Output", NodeKind::MaterialOutput)
    }

    #[inline]
    pub fn add_image_texture(&mut self, name: impl Into<String>, image: impl Into<String>) -> NodeId {
        let image = image.into();
        self.add_node(name, NodeKind::ImageTexture { image })
    }

    #[inline]
    pub fn add_rgb(&mut self, name: impl Into<String>, value: Vec4) -> NodeId {
        self.add_node(name, NodeKind::Rgb { value })
    }

    /// Removes a node along with every link touching it.
    pub fn remove_node(&mut self, id: NodeId) {
        self.nodes.retain(|node| node.id != id);
        self.links
            .retain(|link| link.from.node != id && link.to.node != id);
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    #[inline]
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    #[inline]
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn connect(&mut self, from: OutputRef, to: InputRef) {
        let link = Link { from, to };
        if !self.links.contains(&link) {
            self.links.push(link);
        }
    }

    /// Removes every link into the given input.
    pub fn disconnect_input(&mut self, to: InputRef) {
        self.links.retain(|link| link.to != to);
    }

    #[inline]
    pub fn links_into(&self, to: InputRef) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |link| link.to == to)
    }

    /// The upstream socket feeding an input, if it is linked.
    #[inline]
    pub fn input_source(&self, to: InputRef) -> Option<OutputRef> {
        self.links_into(to).next().map(|link| link.from)
    }

    /// First Principled BSDF node in the tree, matching how the host's
    /// node list is scanned.
    pub fn principled(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|node| node.kind == NodeKind::PrincipledBsdf)
            .map(|node| node.id)
    }

    pub fn input_value(&self, to: InputRef) -> Option<SocketValue> {
        self.node(to.node)?.input(to.key).map(|socket| socket.value)
    }

    pub fn set_input_value(&mut self, to: InputRef, value: SocketValue) {
        if let Some(node) = self.node_mut(to.node) {
            if let Some(socket) = node.input_mut(to.key) {
                socket.value = value;
            }
        }
    }

    /// A minimal surface graph: Principled BSDF wired into the output.
    pub fn standard_surface() -> Self {
        let mut tree = Self::new();
        let principled = tree.add_principled();
        let output = tree.add_material_output();
        tree.connect(
            OutputRef {
                node: principled,
                socket: OutputKey::Bsdf,
            },
            InputRef {
                node: output,
                key: InputKey::Surface,
            },
        );
        tree
    }
}
