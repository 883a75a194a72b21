// renderer/render_graph.rs
// Shading DAG for one entity or one full-screen pass.

use glam::Vec4;

use crate::renderer::backend::{TargetId, TextureId};
use crate::renderer::post_processing::{AmbientOcclusionDescription, ColourAdjustDescription};

/// Rec. 709 luma weights used by the bloom bright pass.
pub const LUMINANCE_WEIGHTS: Vec4 = Vec4::new(0.2126, 0.7152, 0.0722, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalOperator {
    Greater,
    Less,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Float(f32),
    Colour(Vec4),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node {
    /// Samples the colour attachment of a render target.
    Texture(TargetId),
    Value(Value),
    Arithmetic {
        lhs: NodeId,
        rhs: NodeId,
        op: ArithmeticOperator,
    },
    /// `if lhs <op> rhs { then } else { otherwise }`
    Conditional {
        lhs: NodeId,
        rhs: NodeId,
        then: NodeId,
        otherwise: NodeId,
        op: ConditionalOperator,
    },
    Blur {
        input: NodeId,
    },
}

impl Node {
    pub fn inputs(&self) -> Vec<NodeId> {
        match *self {
            Node::Texture(_) | Node::Value(_) => Vec::new(),
            Node::Arithmetic { lhs, rhs, .. } => vec![lhs, rhs],
            Node::Conditional {
                lhs,
                rhs,
                then,
                otherwise,
                ..
            } => vec![lhs, rhs, then, otherwise],
            Node::Blur { input } => vec![input],
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Node::Texture(_) | Node::Value(_) => 0,
            Node::Blur { .. } => 1,
            Node::Arithmetic { .. } => 2,
            Node::Conditional { .. } => 4,
        }
    }
}

/// Root of a render graph: decides what the material writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderNode {
    /// Regular lit surface; `colour_input` overrides the base colour.
    Standard { colour_input: Option<NodeId> },
    AmbientOcclusion {
        colour: NodeId,
        normal: NodeId,
        position: NodeId,
        description: AmbientOcclusionDescription,
    },
    ColourAdjust {
        input: NodeId,
        description: ColourAdjustDescription,
    },
    AntiAliasing {
        input: NodeId,
    },
    SkyBox {
        texture: TextureId,
    },
}

impl RenderNode {
    pub fn inputs(&self) -> Vec<NodeId> {
        match *self {
            RenderNode::Standard { colour_input } => colour_input.into_iter().collect(),
            RenderNode::AmbientOcclusion {
                colour,
                normal,
                position,
                ..
            } => vec![colour, normal, position],
            RenderNode::ColourAdjust { input, .. } | RenderNode::AntiAliasing { input } => {
                vec![input]
            }
            RenderNode::SkyBox { .. } => Vec::new(),
        }
    }
}

impl Default for RenderNode {
    fn default() -> Self {
        RenderNode::Standard { colour_input: None }
    }
}

/// Bottom-up node arena with a single render node root.
///
/// Nodes may only reference nodes created before them, so the graph is
/// acyclic by construction.
#[derive(Debug, Clone, Default)]
pub struct RenderGraph {
    nodes: Vec<Node>,
    render_node: RenderNode,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Panics if it references a node not in this graph.
    pub fn create(&mut self, node: Node) -> NodeId {
        self.assert_inputs(&node.inputs());
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn texture(&mut self, target: TargetId) -> NodeId {
        self.create(Node::Texture(target))
    }

    pub fn value(&mut self, value: Value) -> NodeId {
        self.create(Node::Value(value))
    }

    pub fn set_render_node(&mut self, render_node: RenderNode) {
        self.assert_inputs(&render_node.inputs());
        self.render_node = render_node;
    }

    /// Feeds `input` into a standard render node, replacing any other root.
    pub fn set_colour_input(&mut self, input: NodeId) {
        self.set_render_node(RenderNode::Standard {
            colour_input: Some(input),
        });
    }

    pub fn render_node(&self) -> &RenderNode {
        &self.render_node
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes reachable from the root, inputs before the nodes that use them.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::with_capacity(self.nodes.len());

        for root_input in self.render_node.inputs() {
            // Explicit stack of (node, inputs pushed?) to avoid recursion.
            let mut stack = vec![(root_input, false)];
            while let Some((id, expanded)) = stack.pop() {
                if visited[id.0] {
                    continue;
                }
                if expanded {
                    visited[id.0] = true;
                    order.push(id);
                    continue;
                }
                stack.push((id, true));
                for input in self.nodes[id.0].inputs().into_iter().rev() {
                    if !visited[input.0] {
                        stack.push((input, false));
                    }
                }
            }
        }

        order
    }

    /// Render targets sampled by this graph, in evaluation order.
    pub fn texture_inputs(&self) -> Vec<TargetId> {
        let mut targets = Vec::new();
        for id in self.post_order() {
            if let Node::Texture(target) = self.nodes[id.0] {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        targets
    }

    fn assert_inputs(&self, inputs: &[NodeId]) {
        for input in inputs {
            assert!(
                input.0 < self.nodes.len(),
                "render graph node {:?} does not exist (graph has {} nodes)",
                input,
                self.nodes.len()
            );
        }
    }
}
