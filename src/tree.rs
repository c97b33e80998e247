//! Procedural generation of the search tree.
//!
//! The tree is stored in an arena: nodes live in a flat `Vec` and refer to
//! each other through [`NodeId`] indices. Parent links are plain back
//! indices, so the parent/child cycle needs no reference counting.

use rand::Rng;

use crate::{
    types::{NodeId, constants},
    utils::gaussian,
};

/// One node of the search tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    value: f64,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl TreeNode {
    /// Ground-truth quality of this node.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Parent node, absent only at the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Left child, absent at the generation frontier.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child, absent at the generation frontier.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Whether this node sits on the generation frontier.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A perfect binary tree of ground-truth node values.
///
/// Structure is deterministic (every node above the target depth has exactly
/// two children), values are stochastic: each child's value is a Gaussian
/// perturbation of its parent's with standard deviation
/// [`constants::VALUE_SPREAD`]. Generation is reproducible given a seeded
/// RNG handle.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTree {
    nodes: Vec<TreeNode>,
    depth: usize,
}

impl SearchTree {
    /// Generate a perfect binary tree with `depth` levels below the root.
    ///
    /// `depth = 0` yields a single root node. The RNG is an injected
    /// capability so parallel sessions can draw from independent streams.
    pub fn generate<R: Rng + ?Sized>(depth: usize, root_value: f64, rng: &mut R) -> Self {
        let mut nodes = Vec::with_capacity((1usize << (depth + 1)) - 1);
        nodes.push(TreeNode {
            value: root_value,
            parent: None,
            left: None,
            right: None,
        });

        // Expand breadth-first: `frontier` holds the nodes of the level
        // currently being given children.
        let mut frontier = vec![NodeId(0)];
        for _ in 0..depth {
            let mut next_frontier = Vec::with_capacity(frontier.len() * 2);
            for parent_id in frontier {
                let parent_value = nodes[parent_id.0].value;

                let left_id = NodeId(nodes.len());
                nodes.push(TreeNode {
                    value: gaussian(rng, parent_value, constants::VALUE_SPREAD),
                    parent: Some(parent_id),
                    left: None,
                    right: None,
                });

                let right_id = NodeId(nodes.len());
                nodes.push(TreeNode {
                    value: gaussian(rng, parent_value, constants::VALUE_SPREAD),
                    parent: Some(parent_id),
                    left: None,
                    right: None,
                });

                nodes[parent_id.0].left = Some(left_id);
                nodes[parent_id.0].right = Some(right_id);
                next_frontier.push(left_id);
                next_frontier.push(right_id);
            }
            frontier = next_frontier;
        }

        Self { nodes, depth }
    }

    /// Root node id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Look up a node by id.
    ///
    /// Ids are only ever produced by this tree, so the lookup is total.
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.0]
    }

    /// Number of levels below the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total node count (`2^(depth+1) - 1`).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always contains at least the root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all node ids in arena order (root first).
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Distance of a node from the root, following parent links.
    pub fn node_depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            current = parent;
            depth += 1;
        }
        depth
    }

    /// Id of the node with the highest ground-truth value.
    pub fn best_node(&self) -> NodeId {
        self.node_ids()
            .max_by(|a, b| {
                self.nodes[a.0]
                    .value
                    .partial_cmp(&self.nodes[b.0].value)
                    .expect("node values are finite")
            })
            .unwrap_or(NodeId::ROOT)
    }

    /// Render the tree as an indented listing of ground-truth values.
    pub fn format(&self) -> String {
        let mut out = String::new();
        self.format_node(self.root(), "", "", &mut out);
        out
    }

    fn format_node(&self, id: NodeId, prefix: &str, child_prefix: &str, out: &mut String) {
        let node = &self.nodes[id.0];
        out.push_str(prefix);
        out.push_str(&format!("{:.2}\n", node.value));

        if let (Some(left), Some(right)) = (node.left, node.right) {
            self.format_node(
                left,
                &format!("{child_prefix}├── "),
                &format!("{child_prefix}│   "),
                out,
            );
            self.format_node(
                right,
                &format!("{child_prefix}└── "),
                &format!("{child_prefix}    "),
                out,
            );
        }
    }
}
