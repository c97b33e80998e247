//! Shared value types for the search environment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a node inside a [`SearchTree`] arena.
///
/// Node ids are only handed out by the tree that owns the node and stay
/// valid for that tree's lifetime (the arena never shrinks or reorders).
///
/// [`SearchTree`]: crate::tree::SearchTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Id of the root node in every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Get the raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete action alphabet of the search session.
///
/// The numeric ordering is part of the external contract: consumers drive
/// the environment with raw indices in `0..6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Jump back to the root node.
    Home,
    /// Move to the parent of the current node (no-op at the root).
    Parent,
    /// Move to the left child (no-op at a leaf).
    Left,
    /// Move to the right child (no-op at a leaf).
    Right,
    /// Stay put and examine the current node, sharpening its reading.
    Stay,
    /// End the search and collect the current node's true value.
    End,
}

impl Action {
    /// Number of discrete actions.
    pub const COUNT: usize = 6;

    /// All actions in contract order.
    pub const ALL: [Action; Action::COUNT] = [
        Action::Home,
        Action::Parent,
        Action::Left,
        Action::Right,
        Action::Stay,
        Action::End,
    ];

    /// Decode a raw action index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAction`] for indices outside `0..6`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treeseek::types::Action;
    ///
    /// assert_eq!(Action::from_index(4).unwrap(), Action::Stay);
    /// assert!(Action::from_index(6).is_err());
    /// ```
    pub fn from_index(index: usize) -> Result<Self, crate::Error> {
        Action::ALL
            .get(index)
            .copied()
            .ok_or(crate::Error::InvalidAction {
                action: index,
                max: Action::COUNT - 1,
            })
    }

    /// Get the contract index of this action.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Short lowercase name used in CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Home => "home",
            Action::Parent => "parent",
            Action::Left => "left",
            Action::Right => "right",
            Action::Stay => "stay",
            Action::End => "end",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fuzzy reading of the agent's immediate surroundings.
///
/// One reading is produced per step: the current node corrupted by noise
/// proportional to the knowledge timer, and both children corrupted by a
/// fixed sibling noise. Absent children are encoded with the out-of-band
/// sentinel [`Observation::NO_CHILD`]. The sentinel is approximate: node
/// values are Gaussian walks from 50 and are not expected to reach -1 in
/// practice, but nothing clamps them away from it.
///
/// Readings nominally live in [[`constants::OBS_LOW`], [`constants::OBS_HIGH`]];
/// the bounds are advisory and noise can exceed them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Noisy reading of the current node's value.
    pub current: f64,
    /// Noisy reading of the left child, or [`Observation::NO_CHILD`].
    pub left: f64,
    /// Noisy reading of the right child, or [`Observation::NO_CHILD`].
    pub right: f64,
}

impl Observation {
    /// Sentinel reading reported for a missing child.
    pub const NO_CHILD: f64 = -1.0;

    /// Dimensionality of the observation vector.
    pub const SIZE: usize = 3;

    /// The observation as a fixed-size vector in contract order.
    pub fn as_array(&self) -> [f64; Observation::SIZE] {
        [self.current, self.left, self.right]
    }

    /// Whether the left-child slot holds the missing-child sentinel.
    pub fn left_is_missing(&self) -> bool {
        self.left == Observation::NO_CHILD
    }

    /// Whether the right-child slot holds the missing-child sentinel.
    pub fn right_is_missing(&self) -> bool {
        self.right == Observation::NO_CHILD
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2}, {:.2})",
            self.current, self.left, self.right
        )
    }
}

/// Result of advancing the session by one action.
///
/// `truncated` is carried to match the declared interaction contract but is
/// always false: the step cap folds into `terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Fresh fuzzy observation after the transition.
    pub observation: Observation,
    /// Per-step penalty, plus the terminal node value on terminal steps.
    pub reward: f64,
    /// Whether the episode ended this step (explicit end or step cap).
    pub terminated: bool,
    /// Always false; kept for contract shape.
    pub truncated: bool,
}

/// Domain constants of the search environment.
pub mod constants {
    /// Ground-truth value assigned to every generated root.
    pub const ROOT_VALUE: f64 = 50.0;

    /// Standard deviation of the Gaussian walk from parent to child value.
    pub const VALUE_SPREAD: f64 = 10.0;

    /// Advisory lower observation bound (noise can exceed it).
    pub const OBS_LOW: f64 = 0.0;

    /// Advisory upper observation bound (noise can exceed it).
    pub const OBS_HIGH: f64 = 100.0;
}
