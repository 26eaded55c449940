//! Host-side scene graph: the project outliner of groups and cubes.
//!
//! The original tooling dispatched on runtime types; here [`SceneNode`] is a
//! closed tagged variant so traversal matches exhaustively.

use serde::{Deserialize, Serialize};

use crate::animation::Animation;

fn default_true() -> bool {
    true
}

/// A node in the outliner tree.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SceneNode {
    Group(Group),
    Cube(Cube),
}

impl SceneNode {
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            SceneNode::Group(g) => Some(g),
            SceneNode::Cube(_) => None,
        }
    }
}

/// A bone/folder node. `origin` is the pivot point; `rotation` is degrees
/// per axis.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub origin: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Cleared to prune this node and its whole subtree from exports.
    #[serde(default = "default_true")]
    pub export: bool,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group {
            name: name.into(),
            origin: [0.0; 3],
            rotation: [0.0; 3],
            export: true,
            children: Vec::new(),
        }
    }
}

/// A box element. `origin` is its rotation pivot; `from`/`to` are the
/// opposing corners (`to - from` must be non-negative per axis, checked at
/// export).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cube {
    pub name: String,
    #[serde(default)]
    pub origin: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    pub from: [f32; 3],
    pub to: [f32; 3],
    #[serde(default)]
    pub uv_offset: [f32; 2],
    #[serde(default)]
    pub mirror_uv: bool,
    #[serde(default)]
    pub inflate: f32,
    #[serde(default = "default_true")]
    pub export: bool,
}

impl Cube {
    /// Extent per axis, possibly negative when the corners are inverted.
    pub fn size(&self) -> [f32; 3] {
        [
            self.to[0] - self.from[0],
            self.to[1] - self.from[1],
            self.to[2] - self.from[2],
        ]
    }
}

/// The live project: outliner tree, texture dimensions, and registered
/// animations. Imports mutate it by appending fully-constructed artifacts.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    pub texture_width: u32,
    pub texture_height: u32,
    #[serde(default)]
    pub outliner: Vec<SceneNode>,
    #[serde(default)]
    pub animations: Vec<Animation>,
    /// Index into `animations` of the active clip, if any.
    #[serde(default)]
    pub selected_animation: Option<usize>,
}

impl Project {
    /// True when any group in the tree carries this name.
    pub fn has_group(&self, name: &str) -> bool {
        fn walk(nodes: &[SceneNode], name: &str) -> bool {
            nodes.iter().any(|n| match n {
                SceneNode::Group(g) => g.name == name || walk(&g.children, name),
                SceneNode::Cube(_) => false,
            })
        }
        walk(&self.outliner, name)
    }

    /// Every group name in the tree, depth-first. Used to disambiguate
    /// generated synthetic part names.
    pub fn group_names(&self) -> Vec<String> {
        fn walk(nodes: &[SceneNode], out: &mut Vec<String>) {
            for n in nodes {
                if let SceneNode::Group(g) = n {
                    out.push(g.name.clone());
                    walk(&g.children, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.outliner, &mut out);
        out
    }

    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }
}
