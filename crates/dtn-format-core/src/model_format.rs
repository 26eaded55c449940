//! Model codec: host outliner tree -> DTN model JSON.
//!
//! The target format only supports rotation at part granularity, so a cube
//! with a nonzero rotation is hoisted into a synthetic wrapper part whose
//! pivot/rotation come from the cube. Synthetics are shared between sibling
//! cubes when their rotations match and their pivots are compatible, and are
//! flagged `bb_inline` so a future importer can flatten them back.
//!
//! The import direction is intentionally unimplemented: inverting the
//! synthetic-wrapper convention is an open design question.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::float::{fvec, is_zero_vec3};
use crate::scene::{Cube, Group, Project, SceneNode};
use crate::FORMAT_VERSION;

/// Serialize the project's outliner to a DTN model document.
///
/// The root set is the project's top-level groups, except when that set is
/// exactly one group literally named `"root"`: then that wrapper is
/// collapsed and its child groups become the roots (one level only, not
/// recursive).
pub fn export_model(project: &Project) -> Result<ModelDocument, FormatError> {
    let top_level: Vec<&Group> = project
        .outliner
        .iter()
        .filter_map(SceneNode::as_group)
        .collect();
    let roots: Vec<&Group> = if top_level.len() == 1 && top_level[0].name == "root" {
        top_level[0]
            .children
            .iter()
            .filter_map(SceneNode::as_group)
            .collect()
    } else {
        top_level
    };

    let mut names = NameRegistry::new(project);
    let mut parts = Vec::new();
    for group in roots {
        if group.export {
            parts.push(build_part(group, &mut names)?);
        }
    }

    Ok(ModelDocument {
        dtn_format_version: FORMAT_VERSION,
        texture_size: [project.texture_width, project.texture_height],
        parts,
    })
}

/// Model import: the wire schema is documented, the inversion of synthetic
/// wrappers back into rotated cubes is not. Always fails.
pub fn import_model(_project: &mut Project, _content: &str) -> Result<(), FormatError> {
    Err(FormatError::Unsupported {
        what: "DTN model import",
    })
}

/// Suggested save-dialog file name for the model document.
pub fn suggested_model_file_name(project: &Project) -> String {
    let name = if project.name.is_empty() {
        "model"
    } else {
        project.name.as_str()
    };
    format!("{name}.json")
}

fn build_part(group: &Group, names: &mut NameRegistry) -> Result<PartData, FormatError> {
    let mut cubes = Vec::new();
    let mut children = Vec::new();
    let mut synthetics: Vec<Synthetic> = Vec::new();

    for child in &group.children {
        match child {
            SceneNode::Cube(cube) if cube.export => {
                if is_zero_vec3(cube.rotation) {
                    cubes.push(build_cube(cube)?);
                } else {
                    let synth = find_or_create_synthetic(&mut synthetics, cube, names);
                    synth.cubes.push(build_cube(cube)?);
                }
            }
            SceneNode::Group(sub) if sub.export => {
                children.push(build_part(sub, names)?);
            }
            _ => {}
        }
    }

    children.extend(synthetics.into_iter().map(Synthetic::into_part));

    let rotation = fvec(group.rotation);
    Ok(PartData {
        id: group.name.clone(),
        pivot: fvec(group.origin),
        rotation: (!is_zero_vec3(rotation)).then_some(rotation),
        cubes: (!cubes.is_empty()).then_some(cubes),
        children: (!children.is_empty()).then_some(children),
        bb_inline: None,
    })
}

fn build_cube(cube: &Cube) -> Result<CubeData, FormatError> {
    if cube.size().iter().any(|&extent| extent < 0.0) {
        return Err(FormatError::NegativeSize {
            cube: cube.name.clone(),
        });
    }
    Ok(CubeData {
        uv: cube.uv_offset,
        from: fvec(cube.from),
        to: fvec(cube.to),
        mirror: cube.mirror_uv.then_some(true),
        inflate: (cube.inflate != 0.0).then_some(cube.inflate),
    })
}

/// Wrapper-in-progress for rotated cubes. Pivot/rotation stay untrimmed
/// while siblings are matched against them; `fvec` applies on conversion.
struct Synthetic {
    id: String,
    pivot: [f32; 3],
    rotation: [f32; 3],
    cubes: Vec<CubeData>,
}

impl Synthetic {
    fn into_part(self) -> PartData {
        PartData {
            id: self.id,
            pivot: fvec(self.pivot),
            // Nonzero by construction, so never elided.
            rotation: Some(fvec(self.rotation)),
            cubes: Some(self.cubes),
            children: None,
            bb_inline: Some(true),
        }
    }
}

fn find_or_create_synthetic<'a>(
    synthetics: &'a mut Vec<Synthetic>,
    cube: &Cube,
    names: &mut NameRegistry,
) -> &'a mut Synthetic {
    if let Some(i) = synthetics.iter().position(|s| accepts(s, cube)) {
        return &mut synthetics[i];
    }
    synthetics.push(Synthetic {
        id: names.claim(format!("{}_r1", cube.name)),
        pivot: cube.origin,
        rotation: cube.rotation,
        cubes: Vec::new(),
    });
    synthetics.last_mut().unwrap()
}

/// Can `cube` share this synthetic wrapper? Rotations must match exactly on
/// all axes. Pivots must match exactly too, except in the one-axis-rotation
/// case: points on the rotation axis do not move, so the pivot component
/// along that axis is unconstrained and only the zero-rotation axes must
/// agree.
fn accepts(synth: &Synthetic, cube: &Cube) -> bool {
    if synth.rotation != cube.rotation {
        return false;
    }
    let one_axis = synth.rotation.iter().filter(|&&r| r != 0.0).count() == 1;
    if !one_axis {
        return synth.pivot == cube.origin;
    }
    (0..3).all(|axis| synth.rotation[axis] != 0.0 || synth.pivot[axis] == cube.origin[axis])
}

/// Name pool for synthetic parts: every group name already in the project
/// plus every synthetic claimed during this export.
struct NameRegistry {
    taken: HashSet<String>,
}

impl NameRegistry {
    fn new(project: &Project) -> Self {
        NameRegistry {
            taken: project.group_names().into_iter().collect(),
        }
    }

    /// Claim `base`, incrementing its trailing counter until the name is
    /// free (`leg_r1` -> `leg_r2` -> ...).
    fn claim(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }
        let split = base.len() - base.chars().rev().take_while(char::is_ascii_digit).count();
        let (stem, digits) = base.split_at(split);
        let mut counter: u64 = digits.parse().unwrap_or(1);
        loop {
            counter += 1;
            let candidate = format!("{stem}{counter}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

// ----- JSON schema (serde) -----

fn format_version() -> f32 {
    FORMAT_VERSION
}

/// Wire form of the whole model.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ModelDocument {
    #[serde(default = "format_version")]
    pub dtn_format_version: f32,
    pub texture_size: [u32; 2],
    pub parts: Vec<PartData>,
}

/// Wire form of one part (group or synthetic wrapper).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PartData {
    pub id: String,
    pub pivot: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cubes: Option<Vec<CubeData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PartData>>,
    /// Present (and true) only on synthetic wrappers; a hint that an
    /// importer should inline the part back into its parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bb_inline: Option<bool>,
}

/// Wire form of one cube.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CubeData {
    pub uv: [f32; 2],
    pub from: [f32; 3],
    pub to: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflate: Option<f32>,
}
