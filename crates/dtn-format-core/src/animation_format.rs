//! Animation codec: host [`Animation`] <-> DTN animation JSON.
//!
//! Export notes:
//! - `length` and keyframe timestamps are rounded to 4 decimals, components
//!   to 2 decimals after epsilon-sanitizing, so `-0` and near-zero noise
//!   never reach the wire.
//! - Channels with zero keyframes are skipped entirely.
//! - Keyframes are sorted ascending by time; the in-memory container gives
//!   no ordering guarantee.
//! - A keyframe whose three rounded components are all zero omits `value`;
//!   the decoder restores `[0, 0, 0]`.

use serde::{Deserialize, Serialize};

use crate::animation::{Animation, BoneAnimator, ChannelKind, Interpolation, Keyframe, LoopMode};
use crate::error::FormatError;
use crate::float::{round_to, sanitize_zero};
use crate::scene::Project;
use crate::FORMAT_VERSION;

/// Serialize one animation to a DTN animation document.
pub fn export_animation(animation: &Animation) -> AnimationDocument {
    let mut channels = Vec::new();
    for animator in &animation.animators {
        for kind in ChannelKind::ALL {
            let keyframes = animator.channel(kind);
            if keyframes.is_empty() {
                continue;
            }
            channels.push(export_channel(animator, kind, keyframes));
        }
    }
    AnimationDocument {
        dtn_format_version: FORMAT_VERSION,
        length: round_to(animation.length, 4),
        r#loop: (animation.loop_mode == LoopMode::Loop).then_some(true),
        channels,
    }
}

fn export_channel(animator: &BoneAnimator, kind: ChannelKind, keyframes: &[Keyframe]) -> ChannelData {
    let mut sorted: Vec<&Keyframe> = keyframes.iter().collect();
    sorted.sort_by(|a, b| a.time.total_cmp(&b.time));

    let keyframes = sorted
        .into_iter()
        .map(|kf| {
            let value = [
                round_to(sanitize_zero(kf.x), 2),
                round_to(sanitize_zero(kf.y), 2),
                round_to(sanitize_zero(kf.z), 2),
            ];
            KeyframeData {
                at: round_to(kf.time, 4),
                interp: kf.interpolation,
                value: value.iter().any(|&c| c != 0.0).then_some(value),
            }
        })
        .collect();

    ChannelData {
        part: animator.part.clone(),
        kind: kind.as_str().to_string(),
        keyframes,
    }
}

/// One file handed over by the host's open dialog: display name plus raw
/// text content.
#[derive(Clone, Debug)]
pub struct ImportFile {
    pub name: String,
    pub content: String,
}

/// Outcome of a batch import, tracked per file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// User-facing summary line, formatted at the boundary rather than
    /// inside the per-file logic.
    pub fn summary(&self) -> String {
        if self.total() == 1 {
            let (verdict, name) = match self.succeeded.first() {
                Some(name) => ("successful", name),
                None => ("failed", &self.failed[0]),
            };
            format!("Import {verdict}: {name}")
        } else if self.failed.is_empty() {
            format!("Loaded {} files.", self.succeeded.len())
        } else {
            format!("Failed to load {}/{} files", self.failed.len(), self.total())
        }
    }
}

/// Import a batch of animation documents, strictly sequentially. A file's
/// failure never aborts its siblings; per-file errors become entries in the
/// returned [`BatchReport`].
pub fn import_animations(project: &mut Project, files: &[ImportFile]) -> BatchReport {
    let mut report = BatchReport::default();
    for file in files {
        match import_animation(project, &file.name, &file.content) {
            Ok(_) => report.succeeded.push(file.name.clone()),
            Err(err) => {
                log::warn!("failed to import DTN animation {}: {err}", file.name);
                report.failed.push(file.name.clone());
            }
        }
    }
    report
}

/// Import a single animation document and register it into the project as
/// the selected animation. Registration is atomic: on any error the project
/// is left untouched.
///
/// Channels whose `part` matches no group in the project, or whose `type` is
/// unknown, are skipped silently so documents can be retargeted across
/// slightly different skeletons.
pub fn import_animation(
    project: &mut Project,
    file_name: &str,
    content: &str,
) -> Result<String, FormatError> {
    let name = file_name
        .strip_suffix(".json")
        .unwrap_or(file_name)
        .to_string();
    if project.animation(&name).is_some() {
        return Err(FormatError::DuplicateName { name });
    }

    let doc: AnimationDocument =
        serde_json::from_str(content).map_err(|err| FormatError::MalformedDocument {
            file: file_name.to_string(),
            reason: err.to_string(),
        })?;

    let mut animation = Animation {
        name: name.clone(),
        length: doc.length,
        loop_mode: if doc.r#loop.unwrap_or(false) {
            LoopMode::Loop
        } else {
            LoopMode::Once
        },
        animators: Vec::new(),
    };

    for channel in &doc.channels {
        if !project.has_group(&channel.part) {
            log::debug!("skipping channel for unknown part '{}'", channel.part);
            continue;
        }
        let Some(kind) = ChannelKind::parse(&channel.kind) else {
            log::debug!(
                "skipping channel '{}' with unknown type '{}'",
                channel.part,
                channel.kind
            );
            continue;
        };
        let keyframes = channel
            .keyframes
            .iter()
            .map(|kf| {
                let [x, y, z] = kf.value.unwrap_or([0.0; 3]);
                Keyframe {
                    time: kf.at,
                    interpolation: kf.interp,
                    x,
                    y,
                    z,
                }
            })
            .collect();
        animation.animator_mut(&channel.part).set_channel(kind, keyframes);
    }

    let index = project.animations.len();
    project.animations.push(animation);
    project.selected_animation = Some(index);
    Ok(name)
}

/// Suggested save-dialog file name: dots become underscores and a leading
/// `animation_` prefix is dropped.
pub fn suggested_animation_file_name(animation: &Animation) -> String {
    format!(
        "{}.json",
        animation.name.replace('.', "_").replacen("animation_", "", 1)
    )
}

// ----- JSON schema (serde) -----

fn format_version() -> f32 {
    FORMAT_VERSION
}

/// Wire form of one animation clip.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimationDocument {
    /// Never validated on decode; bump only with a meaning change.
    #[serde(default = "format_version")]
    pub dtn_format_version: f32,
    pub length: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#loop: Option<bool>,
    pub channels: Vec<ChannelData>,
}

/// Wire form of one (part, type) channel.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChannelData {
    pub part: String,
    /// Kept as a plain string so unknown kinds skip instead of failing the
    /// whole document.
    #[serde(rename = "type")]
    pub kind: String,
    pub keyframes: Vec<KeyframeData>,
}

/// Wire form of one keyframe. `value: None` is the zero keyframe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyframeData {
    pub at: f32,
    #[serde(default)]
    pub interp: Interpolation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<[f32; 3]>,
}
