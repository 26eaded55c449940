//! Host-side animation data model.
//!
//! An [`Animation`] owns one [`BoneAnimator`] per animated part; each
//! animator holds independent keyframe lists for the three channel kinds.
//! Keyframe lists are unordered in memory — ordering is a wire concern and
//! handled at export time.

use serde::{Deserialize, Serialize};

/// Playback mode. `Loop` is the only mode that survives on the wire
/// (`loop: true`); absence means `Once`.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    #[default]
    Once,
    Loop,
}

/// Interpolation curve identifier, lowercase on the wire.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Linear,
    Catmullrom,
    Bezier,
    Step,
}

/// The three animatable channels of a part.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Position,
    Rotation,
    Scale,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [
        ChannelKind::Position,
        ChannelKind::Rotation,
        ChannelKind::Scale,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChannelKind::Position => "position",
            ChannelKind::Rotation => "rotation",
            ChannelKind::Scale => "scale",
        }
    }

    /// Lenient lookup for wire `type` strings. `None` means the channel kind
    /// is unknown and the caller should skip the channel.
    pub fn parse(s: &str) -> Option<ChannelKind> {
        match s {
            "position" => Some(ChannelKind::Position),
            "rotation" => Some(ChannelKind::Rotation),
            "scale" => Some(ChannelKind::Scale),
            _ => None,
        }
    }
}

/// One keyframe: a timestamp in seconds plus a 3-component value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub time: f32,
    #[serde(default)]
    pub interpolation: Interpolation,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Keyframe {
    pub fn value(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Per-part keyframe container across the three channels.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BoneAnimator {
    /// Name of the group (bone) this animator drives.
    pub part: String,
    #[serde(default)]
    pub position: Vec<Keyframe>,
    #[serde(default)]
    pub rotation: Vec<Keyframe>,
    #[serde(default)]
    pub scale: Vec<Keyframe>,
}

impl BoneAnimator {
    pub fn new(part: impl Into<String>) -> Self {
        BoneAnimator {
            part: part.into(),
            ..BoneAnimator::default()
        }
    }

    pub fn channel(&self, kind: ChannelKind) -> &[Keyframe] {
        match kind {
            ChannelKind::Position => &self.position,
            ChannelKind::Rotation => &self.rotation,
            ChannelKind::Scale => &self.scale,
        }
    }

    /// Replace the complete keyframe set of one channel.
    pub fn set_channel(&mut self, kind: ChannelKind, keyframes: Vec<Keyframe>) {
        match kind {
            ChannelKind::Position => self.position = keyframes,
            ChannelKind::Rotation => self.rotation = keyframes,
            ChannelKind::Scale => self.scale = keyframes,
        }
    }
}

/// A named skeletal animation clip.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Animation {
    pub name: String,
    /// Clip length in seconds.
    pub length: f32,
    #[serde(default)]
    pub loop_mode: LoopMode,
    #[serde(default)]
    pub animators: Vec<BoneAnimator>,
}

impl Animation {
    /// Fetch the animator for `part`, creating it on first use. Keeping one
    /// animator per part upholds the one-channel-per-(part, target)
    /// invariant.
    pub fn animator_mut(&mut self, part: &str) -> &mut BoneAnimator {
        if let Some(i) = self.animators.iter().position(|a| a.part == part) {
            return &mut self.animators[i];
        }
        self.animators.push(BoneAnimator::new(part));
        self.animators.last_mut().unwrap()
    }
}
