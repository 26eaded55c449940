//! DTN format codecs (host-agnostic).
//!
//! Two independent converters over a read-only scene/animation object graph:
//! an animation codec (export + batch import of keyframe channels) and a
//! model codec (export of the group/cube tree, with synthetic wrapper parts
//! for cubes carrying off-pivot rotation). Both are pure, synchronous tree
//! transformations; file dialogs and user notification stay with the caller.

pub mod animation;
pub mod animation_format;
pub mod error;
pub mod float;
pub mod model_format;
pub mod scene;

/// Wire-format version tag stamped on every document. Decode never
/// validates it; bump only with a meaning change.
pub const FORMAT_VERSION: f32 = 1.0;

// Re-exports for consumers (CLI, tests)
pub use animation::{Animation, BoneAnimator, ChannelKind, Interpolation, Keyframe, LoopMode};
pub use animation_format::{
    export_animation, import_animation, import_animations, suggested_animation_file_name,
    AnimationDocument, BatchReport, ChannelData, ImportFile, KeyframeData,
};
pub use error::FormatError;
pub use model_format::{
    export_model, import_model, suggested_model_file_name, CubeData, ModelDocument, PartData,
};
pub use scene::{Cube, Group, Project, SceneNode};
