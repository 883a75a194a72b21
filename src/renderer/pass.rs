// renderer/pass.rs
use bitflags::bitflags;

use crate::renderer::backend::{TargetId, TextureId};
use crate::renderer::post_processing::PostProcessingDescription;
use crate::scene::{Camera, SceneId};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderPassFlags: u8 {
        /// Only depth (and any geometry outputs) are written; point and
        /// directional lighting and the sky box are skipped.
        const DEPTH_ONLY = 1 << 0;
        const CLEAR_COLOUR = 1 << 1;
        const CLEAR_DEPTH = 1 << 2;
    }
}

impl Default for RenderPassFlags {
    fn default() -> Self {
        Self::CLEAR_COLOUR | Self::CLEAR_DEPTH
    }
}

/// One "draw a scene into a target" unit.
///
/// `colour_target == None` renders into the default framebuffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPass {
    pub scene: SceneId,
    pub camera: Camera,
    pub colour_target: Option<TargetId>,
    pub normal_target: Option<TargetId>,
    pub position_target: Option<TargetId>,
    pub flags: RenderPassFlags,
    pub sky_box: Option<TextureId>,
    pub post_processing: PostProcessingDescription,
}

impl RenderPass {
    pub fn new(scene: SceneId, camera: Camera) -> Self {
        Self {
            scene,
            camera,
            colour_target: None,
            normal_target: None,
            position_target: None,
            flags: RenderPassFlags::default(),
            sky_box: None,
            post_processing: PostProcessingDescription::default(),
        }
    }

    pub fn with_colour_target(mut self, target: TargetId) -> Self {
        self.colour_target = Some(target);
        self
    }

    pub fn with_sky_box(mut self, texture: TextureId) -> Self {
        self.sky_box = Some(texture);
        self
    }

    pub fn with_post_processing(mut self, description: PostProcessingDescription) -> Self {
        self.post_processing = description;
        self
    }

    pub fn with_flags(mut self, flags: RenderPassFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn depth_only(&self) -> bool {
        self.flags.contains(RenderPassFlags::DEPTH_ONLY)
    }

    pub fn clear_colour(&self) -> bool {
        self.flags.contains(RenderPassFlags::CLEAR_COLOUR)
    }

    pub fn clear_depth(&self) -> bool {
        self.flags.contains(RenderPassFlags::CLEAR_DEPTH)
    }

    /// Ambient lighting is folded into the occlusion pass when AO is on.
    pub fn suppresses_ambient(&self) -> bool {
        self.post_processing.ambient_occlusion.is_some()
    }
}
