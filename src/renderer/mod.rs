pub mod backend;
pub mod command;
pub mod headless;
pub mod pass;
pub mod post_processing;
pub mod queue;
pub mod render_graph;

pub use backend::{
    BackendError, MaterialFactory, MaterialId, MaterialRequest, MeshId, PrimitiveMeshes,
    RenderBackend, TargetAllocator, TargetId, TextureId,
};
pub use command::{
    validate_commands, CommandStreamError, DrawCommand, EntityRef, LightRef, PassId,
    RenderCommand, RenderCommandType,
};
pub use headless::HeadlessBackend;
pub use pass::{RenderPass, RenderPassFlags};
pub use post_processing::{
    AmbientOcclusionDescription, BloomDescription, ColourAdjustDescription,
    PostProcessingDescription, MAX_BLOOM_ITERATIONS,
};
pub use queue::{BuildError, RenderQueueBuilder, ShadowMaps};
pub use render_graph::{Node, NodeId, RenderGraph, RenderNode};
