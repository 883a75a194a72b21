// renderer/headless.rs
// Backend that hands out sequential ids and records every request. Used by
// the demo binary and the test-suite.

use crate::renderer::backend::{
    BackendError, MaterialFactory, MaterialId, MaterialRequest, MeshId, PrimitiveMeshes,
    TargetAllocator, TargetId,
};
use crate::scene::LightType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRecord {
    pub id: TargetId,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HybridRecord {
    pub id: TargetId,
    pub colour: Option<TargetId>,
    pub depth_source: TargetId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialRecord {
    pub id: MaterialId,
    pub light_type: LightType,
    pub colour_target: Option<TargetId>,
    pub normal_output: bool,
    pub position_output: bool,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_target: u32,
    next_material: u32,
    fail_after: Option<usize>,
    targets: Vec<TargetRecord>,
    hybrids: Vec<HybridRecord>,
    materials: Vec<MaterialRecord>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes with fixed ids, for builders driven by this backend.
    pub fn primitive_meshes() -> PrimitiveMeshes {
        PrimitiveMeshes {
            quad: MeshId(0),
            cube: MeshId(1),
        }
    }

    /// Makes every render-target allocation after the first `count` fail.
    pub fn fail_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    pub fn targets(&self) -> &[TargetRecord] {
        &self.targets
    }

    pub fn hybrids(&self) -> &[HybridRecord] {
        &self.hybrids
    }

    pub fn materials(&self) -> &[MaterialRecord] {
        &self.materials
    }

    fn next_target_id(&mut self) -> TargetId {
        self.next_target += 1;
        TargetId(self.next_target)
    }
}

impl TargetAllocator for HeadlessBackend {
    fn create_render_target(&mut self, width: u32, height: u32) -> Result<TargetId, BackendError> {
        if self.fail_after.is_some_and(|limit| self.targets.len() >= limit) {
            return Err(BackendError::TargetAllocation {
                width,
                height,
                reason: "allocation limit reached".to_string(),
            });
        }

        let id = self.next_target_id();
        self.targets.push(TargetRecord { id, width, height });
        log::trace!("Allocated target {:?} ({}x{})", id, width, height);
        Ok(id)
    }

    fn create_hybrid_render_target(
        &mut self,
        colour: Option<TargetId>,
        depth_source: TargetId,
    ) -> Result<TargetId, BackendError> {
        if !self.targets.iter().any(|target| target.id == depth_source) {
            return Err(BackendError::HybridTarget(format!(
                "depth source {:?} was not allocated by this backend",
                depth_source
            )));
        }

        let id = self.next_target_id();
        self.hybrids.push(HybridRecord {
            id,
            colour,
            depth_source,
        });
        Ok(id)
    }
}

impl MaterialFactory for HeadlessBackend {
    fn create_material(&mut self, request: &MaterialRequest<'_>) -> Result<MaterialId, BackendError> {
        let id = MaterialId(self.next_material);
        self.next_material += 1;
        self.materials.push(MaterialRecord {
            id,
            light_type: request.light_type,
            colour_target: request.colour_target,
            normal_output: request.normal_output,
            position_output: request.position_output,
        });
        Ok(id)
    }
}
