// scene/store.rs
// Caller-owned scenes plus the per-frame scenes the queue builder creates.

use crate::asset::{AssetCache, Handle};
use crate::scene::Scene;

/// Identifies a scene in a [`SceneStore`].
///
/// Frame scenes carry the generation they were created in; once the store
/// starts a new frame the old ids stop resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Persistent(Handle<Scene>),
    Frame {
        handle: Handle<Scene>,
        generation: u64,
    },
}

impl SceneId {
    pub fn is_frame_scene(&self) -> bool {
        matches!(self, SceneId::Frame { .. })
    }
}

#[derive(Default)]
pub struct SceneStore {
    scenes: AssetCache<Scene>,
    frame_scenes: AssetCache<Scene>,
    generation: u64,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, scene: Scene) -> SceneId {
        SceneId::Persistent(self.scenes.insert(scene))
    }

    /// Creates an empty scene that lives until the next [`begin_frame`](Self::begin_frame).
    pub fn create_frame_scene(&mut self) -> SceneId {
        SceneId::Frame {
            handle: self.frame_scenes.insert(Scene::new()),
            generation: self.generation,
        }
    }

    /// Drops every frame scene created since the previous call.
    pub fn begin_frame(&mut self) {
        if !self.frame_scenes.is_empty() {
            log::trace!(
                "Dropping {} frame scenes from generation {}",
                self.frame_scenes.len(),
                self.generation
            );
        }
        self.frame_scenes.clear();
        self.generation += 1;
    }

    pub fn get(&self, id: SceneId) -> Option<&Scene> {
        match id {
            SceneId::Persistent(handle) => self.scenes.get(handle),
            SceneId::Frame { handle, generation } if generation == self.generation => {
                self.frame_scenes.get(handle)
            }
            SceneId::Frame { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        match id {
            SceneId::Persistent(handle) => self.scenes.get_mut(handle),
            SceneId::Frame { handle, generation } if generation == self.generation => {
                self.frame_scenes.get_mut(handle)
            }
            SceneId::Frame { .. } => None,
        }
    }

    pub fn contains(&self, id: SceneId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn frame_scene_count(&self) -> usize {
        self.frame_scenes.len()
    }
}
