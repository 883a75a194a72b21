use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Tunables for [`RenderQueueBuilder`](crate::renderer::RenderQueueBuilder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderQueueSettings {
    /// Size of every synthesized full-screen target.
    #[serde(default)]
    pub resolution: Resolution,
    /// Width and height of each directional shadow map.
    #[serde(default = "RenderQueueSettings::default_shadow_map_size")]
    pub shadow_map_size: u32,
    /// Ping-pong post-processing targets within a chain instead of
    /// allocating one per stage.
    #[serde(default = "RenderQueueSettings::default_reuse_post_process_targets")]
    pub reuse_post_process_targets: bool,
}

impl Default for RenderQueueSettings {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            shadow_map_size: Self::default_shadow_map_size(),
            reuse_post_process_targets: Self::default_reuse_post_process_targets(),
        }
    }
}

impl RenderQueueSettings {
    pub fn with_resolution(width: u32, height: u32) -> Self {
        Self {
            resolution: Resolution { width, height },
            ..Self::default()
        }
    }

    pub fn load() -> Self {
        Self::load_from_path("settings.json")
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {:?} ({}). Falling back to default render queue settings.",
                    path, err
                );
                RenderQueueSettings::default()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Render queue settings file {:?} not found. Using default settings.",
                    path
                );
                RenderQueueSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default render queue settings.",
                    path, err
                );
                RenderQueueSettings::default()
            }
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RenderQueueSettings>(contents).map(Self::validate)
    }

    pub fn validate(mut self) -> Self {
        if self.shadow_map_size == 0 {
            warn!("Shadow map size must be greater than zero. Using default value.");
            self.shadow_map_size = Self::default_shadow_map_size();
        }

        if self.resolution.width == 0 || self.resolution.height == 0 {
            warn!("Resolution must be greater than zero. Using default resolution.");
            self.resolution = Resolution::default();
        }

        self
    }

    const fn default_shadow_map_size() -> u32 {
        1024
    }

    const fn default_reuse_post_process_targets() -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}
