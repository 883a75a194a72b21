use serde::{Deserialize, Serialize};

/// Effects to run on a pass once its scene has been drawn.
///
/// Every field is independent; `None`/`false` disables the effect. The
/// queue builder always applies them in the order bloom, colour adjust,
/// anti-aliasing. Ambient occlusion is not a post effect as such: it is
/// resolved before the pass runs and replaces the pass's ambient lighting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PostProcessingDescription {
    #[serde(default)]
    pub bloom: Option<BloomDescription>,
    #[serde(default)]
    pub colour_adjust: Option<ColourAdjustDescription>,
    #[serde(default)]
    pub anti_aliasing: bool,
    #[serde(default)]
    pub ambient_occlusion: Option<AmbientOcclusionDescription>,
}

impl PostProcessingDescription {
    pub fn with_bloom(mut self, bloom: BloomDescription) -> Self {
        self.bloom = Some(bloom);
        self
    }

    pub fn with_colour_adjust(mut self, colour_adjust: ColourAdjustDescription) -> Self {
        self.colour_adjust = Some(colour_adjust);
        self
    }

    pub fn with_anti_aliasing(mut self) -> Self {
        self.anti_aliasing = true;
        self
    }

    pub fn with_ambient_occlusion(mut self, ambient_occlusion: AmbientOcclusionDescription) -> Self {
        self.ambient_occlusion = Some(ambient_occlusion);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.bloom
            .map_or(true, |bloom| bloom.iterations <= MAX_BLOOM_ITERATIONS)
    }

    /// Number of full-screen passes the chain builder appends after the pass.
    pub fn chain_length(&self) -> usize {
        let bloom = self
            .bloom
            .map_or(0, |bloom| 3 + bloom.iterations as usize);
        let colour_adjust = usize::from(self.colour_adjust.is_some());
        let anti_aliasing = usize::from(self.anti_aliasing);
        bloom + colour_adjust + anti_aliasing
    }
}

/// Blur passes a single bloom chain may ask for.
pub const MAX_BLOOM_ITERATIONS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloomDescription {
    /// Luminance above which a pixel contributes to bloom.
    #[serde(default = "BloomDescription::default_threshold")]
    pub threshold: f32,
    /// Number of blur passes run over the bright-pass output.
    #[serde(default = "BloomDescription::default_iterations")]
    pub iterations: u32,
}

impl BloomDescription {
    const fn default_threshold() -> f32 {
        0.7
    }

    const fn default_iterations() -> u32 {
        5
    }
}

impl Default for BloomDescription {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            iterations: Self::default_iterations(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColourAdjustDescription {
    #[serde(default = "ColourAdjustDescription::default_gamma")]
    pub gamma: f32,
    #[serde(default = "ColourAdjustDescription::default_exposure")]
    pub exposure: f32,
}

impl ColourAdjustDescription {
    const fn default_gamma() -> f32 {
        2.2
    }

    const fn default_exposure() -> f32 {
        1.0
    }
}

impl Default for ColourAdjustDescription {
    fn default() -> Self {
        Self {
            gamma: Self::default_gamma(),
            exposure: Self::default_exposure(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientOcclusionDescription {
    #[serde(default = "AmbientOcclusionDescription::default_sample_count")]
    pub sample_count: u32,
    #[serde(default = "AmbientOcclusionDescription::default_radius")]
    pub radius: f32,
    #[serde(default = "AmbientOcclusionDescription::default_bias")]
    pub bias: f32,
}

impl AmbientOcclusionDescription {
    const fn default_sample_count() -> u32 {
        32
    }

    const fn default_radius() -> f32 {
        0.5
    }

    const fn default_bias() -> f32 {
        0.025
    }
}

impl Default for AmbientOcclusionDescription {
    fn default() -> Self {
        Self {
            sample_count: Self::default_sample_count(),
            radius: Self::default_radius(),
            bias: Self::default_bias(),
        }
    }
}
