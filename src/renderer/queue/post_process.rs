use glam::Vec4;

use super::{BuildError, RenderQueueBuilder};
use crate::renderer::backend::{BackendError, RenderBackend, TargetAllocator, TargetId};
use crate::renderer::pass::RenderPass;
use crate::renderer::render_graph::{
    ArithmeticOperator, ConditionalOperator, Node, RenderGraph, RenderNode, Value,
    LUMINANCE_WEIGHTS,
};
use crate::scene::SceneStore;

/// Intermediate targets of one post-processing chain.
///
/// With reuse enabled a stage's input is taken from the targets already
/// owned by the chain, skipping the ones the previous stage samples and
/// any pinned ones, so a chain settles on two or three physical targets.
pub(crate) struct ChainTargets {
    reuse: bool,
    seed: Option<TargetId>,
    owned: Vec<TargetId>,
    pinned: Vec<TargetId>,
    reading: Vec<TargetId>,
}

impl ChainTargets {
    pub(crate) fn new(reuse: bool) -> Self {
        Self {
            reuse,
            seed: None,
            owned: Vec::new(),
            pinned: Vec::new(),
            reading: Vec::new(),
        }
    }

    /// Chain whose first stage reads `input`, a target written before the
    /// chain starts.
    pub(crate) fn seeded(reuse: bool, input: TargetId) -> Self {
        let mut targets = Self::new(reuse);
        targets.seed = Some(input);
        targets.owned.push(input);
        targets
    }

    /// Target that the current last stage may write and the next stage reads.
    pub(crate) fn acquire(
        &mut self,
        allocator: &mut dyn TargetAllocator,
        width: u32,
        height: u32,
    ) -> Result<TargetId, BackendError> {
        if let Some(target) = self.seed.take() {
            return Ok(target);
        }

        if self.reuse {
            let free = self
                .owned
                .iter()
                .copied()
                .find(|target| !self.pinned.contains(target) && !self.reading.contains(target));
            if let Some(target) = free {
                return Ok(target);
            }
        }

        let target = allocator.create_render_target(width, height)?;
        self.owned.push(target);
        Ok(target)
    }

    /// Records what the newest stage samples.
    pub(crate) fn set_reading(&mut self, targets: &[TargetId]) {
        self.reading.clear();
        self.reading.extend_from_slice(targets);
    }

    pub(crate) fn pin(&mut self, target: TargetId) {
        self.pinned.push(target);
    }

    pub(crate) fn unpin(&mut self, target: TargetId) {
        self.pinned.retain(|&t| t != target);
    }

    pub(crate) fn allocated(&self) -> usize {
        self.owned.len()
    }
}

/// Chain input prepared ahead of the chain, as ambient occlusion does.
///
/// The processed pass already writes `input` (through a hybrid target), so
/// the chain reads it without retargeting that pass, and the last stage
/// writes `output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChainSeed {
    pub input: TargetId,
    pub output: Option<TargetId>,
}

impl<B: RenderBackend> RenderQueueBuilder<B> {
    /// Copies `passes` into a new list, following each pass with the
    /// full-screen passes its post-processing description asks for. The last
    /// pass of every chain writes the colour target the processed pass had,
    /// or the seed's output when `seeds` has one at that index.
    pub(super) fn add_post_processing_passes(
        &mut self,
        scenes: &mut SceneStore,
        passes: Vec<RenderPass>,
        seeds: &[Option<ChainSeed>],
    ) -> Result<Vec<RenderPass>, BuildError> {
        let mut expanded = Vec::new();

        for (index, pass) in passes.into_iter().enumerate() {
            let description = pass.post_processing;
            let processed_target = pass.colour_target;
            let chain_start = expanded.len();
            expanded.push(pass);

            if description.chain_length() == 0 {
                continue;
            }

            let reuse = self.settings.reuse_post_process_targets;
            let seed = seeds.get(index).copied().flatten();
            let (mut targets, final_target) = match seed {
                Some(seed) => (ChainTargets::seeded(reuse, seed.input), seed.output),
                None => (ChainTargets::new(reuse), processed_target),
            };

            if let Some(bloom) = description.bloom {
                // Plain scene colour, added back once the bright pass is blurred.
                let base = self.push_chain_stage(scenes, &mut expanded, &mut targets, &[], |graph, input| {
                    let colour = graph.texture(input);
                    graph.set_colour_input(colour);
                })?;
                targets.pin(base);

                self.push_chain_stage(scenes, &mut expanded, &mut targets, &[], |graph, input| {
                    build_bright_pass(graph, input, bloom.threshold);
                })?;

                for _ in 0..bloom.iterations {
                    self.push_chain_stage(scenes, &mut expanded, &mut targets, &[], |graph, input| {
                        let colour = graph.texture(input);
                        let blurred = graph.create(Node::Blur { input: colour });
                        graph.set_colour_input(blurred);
                    })?;
                }

                self.push_chain_stage(scenes, &mut expanded, &mut targets, &[base], |graph, input| {
                    let base_colour = graph.texture(base);
                    let bloom_colour = graph.texture(input);
                    let combined = graph.create(Node::Arithmetic {
                        lhs: base_colour,
                        rhs: bloom_colour,
                        op: ArithmeticOperator::Add,
                    });
                    graph.set_colour_input(combined);
                })?;
                targets.unpin(base);
            }

            if let Some(colour_adjust) = description.colour_adjust {
                self.push_chain_stage(scenes, &mut expanded, &mut targets, &[], |graph, input| {
                    let colour = graph.texture(input);
                    graph.set_render_node(RenderNode::ColourAdjust {
                        input: colour,
                        description: colour_adjust,
                    });
                })?;
            }

            if description.anti_aliasing {
                self.push_chain_stage(scenes, &mut expanded, &mut targets, &[], |graph, input| {
                    let colour = graph.texture(input);
                    graph.set_render_node(RenderNode::AntiAliasing { input: colour });
                })?;
            }

            // The first stage pointed the pass at the seed; it keeps drawing
            // through the hybrid target that wraps it.
            if seed.is_some() {
                expanded[chain_start].colour_target = processed_target;
            }
            if let Some(last) = expanded.last_mut() {
                last.colour_target = final_target;
            }

            log::debug!(
                "Post-processing chain for pass {}: {} stages, {} intermediate targets, output {:?}",
                chain_start,
                expanded.len() - chain_start - 1,
                targets.allocated(),
                final_target
            );
        }

        Ok(expanded)
    }

    /// Appends one chain stage reading the previous stage's output (and
    /// `also_reads`). Returns the target the stage reads from.
    fn push_chain_stage<F>(
        &mut self,
        scenes: &mut SceneStore,
        passes: &mut Vec<RenderPass>,
        targets: &mut ChainTargets,
        also_reads: &[TargetId],
        build_graph: F,
    ) -> Result<TargetId, BuildError>
    where
        F: FnOnce(&mut RenderGraph, TargetId),
    {
        let (width, height) = self.frame_size();
        let input = targets.acquire(&mut self.backend, width, height)?;
        self.push_full_screen_pass(scenes, passes, input, build_graph)?;

        let mut reading = vec![input];
        reading.extend_from_slice(also_reads);
        targets.set_reading(&reading);

        Ok(input)
    }
}

/// Keeps pixels whose luminance exceeds `threshold`, black elsewhere.
fn build_bright_pass(graph: &mut RenderGraph, input: TargetId, threshold: f32) {
    let colour = graph.texture(input);
    let weights = graph.value(Value::Colour(LUMINANCE_WEIGHTS));
    let luminance = graph.create(Node::Arithmetic {
        lhs: colour,
        rhs: weights,
        op: ArithmeticOperator::Dot,
    });
    let threshold = graph.value(Value::Float(threshold));
    let black = graph.value(Value::Colour(Vec4::new(0.0, 0.0, 0.0, 1.0)));
    let bright = graph.create(Node::Conditional {
        lhs: luminance,
        rhs: threshold,
        then: colour,
        otherwise: black,
        op: ConditionalOperator::Greater,
    });
    graph.set_colour_input(bright);
}
