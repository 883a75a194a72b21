// renderer/command.rs
// Output of the queue builder, replayed by a backend executor.

use crate::renderer::backend::{MaterialId, TargetId};
use crate::scene::{LightType, SceneId};

/// Index of a pass in the expanded pass list produced by
/// [`RenderQueueBuilder::build`](crate::renderer::RenderQueueBuilder::build).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub scene: SceneId,
    pub entity: hecs::Entity,
}

/// A light of a specific scene. Also the key of the shadow-map table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightRef {
    pub scene: SceneId,
    pub entity: hecs::Entity,
    pub light_type: LightType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderCommandType {
    PassStart,
    Draw,
    PassEnd,
    Present,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub pass: PassId,
    pub material: MaterialId,
    pub entity: EntityRef,
    pub light: LightRef,
    /// Only set for directional draws of shadow-receiving entities whose
    /// light rendered a shadow map this frame.
    pub shadow_map: Option<TargetId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCommand {
    /// Bind the pass's targets and clear as its flags request.
    PassStart { pass: PassId },
    Draw(DrawCommand),
    PassEnd { pass: PassId },
    /// Flip buffers. Always the last command of a frame.
    Present,
}

impl RenderCommand {
    pub fn kind(&self) -> RenderCommandType {
        match self {
            RenderCommand::PassStart { .. } => RenderCommandType::PassStart,
            RenderCommand::Draw(_) => RenderCommandType::Draw,
            RenderCommand::PassEnd { .. } => RenderCommandType::PassEnd,
            RenderCommand::Present => RenderCommandType::Present,
        }
    }

    pub fn pass(&self) -> Option<PassId> {
        match self {
            RenderCommand::PassStart { pass } | RenderCommand::PassEnd { pass } => Some(*pass),
            RenderCommand::Draw(draw) => Some(draw.pass),
            RenderCommand::Present => None,
        }
    }

    pub fn as_draw(&self) -> Option<&DrawCommand> {
        match self {
            RenderCommand::Draw(draw) => Some(draw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStreamError {
    MissingPresent,
    PresentNotLast { index: usize },
    NestedPassStart { index: usize, open: PassId },
    DrawOutsidePass { index: usize },
    /// A draw or end names a different pass than the one that is open.
    PassMismatch { index: usize, expected: PassId, found: PassId },
    UnmatchedPassEnd { index: usize },
    UnterminatedPass { pass: PassId },
    PassRepeated { pass: PassId },
}

impl std::fmt::Display for CommandStreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandStreamError::MissingPresent => write!(f, "Command stream has no PRESENT"),
            CommandStreamError::PresentNotLast { index } => {
                write!(f, "PRESENT at {} is not the final command", index)
            }
            CommandStreamError::NestedPassStart { index, open } => write!(
                f,
                "PASS_START at {} while pass {} is still open",
                index, open.0
            ),
            CommandStreamError::DrawOutsidePass { index } => {
                write!(f, "DRAW at {} is outside any pass", index)
            }
            CommandStreamError::PassMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "Command at {} belongs to pass {} but pass {} is open",
                index, found.0, expected.0
            ),
            CommandStreamError::UnmatchedPassEnd { index } => {
                write!(f, "PASS_END at {} has no matching PASS_START", index)
            }
            CommandStreamError::UnterminatedPass { pass } => {
                write!(f, "Pass {} is never ended", pass.0)
            }
            CommandStreamError::PassRepeated { pass } => {
                write!(f, "Pass {} is started more than once", pass.0)
            }
        }
    }
}

impl std::error::Error for CommandStreamError {}

/// Checks that every pass is bracketed by exactly one start/end pair with
/// only its own draws in between, and that a single PRESENT ends the stream.
pub fn validate_commands(commands: &[RenderCommand]) -> Result<(), CommandStreamError> {
    let mut open: Option<PassId> = None;
    let mut seen = std::collections::HashSet::new();

    let Some(last) = commands.len().checked_sub(1) else {
        return Err(CommandStreamError::MissingPresent);
    };

    for (index, command) in commands.iter().enumerate() {
        match *command {
            RenderCommand::PassStart { pass } => {
                if let Some(open) = open {
                    return Err(CommandStreamError::NestedPassStart { index, open });
                }
                if !seen.insert(pass) {
                    return Err(CommandStreamError::PassRepeated { pass });
                }
                open = Some(pass);
            }
            RenderCommand::Draw(ref draw) => match open {
                None => return Err(CommandStreamError::DrawOutsidePass { index }),
                Some(expected) if expected != draw.pass => {
                    return Err(CommandStreamError::PassMismatch {
                        index,
                        expected,
                        found: draw.pass,
                    })
                }
                Some(_) => {}
            },
            RenderCommand::PassEnd { pass } => match open.take() {
                None => return Err(CommandStreamError::UnmatchedPassEnd { index }),
                Some(expected) if expected != pass => {
                    return Err(CommandStreamError::PassMismatch {
                        index,
                        expected,
                        found: pass,
                    })
                }
                Some(_) => {}
            },
            RenderCommand::Present => {
                if let Some(pass) = open {
                    return Err(CommandStreamError::UnterminatedPass { pass });
                }
                if index != last {
                    return Err(CommandStreamError::PresentNotLast { index });
                }
            }
        }
    }

    match commands[last] {
        RenderCommand::Present => Ok(()),
        _ => match open {
            Some(pass) => Err(CommandStreamError::UnterminatedPass { pass }),
            None => Err(CommandStreamError::MissingPresent),
        },
    }
}
