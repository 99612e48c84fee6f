//! Errors for build and research requests.

use thiserror::Error;

use arena_core::enums::FriendlyKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("{kind:?} requires research `{tech}`")]
    Locked { kind: FriendlyKind, tech: &'static str },
    #[error("insufficient credits: have {have}, need {need}")]
    InsufficientCredits { have: u32, need: u32 },
    #[error("cannot place at ({x}, {y})")]
    InvalidPlacement { x: f64, y: f64 },
    #[error("building is only allowed during the build phase")]
    WrongPhase,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TechError {
    #[error("duplicate tech id `{0}`")]
    DuplicateId(String),
    #[error("tech `{tech}` lists unknown prerequisite `{prereq}`")]
    UnknownPrereq { tech: String, prereq: String },
    #[error("prerequisite cycle through `{0}`")]
    Cycle(String),
    #[error("unknown tech `{0}`")]
    UnknownTech(String),
    #[error("tech `{0}` already unlocked")]
    AlreadyUnlocked(String),
    #[error("tech `{tech}` requires `{prereq}`")]
    MissingPrereq { tech: String, prereq: String },
    #[error("insufficient research points: have {have}, need {need}")]
    InsufficientPoints { have: u32, need: u32 },
}
