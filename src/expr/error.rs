use thiserror::Error;

use crate::expr::ast::QuantifierKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid expression option(s): {0:?}")]
    InvalidOption(Vec<String>),

    #[error("invalid class body {0:?}")]
    InvalidClass(String),

    #[error("invalid literal {text:?}: byte 0x{byte:02x} at offset {offset} is not ASCII")]
    InvalidLiteral { text: String, byte: u8, offset: usize },

    #[error("no group to operate on")]
    NoActiveGroup,

    #[error("group {0} has no token to operate on")]
    NoActiveToken(usize),

    #[error("token has no class or literal content to quantify")]
    EmptyToken,

    #[error("quantifier {kind:?} takes {expected} argument(s), got {found}")]
    ArityMismatch {
        kind: QuantifierKind,
        expected: usize,
        found: usize,
    },

    #[error("invalid repetition range {{{min},{max}}}: min exceeds max")]
    InvalidRange { min: u32, max: u32 },

    #[error("invalid anchor {0:?}")]
    InvalidAnchor(String),

    #[error("invalid flag {0:?}")]
    InvalidFlag(String),

    #[error("cannot mix class and literal content in one token (group {0})")]
    ConflictingToken(usize),
}
