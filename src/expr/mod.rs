pub mod ast;
pub mod builder;
pub mod class;
pub mod error;
pub mod serialize;

pub use ast::{Anchor, Content, Flag, Flags, Group, Quantifier, QuantifierKind, Quantify, Token};
pub use builder::{Expression, GroupId, Mode};
pub use class::{Class, is_known};
pub use error::{Error, Result};
