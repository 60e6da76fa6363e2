//! Assembles regular-expression pattern text from typed pieces.
//!
//! ```
//! use rexbuild::{Class, Expression, QuantifierKind};
//!
//! let mut rex = Expression::new();
//! rex.start_class_group(Class::Uppers)?;
//! rex.extend_last_class(Class::Digits)?;
//! rex.apply_last_quantifier(QuantifierKind::OneOrMore, &[])?;
//! rex.start_literal_group("com")?;
//! rex.extend_last_literal("net")?;
//! assert_eq!(rex.serialize()?, "([A-Z0-9]+)(com|net)");
//! # Ok::<(), rexbuild::Error>(())
//! ```

pub mod expr;
pub mod presets;

pub use expr::{
    Anchor, Class, Content, Error, Expression, Flag, Flags, Group, GroupId, Mode, Quantifier,
    QuantifierKind, Quantify, Result, Token, is_known,
};
