use std::fmt;

use log::{debug, trace};

use crate::expr::ast::{Content, Flag, Flags, Group, Quantifier};
use crate::expr::builder::Expression;
use crate::expr::error::{Error, Result};

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Quantifier::None => return Ok(()),
            Quantifier::ZeroOrOne { .. } => f.write_str("?")?,
            Quantifier::ZeroOrMore { .. } => f.write_str("*")?,
            Quantifier::OneOrMore { .. } => f.write_str("+")?,
            Quantifier::Exactly { n, .. } => write!(f, "{{{n}}}")?,
            Quantifier::MinOrMore { min, .. } => write!(f, "{{{min},}}")?,
            Quantifier::MinToMax { min, max, .. } => write!(f, "{{{min},{max}}}")?,
        }
        if self.is_lazy() {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Walks groups in order, tracking which inline flags are active.
struct Serializer {
    active: Flags,
    out: String,
}

impl Serializer {
    fn new() -> Self {
        Serializer {
            active: Flags::default(),
            out: String::new(),
        }
    }

    /// Emits `(?on-off)` for flags whose state differs from the running state.
    ///
    /// A flag the group doesn't set is turned off if it is active.
    fn write_flag_diff(&mut self, requested: Flags) {
        let mut enable = String::new();
        let mut disable = String::new();
        for flag in Flag::ALL {
            match (self.active.get(flag), requested.get(flag)) {
                (false, true) => enable.push(flag.letter()),
                (true, false) => disable.push(flag.letter()),
                _ => {}
            }
        }
        if enable.is_empty() && disable.is_empty() {
            return;
        }

        trace!("flag directive +{enable:?} -{disable:?}");
        self.out.push_str("(?");
        self.out.push_str(&enable);
        if !disable.is_empty() {
            self.out.push('-');
            self.out.push_str(&disable);
        }
        self.out.push(')');
        self.active = requested;
    }

    fn write_group(&mut self, index: usize, group: &Group) -> Result<()> {
        if group.tokens.is_empty() {
            return Err(Error::NoActiveToken(index));
        }

        self.write_flag_diff(group.flags);
        self.out.push('(');
        if let Some(anchor) = group.anchor {
            self.out.push_str(anchor.symbol());
        }
        for (i, token) in group.tokens.iter().enumerate() {
            if let Quantifier::MinToMax { min, max, .. } = token.quantifier {
                if min > max {
                    return Err(Error::InvalidRange { min, max });
                }
            }
            match &token.content {
                Content::Class(body) => {
                    self.out.push('[');
                    self.out.push_str(body);
                    self.out.push(']');
                    self.out.push_str(&token.quantifier.to_string());
                }
                Content::Fixed(text) => {
                    self.out.push_str(text);
                    self.out.push_str(&token.quantifier.to_string());
                    let more_fixed = group.tokens[i + 1..]
                        .iter()
                        .any(|t| matches!(t.content, Content::Fixed(_)));
                    if more_fixed {
                        self.out.push('|');
                    }
                }
            }
        }
        self.out.push(')');
        Ok(())
    }
}

impl Expression {
    /// Renders the accumulated groups as one pattern string.
    ///
    /// On failure nothing is returned; there is no partial output.
    pub fn serialize(&self) -> Result<String> {
        let mut serializer = Serializer::new();
        for (index, group) in self.groups.iter().enumerate() {
            serializer.write_group(index, group)?;
        }
        debug!(
            "serialized {} group(s): {}",
            self.groups.len(),
            serializer.out
        );
        Ok(serializer.out)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = self.serialize().map_err(|_| fmt::Error)?;
        f.write_str(&pattern)
    }
}
