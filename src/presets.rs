use crate::expr::{Class, Expression, QuantifierKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Loose e-mail address shape: `name@host.com|net|org`.
    Email,
    /// Two or three `n` characters.
    Repeat,
}

impl Preset {
    pub fn build(self) -> Result<Expression> {
        match self {
            Preset::Email => email(),
            Preset::Repeat => repeat(),
        }
    }
}

/// `([A-Za-z0-9]+)(.|_?)([A-Za-z0-9]*)(@)([A-Za-z0-9]+)(.)(com|net|org)`
///
/// Literals are not escaped, so the `.` groups match any character.
pub fn email() -> Result<Expression> {
    let mut rex = Expression::new();

    rex.start_class_group(Class::Uppers)?;
    rex.extend_last_class(Class::Lowers)?;
    rex.extend_last_class(Class::Digits)?;
    rex.apply_last_quantifier(QuantifierKind::OneOrMore, &[])?;

    rex.start_literal_group(".")?;
    rex.extend_last_literal("_")?;
    rex.apply_last_quantifier(QuantifierKind::ZeroOrOne, &[])?;

    rex.start_class_group(Class::AlphaNumerics)?;
    rex.apply_last_quantifier(QuantifierKind::ZeroOrMore, &[])?;

    rex.start_literal_group("@")?;

    rex.start_class_group(Class::AlphaNumerics)?;
    rex.apply_last_quantifier(QuantifierKind::OneOrMore, &[])?;

    rex.start_literal_group(".")?;

    let tld = rex.start_literal_group("com")?;
    rex.extend_literal(tld, "net")?;
    rex.extend_literal(tld, "org")?;

    Ok(rex)
}

/// `(n{2,3})`
pub fn repeat() -> Result<Expression> {
    let mut rex = Expression::new();
    let id = rex.start_literal_group("n")?;
    rex.apply_quantifier(id, QuantifierKind::MinToMax, &[2, 3])?;
    Ok(rex)
}
