use std::str::FromStr;

use crate::expr::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Class(String), // [A-Za-z]
    Fixed(String), // com, one alternative of com|net|org
}

impl Content {
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Class(body) | Content::Fixed(body) => body.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub(crate) content: Content,
    pub(crate) quantifier: Quantifier,
}

impl Token {
    pub(crate) fn new(content: Content) -> Self {
        Token {
            content,
            quantifier: Quantifier::None,
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub(crate) tokens: Vec<Token>,
    pub(crate) anchor: Option<Anchor>,
    pub(crate) flags: Flags,
}

impl Group {
    pub(crate) fn new(first: Token) -> Self {
        Group {
            tokens: vec![first],
            anchor: None,
            flags: Flags::default(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantifierKind {
    None,
    ZeroOrOne,  // ?
    ZeroOrMore, // *
    OneOrMore,  // +
    Exactly,    // {n}
    MinOrMore,  // {n,}
    MinToMax,   // {n,m}
}

impl QuantifierKind {
    pub fn arity(self) -> usize {
        match self {
            QuantifierKind::None
            | QuantifierKind::ZeroOrOne
            | QuantifierKind::ZeroOrMore
            | QuantifierKind::OneOrMore => 0,
            QuantifierKind::Exactly | QuantifierKind::MinOrMore => 1,
            QuantifierKind::MinToMax => 2,
        }
    }

    /// The prefer-fewer form of this quantifier.
    pub fn lazy(self) -> Quantify {
        Quantify {
            kind: self,
            lazy: true,
        }
    }
}

/// A quantifier request: the kind plus whether it prefers fewer repetitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantify {
    pub kind: QuantifierKind,
    pub lazy: bool,
}

impl From<QuantifierKind> for Quantify {
    fn from(kind: QuantifierKind) -> Self {
        Quantify { kind, lazy: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantifier {
    #[default]
    None,
    ZeroOrOne { lazy: bool },
    ZeroOrMore { lazy: bool },
    OneOrMore { lazy: bool },
    Exactly { n: u32, lazy: bool },
    MinOrMore { min: u32, lazy: bool },
    MinToMax { min: u32, max: u32, lazy: bool },
}

impl Quantifier {
    /// Builds a quantifier from a kind and its positional arguments.
    ///
    /// The number of arguments must match the kind's arity exactly, and a
    /// two-argument range must not be inverted.
    pub fn new(quantify: impl Into<Quantify>, args: &[u32]) -> Result<Self> {
        let Quantify { kind, lazy } = quantify.into();
        if args.len() != kind.arity() {
            return Err(Error::ArityMismatch {
                kind,
                expected: kind.arity(),
                found: args.len(),
            });
        }

        let quantifier = match (kind, args) {
            (QuantifierKind::None, _) => Quantifier::None,
            (QuantifierKind::ZeroOrOne, _) => Quantifier::ZeroOrOne { lazy },
            (QuantifierKind::ZeroOrMore, _) => Quantifier::ZeroOrMore { lazy },
            (QuantifierKind::OneOrMore, _) => Quantifier::OneOrMore { lazy },
            (QuantifierKind::Exactly, &[n]) => Quantifier::Exactly { n, lazy },
            (QuantifierKind::MinOrMore, &[min]) => Quantifier::MinOrMore { min, lazy },
            (QuantifierKind::MinToMax, &[min, max]) => {
                if min > max {
                    return Err(Error::InvalidRange { min, max });
                }
                Quantifier::MinToMax { min, max, lazy }
            }
            // arity was checked above
            _ => unreachable!("arity checked for {kind:?}"),
        };
        Ok(quantifier)
    }

    pub fn kind(&self) -> QuantifierKind {
        match self {
            Quantifier::None => QuantifierKind::None,
            Quantifier::ZeroOrOne { .. } => QuantifierKind::ZeroOrOne,
            Quantifier::ZeroOrMore { .. } => QuantifierKind::ZeroOrMore,
            Quantifier::OneOrMore { .. } => QuantifierKind::OneOrMore,
            Quantifier::Exactly { .. } => QuantifierKind::Exactly,
            Quantifier::MinOrMore { .. } => QuantifierKind::MinOrMore,
            Quantifier::MinToMax { .. } => QuantifierKind::MinToMax,
        }
    }

    pub fn is_lazy(&self) -> bool {
        match *self {
            Quantifier::None => false,
            Quantifier::ZeroOrOne { lazy }
            | Quantifier::ZeroOrMore { lazy }
            | Quantifier::OneOrMore { lazy }
            | Quantifier::Exactly { lazy, .. }
            | Quantifier::MinOrMore { lazy, .. }
            | Quantifier::MinToMax { lazy, .. } => lazy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Start, // ^
    End,   // $
}

impl Anchor {
    pub fn symbol(self) -> &'static str {
        match self {
            Anchor::Start => "^",
            Anchor::End => "$",
        }
    }
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "^" => Ok(Anchor::Start),
            "$" => Ok(Anchor::End),
            _ if s.eq_ignore_ascii_case("start") => Ok(Anchor::Start),
            _ if s.eq_ignore_ascii_case("end") => Ok(Anchor::End),
            _ => Err(Error::InvalidAnchor(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    CaseInsensitive,
    MultiLine,
    DotMatchesNewline,
    UngreedySwap,
}

impl Flag {
    /// Flags in the order their letters are emitted.
    pub const ALL: [Flag; 4] = [
        Flag::CaseInsensitive,
        Flag::MultiLine,
        Flag::DotMatchesNewline,
        Flag::UngreedySwap,
    ];

    pub fn letter(self) -> char {
        match self {
            Flag::CaseInsensitive => 'i',
            Flag::MultiLine => 'm',
            Flag::DotMatchesNewline => 's',
            Flag::UngreedySwap => 'U',
        }
    }

    pub fn from_letter(c: char) -> Option<Flag> {
        Flag::ALL.into_iter().find(|f| f.letter() == c)
    }

    /// Parses a run of flag letters such as `"im"`.
    pub fn parse_letters(letters: &str) -> Result<Vec<Flag>> {
        if letters.is_empty() {
            return Err(Error::InvalidFlag(String::new()));
        }
        letters
            .chars()
            .map(|c| Flag::from_letter(c).ok_or_else(|| Error::InvalidFlag(c.to_string())))
            .collect()
    }
}

/// The explicit on/off state of every inline flag for one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub swap_greed: bool,
}

impl Flags {
    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::CaseInsensitive => self.case_insensitive,
            Flag::MultiLine => self.multi_line,
            Flag::DotMatchesNewline => self.dot_matches_new_line,
            Flag::UngreedySwap => self.swap_greed,
        }
    }

    pub fn set(&mut self, flag: Flag, on: bool) {
        match flag {
            Flag::CaseInsensitive => self.case_insensitive = on,
            Flag::MultiLine => self.multi_line = on,
            Flag::DotMatchesNewline => self.dot_matches_new_line = on,
            Flag::UngreedySwap => self.swap_greed = on,
        }
    }
}
