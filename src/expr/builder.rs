use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::expr::ast::{Anchor, Content, Flag, Group, Quantifier, Quantify, Token};
use crate::expr::class::is_known;
use crate::expr::error::{Error, Result};

/// Whether class bodies must come from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Safe,
    Unsafe,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("safe") {
            Ok(Mode::Safe)
        } else if s.eq_ignore_ascii_case("unsafe") {
            Ok(Mode::Unsafe)
        } else {
            Err(Error::InvalidOption(vec![s.to_string()]))
        }
    }
}

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

/// Handle to a group inside the [`Expression`] that created it.
///
/// Handles carry the id of their expression; a clone keeps the id, so
/// handles stay valid on clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId {
    owner: u64,
    index: usize,
}

impl GroupId {
    pub fn index(self) -> usize {
        self.index
    }
}

/// A pattern assembled group by group.
///
/// Every mutating call validates its input first and only then touches the
/// groups, so a failed call leaves the expression as it was.
#[derive(Debug, Clone)]
pub struct Expression {
    pub(crate) groups: Vec<Group>,
    mode: Mode,
    owner: u64,
}

impl Default for Expression {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && self.groups == other.groups
    }
}

impl Eq for Expression {}

impl Expression {
    pub fn new() -> Self {
        Self::with_mode(Mode::Safe)
    }

    pub fn with_mode(mode: Mode) -> Self {
        Expression {
            groups: Vec::new(),
            mode,
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Builds an expression from zero or one textual mode option.
    pub fn from_options(opts: &[&str]) -> Result<Self> {
        match opts {
            [] => Ok(Self::new()),
            [one] => Ok(Self::with_mode(one.parse()?)),
            _ => Err(Error::InvalidOption(
                opts.iter().map(|o| o.to_string()).collect(),
            )),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_safe(&self) -> bool {
        self.mode == Mode::Safe
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        if id.owner != self.owner {
            return None;
        }
        self.groups.get(id.index)
    }

    pub fn last_group(&self) -> Result<GroupId> {
        match self.groups.len() {
            0 => Err(Error::NoActiveGroup),
            n => Ok(self.handle(n - 1)),
        }
    }

    /// Opens a new group holding one class token.
    pub fn start_class_group(&mut self, body: impl AsRef<str>) -> Result<GroupId> {
        let body = body.as_ref();
        self.check_class(body)?;
        debug!("group {}: class [{}]", self.groups.len(), body);
        Ok(self.push_group(Content::Class(body.to_string())))
    }

    /// Appends `body` to the class of the group's last token.
    pub fn extend_class(&mut self, id: GroupId, body: impl AsRef<str>) -> Result<()> {
        let body = body.as_ref();
        self.check_class(body)?;
        let token = self.last_token_mut(id)?;
        match &mut token.content {
            Content::Class(existing) => existing.push_str(body),
            Content::Fixed(_) => return Err(Error::ConflictingToken(id.index)),
        }
        trace!("group {}: class extended with [{}]", id.index, body);
        Ok(())
    }

    pub fn extend_last_class(&mut self, body: impl AsRef<str>) -> Result<()> {
        let id = self.last_group()?;
        self.extend_class(id, body)
    }

    /// Opens a new group holding one literal alternative.
    pub fn start_literal_group(&mut self, text: &str) -> Result<GroupId> {
        check_literal(text)?;
        debug!("group {}: literal {:?}", self.groups.len(), text);
        Ok(self.push_group(Content::Fixed(text.to_string())))
    }

    /// Adds another `|`-joined alternative to the group.
    pub fn extend_literal(&mut self, id: GroupId, text: &str) -> Result<()> {
        check_literal(text)?;
        let group = self.group_mut(id)?;
        group.tokens.push(Token::new(Content::Fixed(text.to_string())));
        trace!("group {}: alternative {:?}", id.index, text);
        Ok(())
    }

    pub fn extend_last_literal(&mut self, text: &str) -> Result<()> {
        let id = self.last_group()?;
        self.extend_literal(id, text)
    }

    /// Sets the quantifier of the group's last token.
    pub fn apply_quantifier(
        &mut self,
        id: GroupId,
        quantify: impl Into<Quantify>,
        args: &[u32],
    ) -> Result<()> {
        let token = self.last_token_mut(id)?;
        if token.content.is_empty() {
            return Err(Error::EmptyToken);
        }
        let quantifier = Quantifier::new(quantify, args)?;
        token.quantifier = quantifier;
        trace!("group {}: quantifier {:?}", id.index, quantifier);
        Ok(())
    }

    pub fn apply_last_quantifier(
        &mut self,
        quantify: impl Into<Quantify>,
        args: &[u32],
    ) -> Result<()> {
        let id = self.last_group()?;
        self.apply_quantifier(id, quantify, args)
    }

    /// Anchors the group. A group takes at most one anchor.
    pub fn apply_anchor(&mut self, id: GroupId, anchor: Anchor) -> Result<()> {
        let group = self.group_mut(id)?;
        if let Some(existing) = group.anchor {
            return Err(Error::InvalidAnchor(format!(
                "{} (group {} already anchored with {})",
                anchor.symbol(),
                id.index,
                existing.symbol()
            )));
        }
        group.anchor = Some(anchor);
        trace!("group {}: anchor {}", id.index, anchor.symbol());
        Ok(())
    }

    pub fn apply_last_anchor(&mut self, anchor: Anchor) -> Result<()> {
        let id = self.last_group()?;
        self.apply_anchor(id, anchor)
    }

    /// Turns on the flags named by `letters` (e.g. `"im"`) for the group.
    pub fn set_flags(&mut self, id: GroupId, letters: &str) -> Result<()> {
        self.toggle_flags(id, letters, true)
    }

    /// Turns off the flags named by `letters` for the group.
    pub fn clear_flags(&mut self, id: GroupId, letters: &str) -> Result<()> {
        self.toggle_flags(id, letters, false)
    }

    pub fn set_last_flags(&mut self, letters: &str) -> Result<()> {
        let id = self.last_group()?;
        self.set_flags(id, letters)
    }

    pub fn clear_last_flags(&mut self, letters: &str) -> Result<()> {
        let id = self.last_group()?;
        self.clear_flags(id, letters)
    }

    fn toggle_flags(&mut self, id: GroupId, letters: &str, on: bool) -> Result<()> {
        let group = self.group_mut(id)?;
        let flags: Vec<Flag> = Flag::parse_letters(letters)?;
        for flag in flags {
            group.flags.set(flag, on);
        }
        trace!("group {}: flags {:?}", id.index, group.flags);
        Ok(())
    }

    fn check_class(&self, body: &str) -> Result<()> {
        if body.is_empty() || (self.is_safe() && !is_known(body)) {
            return Err(Error::InvalidClass(body.to_string()));
        }
        Ok(())
    }

    fn push_group(&mut self, content: Content) -> GroupId {
        self.groups.push(Group::new(Token::new(content)));
        self.handle(self.groups.len() - 1)
    }

    fn handle(&self, index: usize) -> GroupId {
        GroupId {
            owner: self.owner,
            index,
        }
    }

    fn group_mut(&mut self, id: GroupId) -> Result<&mut Group> {
        if id.owner != self.owner {
            return Err(Error::NoActiveGroup);
        }
        self.groups.get_mut(id.index).ok_or(Error::NoActiveGroup)
    }

    fn last_token_mut(&mut self, id: GroupId) -> Result<&mut Token> {
        self.group_mut(id)?
            .tokens
            .last_mut()
            .ok_or(Error::NoActiveToken(id.index))
    }
}

fn check_literal(text: &str) -> Result<()> {
    match text.bytes().enumerate().find(|(_, b)| !b.is_ascii()) {
        Some((offset, byte)) => Err(Error::InvalidLiteral {
            text: text.to_string(),
            byte,
            offset,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ast::QuantifierKind;
    use crate::expr::class::Class;

    #[test]
    fn options_select_mode() {
        assert!(Expression::from_options(&[]).unwrap().is_safe());
        assert!(Expression::from_options(&["Safe"]).unwrap().is_safe());
        assert!(!Expression::from_options(&["Unsafe"]).unwrap().is_safe());
        assert!(matches!(
            Expression::from_options(&["Unsafe", "Unsafe"]),
            Err(Error::InvalidOption(_))
        ));
        assert!(matches!(
            Expression::from_options(&["Fast"]),
            Err(Error::InvalidOption(_))
        ));
    }

    #[test]
    fn start_class_group_opens_one_token() {
        let mut e = Expression::new();
        let id = e.start_class_group(Class::Uppers).unwrap();
        let group = e.group(id).unwrap();
        assert_eq!(group.tokens().len(), 1);
        assert_eq!(
            group.tokens()[0].content(),
            &Content::Class("A-Z".to_string())
        );
        assert_eq!(group.tokens()[0].quantifier(), Quantifier::None);
    }

    #[test]
    fn safe_mode_rejects_unknown_class() {
        let mut e = Expression::new();
        assert_eq!(
            e.start_class_group("?!"),
            Err(Error::InvalidClass("?!".to_string()))
        );
        assert!(e.is_empty());

        let mut e = Expression::with_mode(Mode::Unsafe);
        assert!(e.start_class_group("?!").is_ok());
    }

    #[test]
    fn empty_class_is_rejected_in_any_mode() {
        let mut e = Expression::with_mode(Mode::Unsafe);
        assert!(matches!(
            e.start_class_group(""),
            Err(Error::InvalidClass(_))
        ));
    }

    #[test]
    fn extend_class_requires_a_group() {
        let mut e = Expression::new();
        assert_eq!(e.extend_last_class(Class::Lowers), Err(Error::NoActiveGroup));
    }

    #[test]
    fn extend_class_concatenates_in_order() {
        let mut e = Expression::new();
        let id = e.start_class_group(Class::Uppers).unwrap();
        e.extend_class(id, Class::Lowers).unwrap();
        e.extend_last_class(Class::Digits).unwrap();
        assert_eq!(
            e.groups()[0].tokens()[0].content(),
            &Content::Class("A-Za-z0-9".to_string())
        );
    }

    #[test]
    fn extend_class_on_literal_conflicts() {
        let mut e = Expression::new();
        e.start_literal_group("com").unwrap();
        assert_eq!(
            e.extend_last_class(Class::Digits),
            Err(Error::ConflictingToken(0))
        );
        assert_eq!(
            e.groups()[0].tokens()[0].content(),
            &Content::Fixed("com".to_string())
        );
    }

    #[test]
    fn literals_must_be_ascii() {
        let mut e = Expression::new();
        assert!(matches!(
            e.start_literal_group("caf\u{e9}"),
            Err(Error::InvalidLiteral {
                byte: 0xc3,
                offset: 3,
                ..
            })
        ));
        assert!(e.is_empty());

        assert_eq!(e.extend_last_literal("net"), Err(Error::NoActiveGroup));
        e.start_literal_group("com").unwrap();
        assert!(e.extend_last_literal("\u{ff}").is_err());
        assert_eq!(e.groups()[0].tokens().len(), 1);
        e.extend_last_literal("net").unwrap();
        assert_eq!(e.groups()[0].tokens().len(), 2);
    }

    #[test]
    fn quantifier_targets_last_token() {
        let mut e = Expression::new();
        e.start_literal_group(".").unwrap();
        e.extend_last_literal("_").unwrap();
        e.apply_last_quantifier(QuantifierKind::ZeroOrOne, &[])
            .unwrap();
        let tokens = e.groups()[0].tokens();
        assert_eq!(tokens[0].quantifier(), Quantifier::None);
        assert_eq!(tokens[1].quantifier(), Quantifier::ZeroOrOne { lazy: false });
    }

    #[test]
    fn quantifier_failures_leave_token_unchanged() {
        let mut e = Expression::new();
        assert_eq!(
            e.apply_last_quantifier(QuantifierKind::OneOrMore, &[]),
            Err(Error::NoActiveGroup)
        );

        e.start_literal_group("n").unwrap();
        assert!(matches!(
            e.apply_last_quantifier(QuantifierKind::MinToMax, &[2]),
            Err(Error::ArityMismatch { .. })
        ));
        assert_eq!(
            e.apply_last_quantifier(QuantifierKind::MinToMax, &[3, 2]),
            Err(Error::InvalidRange { min: 3, max: 2 })
        );
        assert_eq!(e.groups()[0].tokens()[0].quantifier(), Quantifier::None);
    }

    #[test]
    fn empty_literal_cannot_be_quantified() {
        let mut e = Expression::new();
        e.start_literal_group("").unwrap();
        assert_eq!(
            e.apply_last_quantifier(QuantifierKind::OneOrMore, &[]),
            Err(Error::EmptyToken)
        );
    }

    #[test]
    fn anchor_is_set_once() {
        let mut e = Expression::new();
        assert_eq!(e.apply_last_anchor(Anchor::Start), Err(Error::NoActiveGroup));
        e.start_literal_group("a").unwrap();
        e.apply_last_anchor(Anchor::Start).unwrap();
        assert!(matches!(
            e.apply_last_anchor(Anchor::End),
            Err(Error::InvalidAnchor(_))
        ));
        assert_eq!(e.groups()[0].anchor(), Some(Anchor::Start));
    }

    #[test]
    fn flags_toggle_on_own_group() {
        let mut e = Expression::new();
        assert_eq!(e.set_last_flags("i"), Err(Error::NoActiveGroup));
        let first = e.start_literal_group("a").unwrap();
        e.start_literal_group("b").unwrap();
        e.set_flags(first, "is").unwrap();
        e.clear_flags(first, "s").unwrap();
        assert_eq!(
            e.set_last_flags("iq"),
            Err(Error::InvalidFlag("q".to_string()))
        );

        let flags = e.groups()[0].flags();
        assert!(flags.case_insensitive);
        assert!(!flags.dot_matches_new_line);
        assert_eq!(e.groups()[1].flags(), crate::expr::ast::Flags::default());
    }

    #[test]
    fn handles_from_another_expression_are_rejected() {
        let mut big = Expression::new();
        big.start_literal_group("a").unwrap();
        let foreign = big.start_literal_group("b").unwrap();

        let mut small = Expression::new();
        small.start_literal_group("c").unwrap();
        assert_eq!(small.extend_literal(foreign, "d"), Err(Error::NoActiveGroup));
    }

    #[test]
    fn in_range_handle_from_another_expression_is_rejected() {
        let mut other = Expression::new();
        let foreign = other.start_literal_group("a").unwrap();

        let mut e = Expression::new();
        e.start_literal_group("b").unwrap();
        assert_eq!(foreign.index(), 0);
        assert_eq!(e.extend_literal(foreign, "c"), Err(Error::NoActiveGroup));
        assert_eq!(
            e.apply_anchor(foreign, Anchor::Start),
            Err(Error::NoActiveGroup)
        );
        assert!(e.group(foreign).is_none());
        assert_eq!(e.groups()[0].tokens().len(), 1);
        assert_eq!(e.groups()[0].anchor(), None);
    }

    #[test]
    fn handles_stay_valid_on_clones() {
        let mut e = Expression::new();
        let id = e.start_literal_group("a").unwrap();
        let mut copy = e.clone();
        copy.extend_literal(id, "b").unwrap();
        assert_eq!(copy.groups()[0].tokens().len(), 2);
        assert_eq!(e.groups()[0].tokens().len(), 1);
    }

    #[test]
    fn extend_class_checks_body_before_mutating() {
        let mut e = Expression::new();
        e.start_class_group(Class::Uppers).unwrap();
        assert_eq!(
            e.extend_last_class("?!"),
            Err(Error::InvalidClass("?!".to_string()))
        );
        assert_eq!(
            e.groups()[0].tokens()[0].content(),
            &Content::Class("A-Z".to_string())
        );

        let mut e = Expression::with_mode(Mode::Unsafe);
        e.start_class_group("x").unwrap();
        assert_eq!(
            e.extend_last_class(""),
            Err(Error::InvalidClass(String::new()))
        );
        e.extend_last_class("?!").unwrap();
        assert_eq!(
            e.groups()[0].tokens()[0].content(),
            &Content::Class("x?!".to_string())
        );
    }
}
