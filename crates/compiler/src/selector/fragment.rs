use std::fmt::{self, Display, Write};

use crate::common::QuoteKind;

use super::Attribute;

/// An explicit combinator between two compound selectors
///
/// The descendant combinator has no token of its own; it is represented by a
/// [`SelectorFragment::Whitespace`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum Combinator {
    /// `>`
    Child,

    /// `+`
    NextSibling,

    /// `~`
    FollowingSibling,
}

impl Combinator {
    pub fn as_char(self) -> char {
        match self {
            Self::Child => '>',
            Self::NextSibling => '+',
            Self::FollowingSibling => '~',
        }
    }
}

/// A pseudo-class or pseudo-element, e.g. `:hover`, `::before` or `:not(.a)`
///
/// The argument is kept as whitespace-normalized source text. It is only ever
/// re-parsed when it is the argument of an `:extend(...)` marker.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Pseudo {
    pub name: Box<str>,
    pub is_element: bool,
    pub argument: Option<Box<str>>,
}

impl Pseudo {
    pub fn is_extend(&self) -> bool {
        !self.is_element && self.name.eq_ignore_ascii_case("extend") && self.argument.is_some()
    }
}

impl Display for Pseudo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(':')?;
        if self.is_element {
            f.write_char(':')?;
        }
        f.write_str(&self.name)?;
        if let Some(argument) = &self.argument {
            write!(f, "({})", argument)?;
        }
        Ok(())
    }
}

/// One atom of a selector
#[derive(Clone, Debug)]
pub(crate) enum SelectorFragment {
    /// An element name, `*`, or a namespaced name such as `svg|rect`
    Type(Box<str>),

    /// `#name`
    Id(Box<str>),

    /// `.name`
    Class(Box<str>),

    /// `%name`. Selectors containing one are never emitted.
    Placeholder(Box<str>),

    Attribute(Box<Attribute>),

    Pseudo(Pseudo),

    Combinator(Combinator),

    /// `&`, the nesting reference. A suffix such as the `__elem` of `&__elem`
    /// is glued onto the last name of the substituted parent.
    Nesting { suffix: Option<Box<str>> },

    String { text: Box<str>, quote: QuoteKind },

    /// The descendant combinator
    Whitespace,

    /// `#{...}` or `@{...}`, kept verbatim
    Interpolation(Box<str>),
}

impl SelectorFragment {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }

    pub fn is_nesting(&self) -> bool {
        matches!(self, Self::Nesting { .. })
    }

    pub fn is_combinator(&self) -> bool {
        matches!(self, Self::Combinator(..))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(..))
    }

    /// Appends `suffix` to this fragment's name, if it has one
    pub fn push_suffix(&mut self, suffix: &str) -> bool {
        match self {
            Self::Type(name) | Self::Id(name) | Self::Class(name) | Self::Placeholder(name) => {
                let mut joined = String::with_capacity(name.len() + suffix.len());
                joined.push_str(name);
                joined.push_str(suffix);
                *name = joined.into_boxed_str();
                true
            }
            _ => false,
        }
    }

    /// Writes the fragment's text. Spacing around combinators is the caller's
    /// concern, since it depends on the neighbouring fragments.
    pub fn write(&self, buf: &mut String) {
        match self {
            Self::Type(name) => buf.push_str(name),
            Self::Id(name) => {
                buf.push('#');
                buf.push_str(name);
            }
            Self::Class(name) => {
                buf.push('.');
                buf.push_str(name);
            }
            Self::Placeholder(name) => {
                buf.push('%');
                buf.push_str(name);
            }
            Self::Attribute(attr) => {
                let _ = write!(buf, "{}", attr);
            }
            Self::Pseudo(pseudo) => {
                let _ = write!(buf, "{}", pseudo);
            }
            Self::Combinator(combinator) => buf.push(combinator.as_char()),
            Self::Nesting { suffix } => {
                buf.push('&');
                if let Some(suffix) = suffix {
                    buf.push_str(suffix);
                }
            }
            Self::String { text, quote } => {
                let _ = write!(buf, "{}{}{}", quote, text, quote);
            }
            Self::Whitespace => buf.push(' '),
            Self::Interpolation(raw) => buf.push_str(raw),
        }
    }
}

/// Strings compare by their unquoted text, attributes ignore the quoting of
/// their value, and whitespace always equals whitespace. Everything else
/// compares by its written form.
impl PartialEq for SelectorFragment {
    fn eq(&self, other: &Self) -> bool {
        match self {
            Self::Type(a) => matches!(other, Self::Type(b) if a == b),
            Self::Id(a) => matches!(other, Self::Id(b) if a == b),
            Self::Class(a) => matches!(other, Self::Class(b) if a == b),
            Self::Placeholder(a) => matches!(other, Self::Placeholder(b) if a == b),
            Self::Attribute(a) => matches!(other, Self::Attribute(b) if a == b),
            Self::Pseudo(a) => matches!(other, Self::Pseudo(b) if a == b),
            Self::Combinator(a) => matches!(other, Self::Combinator(b) if a == b),
            Self::Nesting { suffix: a } => matches!(other, Self::Nesting { suffix: b } if a == b),
            Self::String { text: a, .. } => matches!(other, Self::String { text: b, .. } if a == b),
            Self::Whitespace => matches!(other, Self::Whitespace),
            Self::Interpolation(a) => matches!(other, Self::Interpolation(b) if a == b),
        }
    }
}

impl Eq for SelectorFragment {}
