use std::fmt::{self, Display, Write};

use crate::{common::QuoteKind, error::GroutResult, parse::BaseParser, Token};

use super::SelectorParser;

/// `[name]`, `[name=value]`, `[name~="value" i]`, ...
#[derive(Clone, Debug)]
pub(crate) struct Attribute {
    pub name: Box<str>,
    pub op: AttributeOp,
    pub value: Option<Box<str>>,
    pub quote: QuoteKind,
    pub modifier: Option<char>,
}

/// Name, operator and value. How the value was quoted does not matter.
impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.op == other.op && self.value == other.value
    }
}

impl Eq for Attribute {}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum AttributeOp {
    /// \[attr\]
    Any,

    /// \[attr=value\]
    Equals,

    /// \[attr~=value\]
    Include,

    /// \[attr|=value\]
    Dash,

    /// \[attr^=value\]
    Prefix,

    /// \[attr$=value\]
    Suffix,

    /// \[attr*=value\]
    Contains,
}

impl Display for AttributeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => Ok(()),
            Self::Equals => f.write_str("="),
            Self::Include => f.write_str("~="),
            Self::Dash => f.write_str("|="),
            Self::Prefix => f.write_str("^="),
            Self::Suffix => f.write_str("$="),
            Self::Contains => f.write_str("*="),
        }
    }
}

fn attribute_operator(parser: &mut SelectorParser) -> GroutResult<AttributeOp> {
    let op = match parser.toks.next() {
        Some(Token { kind: '=', .. }) => return Ok(AttributeOp::Equals),
        Some(Token { kind: '~', .. }) => AttributeOp::Include,
        Some(Token { kind: '|', .. }) => AttributeOp::Dash,
        Some(Token { kind: '^', .. }) => AttributeOp::Prefix,
        Some(Token { kind: '$', .. }) => AttributeOp::Suffix,
        Some(Token { kind: '*', .. }) => AttributeOp::Contains,
        Some(..) | None => return Err(("Expected \"]\".", parser.toks.prev_span()).into()),
    };

    parser.expect_char('=')?;

    Ok(op)
}

impl Attribute {
    /// Parses the remainder of an attribute selector. The opening `[` has
    /// already been consumed.
    pub fn from_tokens(parser: &mut SelectorParser) -> GroutResult<Attribute> {
        parser.whitespace()?;

        let mut name = String::new();
        if parser.scan_char('*') {
            name.push('*');
            parser.expect_char('|')?;
            name.push('|');
        }
        name.push_str(&parser.parse_name()?);

        // `ns|attr`, but not `attr|=value`
        if parser.toks.next_char_is('|')
            && !matches!(parser.toks.peek_n(1), Some(Token { kind: '=', .. }))
        {
            parser.toks.next();
            name.push('|');
            name.push_str(&parser.parse_name()?);
        }

        parser.whitespace()?;

        if parser.scan_char(']') {
            return Ok(Attribute {
                name: name.into_boxed_str(),
                op: AttributeOp::Any,
                value: None,
                quote: QuoteKind::None,
                modifier: None,
            });
        }

        let op = attribute_operator(parser)?;

        parser.whitespace()?;

        let (value, quote) = match parser.toks.peek() {
            Some(Token {
                kind: q @ ('"' | '\''),
                ..
            }) => (parser.parse_string()?, QuoteKind::from_char(q)),
            _ => (parser.parse_bare_attribute_value()?, QuoteKind::None),
        };

        parser.whitespace()?;

        let modifier = match parser.toks.peek() {
            Some(Token { kind, .. }) if kind.is_ascii_alphabetic() => {
                parser.toks.next();
                parser.whitespace()?;
                Some(kind)
            }
            _ => None,
        };

        parser.expect_char(']')?;

        Ok(Attribute {
            name: name.into_boxed_str(),
            op,
            value: Some(value.into_boxed_str()),
            quote,
            modifier,
        })
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        f.write_str(&self.name)?;

        if let Some(value) = &self.value {
            write!(f, "{}{}{}{}", self.op, self.quote, value, self.quote)?;
        }

        if let Some(modifier) = self.modifier {
            f.write_char(' ')?;
            f.write_char(modifier)?;
        }

        f.write_char(']')
    }
}
