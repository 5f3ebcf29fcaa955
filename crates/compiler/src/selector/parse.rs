use codemap::Span;

use crate::{
    common::QuoteKind,
    error::GroutResult,
    lexer::Lexer,
    parse::BaseParser,
    utils::{collapse_whitespace, is_name, is_name_start},
    Token,
};

use super::{Attribute, Combinator, Pseudo, Selector, SelectorFragment};

/// Splits selector text into fragments
///
/// Only the shape of each fragment is recognized. Nothing here checks that
/// the result is a meaningful CSS selector.
pub(crate) struct SelectorParser {
    /// Whether this parser allows the parent selector `&`.
    allows_parent: bool,

    /// Whether this parser allows placeholder selectors beginning with `%`.
    allows_placeholder: bool,

    pub toks: Lexer,

    span: Span,
}

impl BaseParser for SelectorParser {
    fn toks(&self) -> &Lexer {
        &self.toks
    }

    fn toks_mut(&mut self) -> &mut Lexer {
        &mut self.toks
    }
}

impl SelectorParser {
    pub fn new(toks: Lexer, allows_parent: bool, allows_placeholder: bool, span: Span) -> Self {
        Self {
            toks,
            allows_parent,
            allows_placeholder,
            span,
        }
    }

    pub fn from_text(text: &str, allows_parent: bool, allows_placeholder: bool, span: Span) -> Self {
        Self::new(
            Lexer::new_from_string(text, span),
            allows_parent,
            allows_placeholder,
            span,
        )
    }

    /// Parse a comma-separated selector list
    pub fn parse(mut self) -> GroutResult<Vec<Selector>> {
        let mut selectors = Vec::new();

        loop {
            let selector = self.parse_selector()?;

            if selector.is_empty() {
                return Err(("expected selector.", self.span).into());
            }

            selectors.push(selector);

            if !self.scan_char(',') {
                break;
            }
        }

        if self.toks.peek().is_some() {
            return Err(("expected selector.", self.toks.current_span()).into());
        }

        Ok(selectors)
    }

    fn parse_selector(&mut self) -> GroutResult<Selector> {
        let mut fragments = Vec::new();

        while let Some(tok) = self.toks.peek() {
            let fragment = match tok.kind {
                ',' => break,
                ' ' | '\t' | '\n' => {
                    self.whitespace_without_comments();
                    SelectorFragment::Whitespace
                }
                '/' if self.next_matches("/*") => {
                    self.skip_loud_comment()?;
                    SelectorFragment::Whitespace
                }
                '>' => self.parse_combinator(Combinator::Child),
                '+' => self.parse_combinator(Combinator::NextSibling),
                '~' => self.parse_combinator(Combinator::FollowingSibling),
                '&' => self.parse_nesting()?,
                '.' => {
                    self.toks.next();
                    SelectorFragment::Class(self.parse_name()?.into_boxed_str())
                }
                '#' | '@' if self.looking_at_interpolation() => self.parse_interpolated_name()?,
                '#' => {
                    self.toks.next();
                    SelectorFragment::Id(self.parse_name()?.into_boxed_str())
                }
                '%' => {
                    if !self.allows_placeholder {
                        return Err((
                            "Placeholder selectors aren't allowed here.",
                            self.toks.current_span(),
                        )
                            .into());
                    }
                    self.toks.next();
                    SelectorFragment::Placeholder(self.parse_name()?.into_boxed_str())
                }
                '*' => {
                    self.toks.next();
                    self.parse_type_selector("*".to_owned())?
                }
                '|' => {
                    self.toks.next();
                    let name = format!("|{}", self.parse_name()?);
                    SelectorFragment::Type(name.into_boxed_str())
                }
                ':' => SelectorFragment::Pseudo(self.parse_pseudo()?),
                '[' => {
                    self.toks.next();
                    SelectorFragment::Attribute(Box::new(Attribute::from_tokens(self)?))
                }
                q @ ('"' | '\'') => SelectorFragment::String {
                    text: self.parse_string()?.into_boxed_str(),
                    quote: QuoteKind::from_char(q),
                },
                c if is_name_start(c) || c == '-' || c == '\\' => {
                    let name = self.parse_name()?;
                    self.parse_type_selector(name)?
                }
                _ => return Err(("expected selector.", self.toks.current_span()).into()),
            };

            fragments.push(fragment);
        }

        Ok(Selector::new(fragments))
    }

    fn parse_combinator(&mut self, combinator: Combinator) -> SelectorFragment {
        self.toks.next();
        SelectorFragment::Combinator(combinator)
    }

    fn parse_nesting(&mut self) -> GroutResult<SelectorFragment> {
        if !self.allows_parent {
            return Err((
                "Parent selectors aren't allowed here.",
                self.toks.current_span(),
            )
                .into());
        }

        self.expect_char('&')?;

        let suffix = if self.looking_at_name_char() {
            Some(self.parse_name()?.into_boxed_str())
        } else {
            None
        };

        Ok(SelectorFragment::Nesting { suffix })
    }

    /// `name` or `ns|name`
    fn parse_type_selector(&mut self, mut name: String) -> GroutResult<SelectorFragment> {
        if self.toks.next_char_is('|')
            && !matches!(self.toks.peek_n(1), Some(Token { kind: '=', .. }))
        {
            self.toks.next();
            name.push('|');
            if self.scan_char('*') {
                name.push('*');
            } else {
                name.push_str(&self.parse_name()?);
            }
        }

        Ok(SelectorFragment::Type(name.into_boxed_str()))
    }

    fn parse_interpolated_name(&mut self) -> GroutResult<SelectorFragment> {
        let interpolation = self.parse_raw_interpolation()?;

        if self.looking_at_name_char() {
            let name = format!("{}{}", interpolation, self.parse_name()?);
            return Ok(SelectorFragment::Type(name.into_boxed_str()));
        }

        Ok(SelectorFragment::Interpolation(
            interpolation.into_boxed_str(),
        ))
    }

    fn parse_pseudo(&mut self) -> GroutResult<Pseudo> {
        self.expect_char(':')?;
        let is_element = self.scan_char(':');
        let name = self.parse_name()?.into_boxed_str();

        let argument = if self.scan_char('(') {
            Some(self.parse_pseudo_argument()?.into_boxed_str())
        } else {
            None
        };

        Ok(Pseudo {
            name,
            is_element,
            argument,
        })
    }

    /// The raw text up to the `)` balancing an already consumed `(`
    fn parse_pseudo_argument(&mut self) -> GroutResult<String> {
        let start = self.toks.cursor();
        let mut depth = 0_usize;

        loop {
            match self.toks.peek() {
                Some(Token {
                    kind: '"' | '\'', ..
                }) => {
                    self.parse_string()?;
                }
                Some(Token { kind: '(', .. }) => {
                    depth += 1;
                    self.toks.next();
                }
                Some(Token { kind: ')', .. }) => {
                    if depth == 0 {
                        let raw = self.toks.raw_text(start);
                        self.toks.next();
                        return Ok(collapse_whitespace(&raw));
                    }
                    depth -= 1;
                    self.toks.next();
                }
                Some(..) => {
                    self.toks.next();
                }
                None => return Err(("expected \")\".", self.toks.current_span()).into()),
            }
        }
    }

    /// An identifier that may contain escapes and interpolation
    pub(super) fn parse_name(&mut self) -> GroutResult<String> {
        let mut name = String::new();

        loop {
            match self.toks.peek() {
                Some(Token {
                    kind: '#' | '@', ..
                }) if self.looking_at_interpolation() => {
                    name.push_str(&self.parse_raw_interpolation()?);
                }
                Some(Token { kind: '\\', .. }) => {
                    let escape = self.parse_raw_escape()?;
                    name.push_str(&escape);
                }
                Some(Token { kind, .. }) if is_name(kind) => {
                    self.toks.next();
                    name.push(kind);
                }
                Some(..) | None => break,
            }
        }

        if name.is_empty() {
            return Err(("Expected identifier.", self.toks.current_span()).into());
        }

        Ok(name)
    }

    /// Attribute values may be written without quotes: `[data-size=2]`
    pub(super) fn parse_bare_attribute_value(&mut self) -> GroutResult<String> {
        let mut value = String::new();

        while let Some(tok) = self.toks.peek() {
            if tok.kind == ']' || tok.kind.is_ascii_whitespace() {
                break;
            }

            if tok.kind == '\\' {
                let escape = self.parse_raw_escape()?;
                value.push_str(&escape);
            } else {
                self.toks.next();
                value.push(tok.kind);
            }
        }

        if value.is_empty() {
            return Err(("Expected identifier.", self.toks.current_span()).into());
        }

        Ok(value)
    }

    fn looking_at_name_char(&self) -> bool {
        match self.toks.peek() {
            Some(Token { kind, .. }) => is_name(kind) || kind == '\\' || self.looking_at_interpolation(),
            None => false,
        }
    }
}

#[cfg(test)]
mod test {
    use codemap::CodeMap;

    use super::SelectorParser;
    use crate::{
        error::GroutResult,
        selector::{AttributeOp, Selector, SelectorFragment},
    };

    fn parse(text: &str) -> GroutResult<Vec<Selector>> {
        let mut map = CodeMap::new();
        let file = map.add_file("test".to_owned(), text.to_owned());
        SelectorParser::from_text(text, true, true, file.span).parse()
    }

    #[test]
    fn splits_top_level_commas_only() {
        let list = parse("a, :not(.b, .c), [d=\",\"]").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].to_string(), ":not(.b, .c)");
        assert_eq!(list[2].to_string(), "[d=\",\"]");
    }

    #[test]
    fn recognizes_fragment_kinds() {
        let list = parse("svg|rect#id.class%ph[x~='y' i]::before").unwrap();
        let fragments = list[0].fragments();
        assert!(matches!(&fragments[0], SelectorFragment::Type(name) if &**name == "svg|rect"));
        assert!(matches!(&fragments[1], SelectorFragment::Id(name) if &**name == "id"));
        assert!(matches!(&fragments[2], SelectorFragment::Class(name) if &**name == "class"));
        assert!(matches!(&fragments[3], SelectorFragment::Placeholder(name) if &**name == "ph"));
        assert!(matches!(
            &fragments[4],
            SelectorFragment::Attribute(attr) if attr.op == AttributeOp::Include && attr.modifier == Some('i')
        ));
        assert!(matches!(&fragments[5], SelectorFragment::Pseudo(p) if p.is_element));
    }

    #[test]
    fn nesting_with_suffix() {
        let list = parse("&__elem &").unwrap();
        let fragments = list[0].fragments();
        assert!(matches!(
            &fragments[0],
            SelectorFragment::Nesting { suffix: Some(s) } if &**s == "__elem"
        ));
        assert!(fragments[1].is_whitespace());
        assert!(matches!(&fragments[2], SelectorFragment::Nesting { suffix: None }));
    }

    #[test]
    fn interpolation_is_kept_verbatim() {
        let list = parse("#{$sel} .a-@{name}").unwrap();
        assert!(matches!(
            &list[0].fragments()[0],
            SelectorFragment::Interpolation(raw) if &**raw == "#{$sel}"
        ));
        assert_eq!(list[0].to_string(), "#{$sel} .a-@{name}");
    }

    #[test]
    fn empty_members_are_rejected() {
        assert!(parse("a,,b").is_err());
        assert!(parse("a,").is_err());
        assert!(parse("a {").is_err());
    }
}
