use phf::phf_set;

use crate::{ast::*, error::GroutResult, lexer::Lexer, selector::MarkerKind, InputSyntax, Token};

use super::{BaseParser, StylesheetParser};

/// CSS at-rules. Any other `@name:` starts a variable declaration, so this is
/// what tells `@page :first {}` apart from `@page: 1;`.
static CSS_AT_RULES: phf::Set<&'static str> = phf_set! {
    "charset",
    "container",
    "counter-style",
    "document",
    "font-face",
    "font-feature-values",
    "import",
    "keyframes",
    "layer",
    "media",
    "namespace",
    "page",
    "property",
    "supports",
    "viewport",
};

pub(crate) struct LessParser {
    pub toks: Lexer,
}

impl LessParser {
    pub fn new(toks: Lexer) -> Self {
        LessParser { toks }
    }

    fn parse_at_rule(&mut self) -> GroutResult<Option<AstStmt>> {
        let start = self.toks.cursor();
        let name = self.parse_at_rule_name()?;

        if self.toks.next_char_is(':') && !CSS_AT_RULES.contains(name.to_ascii_lowercase().as_str())
        {
            self.skip_variable_declaration()?;
            return Ok(None);
        }

        Ok(Some(match name.as_str() {
            "media" => self.parse_media_rule(start)?,
            _ => self.parse_unknown_at_rule(name, start)?,
        }))
    }

    /// `@name: value;` or a detached ruleset `@name: { ... }`. Neither
    /// produces CSS where it is declared.
    fn skip_variable_declaration(&mut self) -> GroutResult<()> {
        self.expect_char(':')?;
        self.whitespace()?;

        if self.toks.next_char_is('{') {
            self.parse_children()?;
            return Ok(());
        }

        self.scan_statement_text()?;

        if self.toks.next_char_is('{') {
            return Err(("expected \";\".", self.toks.current_span()).into());
        }

        self.expect_statement_separator()
    }

    /// `&:extend(...);` in a rule body. Returns `None`, without consuming
    /// anything, if this turns out to be a nested rule such as
    /// `&:extend(.a) { ... }`.
    fn try_parse_extend_declaration(&mut self) -> GroutResult<Option<AstStmt>> {
        let start = self.toks.cursor();

        if !self.scan("&:extend(") {
            return Ok(None);
        }

        let argument_start = self.toks.cursor();
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
                Some(Token { kind: ')', .. }) if depth == 0 => break,
                Some(Token { kind: ')', .. }) => {
                    depth -= 1;
                    self.toks.next();
                }
                Some(..) => {
                    self.toks.next();
                }
                None => return Err(("expected \")\".", self.toks.current_span()).into()),
            }
        }

        let value = self.toks.raw_text(argument_start);
        self.expect_char(')')?;
        let span = self.toks.span_from(start);
        self.whitespace_without_comments();

        if !matches!(
            self.toks.peek(),
            Some(Token {
                kind: ';' | '}',
                ..
            }) | None
        ) {
            self.toks.set_cursor(start);
            return Ok(None);
        }

        self.expect_statement_separator()?;

        Ok(Some(AstStmt::Extend(AstExtendRule {
            value,
            kind: MarkerKind::Less,
            span,
        })))
    }
}

impl BaseParser for LessParser {
    fn toks(&self) -> &Lexer {
        &self.toks
    }

    fn toks_mut(&mut self) -> &mut Lexer {
        &mut self.toks
    }
}

impl StylesheetParser for LessParser {
    fn syntax(&self) -> InputSyntax {
        InputSyntax::Less
    }

    fn parse_statement(&mut self) -> GroutResult<Option<AstStmt>> {
        match self.toks.peek() {
            Some(Token { kind: '@', .. }) if !self.looking_at_interpolation() => {
                self.parse_at_rule()
            }
            Some(Token { kind: '&', .. }) => match self.try_parse_extend_declaration()? {
                Some(extend) => Ok(Some(extend)),
                None => Ok(Some(self.parse_declaration_or_style_rule()?)),
            },
            _ => Ok(Some(self.parse_declaration_or_style_rule()?)),
        }
    }

    /// `.mixin();`, `#ns > .mixin;` and so on
    fn is_mixin_call(&self, text: &str) -> bool {
        (text.starts_with('.') || text.starts_with('#')) && !text.starts_with("#{")
    }
}
