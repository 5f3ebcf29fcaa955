use phf::phf_set;

use crate::{ast::*, error::GroutResult, lexer::Lexer, selector::MarkerKind, InputSyntax, Token};

use super::{BaseParser, StylesheetParser};

/// At-rules that need an evaluator for control flow, mixins, functions or
/// modules
static UNSUPPORTED_AT_RULES: phf::Set<&'static str> = phf_set! {
    "content",
    "each",
    "else",
    "for",
    "forward",
    "function",
    "if",
    "include",
    "mixin",
    "return",
    "use",
    "while",
};

pub(crate) struct ScssParser {
    pub toks: Lexer,
}

impl ScssParser {
    pub fn new(toks: Lexer) -> Self {
        ScssParser { toks }
    }

    fn parse_at_rule(&mut self) -> GroutResult<Option<AstStmt>> {
        let start = self.toks.cursor();
        let name = self.parse_at_rule_name()?;

        if UNSUPPORTED_AT_RULES.contains(name.to_ascii_lowercase().as_str()) {
            return Err((
                format!("@{} rules are not supported.", name),
                self.toks.span_from(start),
            )
                .into());
        }

        Ok(Some(match name.as_str() {
            "at-root" => self.parse_at_root_rule(start)?,
            "debug" => {
                let (value, span) = self.parse_message()?;
                AstStmt::Debug(AstDebugRule { value, span })
            }
            "error" => {
                let (value, span) = self.parse_message()?;
                AstStmt::ErrorRule(AstErrorRule { value, span })
            }
            "extend" => self.parse_extend_rule(start)?,
            "media" => self.parse_media_rule(start)?,
            "warn" => {
                let (value, span) = self.parse_message()?;
                AstStmt::Warn(AstWarn { value, span })
            }
            _ => self.parse_unknown_at_rule(name, start)?,
        }))
    }

    fn parse_at_root_rule(&mut self, start: usize) -> GroutResult<AstStmt> {
        if self.toks.next_char_is('(') {
            return Err((
                "@at-root queries are not supported.",
                self.toks.current_span(),
            )
                .into());
        }

        let body = if self.toks.next_char_is('{') {
            self.parse_children()?
        } else {
            let selector_start = self.toks.cursor();
            let selector = self.scan_statement_text()?;

            if !self.toks.next_char_is('{') {
                return Err(("expected \"{\".", self.toks.current_span()).into());
            }

            vec![self.parse_style_rule(selector, selector_start)?]
        };

        Ok(AstStmt::AtRootRule(AstAtRootRule {
            body,
            span: self.toks.span_from(start),
        }))
    }

    fn parse_extend_rule(&mut self, start: usize) -> GroutResult<AstStmt> {
        let text = self.scan_statement_text()?;
        let mut value = text.trim();

        if let Some(idx) = value.rfind('!') {
            if value[idx + 1..].trim().eq_ignore_ascii_case("optional") {
                value = value[..idx].trim_end();
            }
        }

        if value.is_empty() {
            return Err(("Expected selector.", self.toks.current_span()).into());
        }

        let value = value.to_owned();
        let span = self.toks.span_from(start);

        self.expect_statement_separator()?;

        Ok(AstStmt::Extend(AstExtendRule {
            value,
            kind: MarkerKind::Scss,
            span,
        }))
    }

    /// `$name: value;` is evaluated elsewhere and produces no CSS
    fn skip_variable_declaration(&mut self) -> GroutResult<()> {
        self.expect_char('$')?;
        self.parse_identifier()?;
        self.whitespace()?;
        self.expect_char(':')?;
        self.scan_statement_text()?;

        if self.toks.next_char_is('{') {
            return Err(("expected \";\".", self.toks.current_span()).into());
        }

        self.expect_statement_separator()
    }
}

impl BaseParser for ScssParser {
    fn toks(&self) -> &Lexer {
        &self.toks
    }

    fn toks_mut(&mut self) -> &mut Lexer {
        &mut self.toks
    }
}

impl StylesheetParser for ScssParser {
    fn syntax(&self) -> InputSyntax {
        InputSyntax::Scss
    }

    fn parse_statement(&mut self) -> GroutResult<Option<AstStmt>> {
        match self.toks.peek() {
            Some(Token { kind: '@', .. }) if !self.looking_at_interpolation() => {
                self.parse_at_rule()
            }
            Some(Token { kind: '$', .. }) => {
                self.skip_variable_declaration()?;
                Ok(None)
            }
            _ => Ok(Some(self.parse_declaration_or_style_rule()?)),
        }
    }
}
