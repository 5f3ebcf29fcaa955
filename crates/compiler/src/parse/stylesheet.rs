use codemap::Span;

use crate::{
    ast::*,
    error::GroutResult,
    utils::{collapse_whitespace, opposite_bracket},
    InputSyntax, Token,
};

use super::BaseParser;

/// Statement parsing shared by both dialects.
///
/// Selectors, declaration values and at-rule parameters are not evaluated.
/// They are captured as text, with interpolation left in place, up to the
/// first `{`, `;` or `}` that is not nested in brackets or quotes.
pub(crate) trait StylesheetParser: BaseParser + Sized {
    fn syntax(&self) -> InputSyntax;

    /// Parse one statement that is neither a comment nor an empty `;`.
    /// Returns `None` for statements that produce nothing, such as variable
    /// declarations.
    fn parse_statement(&mut self) -> GroutResult<Option<AstStmt>>;

    /// Whether statement text that is not followed by a block should be
    /// rejected as a mixin call instead of being parsed as a declaration
    fn is_mixin_call(&self, _text: &str) -> bool {
        false
    }

    // todo: rename
    fn __parse(&mut self) -> GroutResult<StyleSheet> {
        let mut style_sheet = StyleSheet::new(self.syntax());

        // Allow a byte-order mark at the beginning of the document.
        self.scan_char('\u{feff}');

        style_sheet.body = self.parse_statements()?;

        Ok(style_sheet)
    }

    fn parse_statements(&mut self) -> GroutResult<Vec<AstStmt>> {
        let mut stmts = Vec::new();

        loop {
            self.whitespace_without_comments();

            let tok = match self.toks().peek() {
                Some(tok) => tok,
                None => break,
            };

            match tok.kind {
                '/' if self.next_matches("//") => self.skip_silent_comment()?,
                '/' if self.next_matches("/*") => {
                    stmts.push(AstStmt::LoudComment(self.parse_loud_comment()?));
                }
                ';' => {
                    self.toks_mut().next();
                }
                '}' => return Err(("unmatched \"}\".", self.toks().current_span()).into()),
                _ => {
                    if let Some(stmt) = self.parse_statement()? {
                        stmts.push(stmt);
                    }
                }
            }
        }

        Ok(stmts)
    }

    fn parse_children(&mut self) -> GroutResult<Vec<AstStmt>> {
        self.expect_char('{')?;
        let mut children = Vec::new();

        loop {
            self.whitespace_without_comments();

            let tok = match self.toks().peek() {
                Some(tok) => tok,
                None => return Err(("expected \"}\".", self.toks().current_span()).into()),
            };

            match tok.kind {
                '/' if self.next_matches("//") => self.skip_silent_comment()?,
                '/' if self.next_matches("/*") => {
                    children.push(AstStmt::LoudComment(self.parse_loud_comment()?));
                }
                ';' => {
                    self.toks_mut().next();
                }
                '}' => {
                    self.toks_mut().next();
                    break;
                }
                _ => {
                    if let Some(stmt) = self.parse_statement()? {
                        children.push(stmt);
                    }
                }
            }
        }

        Ok(children)
    }

    fn parse_loud_comment(&mut self) -> GroutResult<AstLoudComment> {
        let start = self.toks().cursor();
        self.skip_loud_comment()?;

        Ok(AstLoudComment {
            text: self.toks().raw_text(start),
            span: self.toks().span_from(start),
        })
    }

    /// Consume text up to the end of the current statement or the start of
    /// its block. The terminating token is not consumed.
    fn scan_statement_text(&mut self) -> GroutResult<String> {
        let mut buffer = String::new();
        let mut brackets = Vec::new();

        while let Some(tok) = self.toks().peek() {
            match tok.kind {
                '{' | ';' | '}' if brackets.is_empty() => break,
                '"' | '\'' => buffer.push_str(&self.fallible_raw_text(Self::parse_string)?),
                '/' if self.next_matches("/*") => {
                    self.skip_loud_comment()?;
                    buffer.push(' ');
                }
                '/' if brackets.is_empty() && self.next_matches("//") => {
                    self.skip_silent_comment()?;
                    buffer.push(' ');
                }
                '#' | '@' if self.looking_at_interpolation() => {
                    buffer.push_str(&self.parse_raw_interpolation()?);
                }
                '\\' => {
                    self.toks_mut().next();
                    buffer.push('\\');
                    if let Some(escaped) = self.toks_mut().next() {
                        buffer.push(escaped.kind);
                    }
                }
                '(' | '[' | '{' => {
                    self.toks_mut().next();
                    buffer.push(tok.kind);
                    brackets.push(opposite_bracket(tok.kind));
                }
                ')' | ']' | '}' => {
                    self.toks_mut().next();
                    buffer.push(tok.kind);
                    if brackets.last() == Some(&tok.kind) {
                        brackets.pop();
                    }
                }
                c => {
                    self.toks_mut().next();
                    buffer.push(c);
                }
            }
        }

        if let Some(end) = brackets.pop() {
            return Err((format!("expected \"{}\".", end), self.toks().current_span()).into());
        }

        Ok(buffer)
    }

    /// Consumes the `;` ending a statement, if there is one. The `}` closing
    /// the enclosing block also ends a statement.
    fn expect_statement_separator(&mut self) -> GroutResult<()> {
        self.whitespace_without_comments();
        match self.toks().peek() {
            Some(Token { kind: ';', .. }) => {
                self.toks_mut().next();
                Ok(())
            }
            Some(Token { kind: '}', .. }) | None => Ok(()),
            Some(..) => Err(("expected \";\".", self.toks().current_span()).into()),
        }
    }

    fn parse_declaration_or_style_rule(&mut self) -> GroutResult<AstStmt> {
        let start = self.toks().cursor();
        let text = self.scan_statement_text()?;

        if self.toks().next_char_is('{') {
            return self.parse_style_rule(text, start);
        }

        let span = self.toks().span_from(start);

        if self.is_mixin_call(text.trim()) {
            return Err(("mixin calls are not supported.", span).into());
        }

        self.parse_declaration(&text, span)
    }

    fn parse_style_rule(&mut self, selector: String, start: usize) -> GroutResult<AstStmt> {
        let selector_span = self.toks().span_from(start);
        let selector = selector.trim_end().to_owned();

        if selector.is_empty() {
            return Err(("expected selector.", self.toks().current_span()).into());
        }

        let body = self.parse_children()?;

        Ok(AstStmt::RuleSet(AstRuleSet {
            selector,
            body,
            selector_span,
            span: self.toks().span_from(start),
        }))
    }

    fn parse_declaration(&mut self, text: &str, span: Span) -> GroutResult<AstStmt> {
        let (name, value) = match text.split_once(':') {
            Some((name, value)) => (name.trim(), collapse_whitespace(value)),
            None => return Err(("expected \"{\".", span).into()),
        };

        if name.is_empty() {
            return Err(("Expected identifier.", span).into());
        }

        if value.is_empty() {
            return Err(("Expected expression.", span).into());
        }

        self.expect_statement_separator()?;

        Ok(AstStmt::Style(AstStyle {
            name: name.to_owned(),
            value,
            span,
        }))
    }

    /// The name of an at-rule, after its `@`
    fn parse_at_rule_name(&mut self) -> GroutResult<String> {
        self.expect_char('@')?;
        let name = self.parse_identifier()?;
        self.whitespace()?;
        Ok(name)
    }

    fn parse_media_rule(&mut self, start: usize) -> GroutResult<AstStmt> {
        let query = collapse_whitespace(&self.scan_statement_text()?);

        if query.is_empty() {
            return Err(("Expected identifier.", self.toks().current_span()).into());
        }

        let body = self.parse_children()?;

        Ok(AstStmt::Media(AstMedia {
            query,
            body,
            span: self.toks().span_from(start),
        }))
    }

    fn parse_unknown_at_rule(&mut self, name: String, start: usize) -> GroutResult<AstStmt> {
        let params = collapse_whitespace(&self.scan_statement_text()?);

        let body = if self.toks().next_char_is('{') {
            Some(self.parse_children()?)
        } else {
            self.expect_statement_separator()?;
            None
        };

        Ok(AstStmt::UnknownAtRule(AstUnknownAtRule {
            name,
            params,
            body,
            span: self.toks().span_from(start),
        }))
    }

    /// The rest of the statement as a single line of text, for `@debug`,
    /// `@warn` and `@error`
    fn parse_message(&mut self) -> GroutResult<(String, Span)> {
        let start = self.toks().cursor();
        let value = collapse_whitespace(&self.scan_statement_text()?);
        let span = self.toks().span_from(start);
        self.expect_statement_separator()?;
        Ok((value, span))
    }
}
