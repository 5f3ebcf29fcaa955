use crate::{
    error::GroutResult,
    lexer::Lexer,
    utils::{is_name, is_name_start},
    Token,
};

/// Token-level scanning shared by the stylesheet and selector parsers.
///
/// Everything here works on source text only. Escapes and strings are
/// returned exactly as written, since nothing downstream needs their decoded
/// value and the output must reproduce them unchanged.
pub(crate) trait BaseParser {
    fn toks(&self) -> &Lexer;
    fn toks_mut(&mut self) -> &mut Lexer;

    fn whitespace_without_comments(&mut self) {
        while self
            .toks()
            .peek()
            .map_or(false, |tok| matches!(tok.kind, ' ' | '\t' | '\n'))
        {
            self.toks_mut().next();
        }
    }

    /// Skips whitespace along with both kinds of comment
    fn whitespace(&mut self) -> GroutResult<()> {
        loop {
            self.whitespace_without_comments();

            if self.next_matches("//") {
                self.skip_silent_comment()?;
            } else if self.next_matches("/*") {
                self.skip_loud_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_silent_comment(&mut self) -> GroutResult<()> {
        debug_assert!(self.next_matches("//"));

        while let Some(tok) = self.toks().peek() {
            if tok.kind == '\n' {
                break;
            }
            self.toks_mut().next();
        }

        Ok(())
    }

    fn skip_loud_comment(&mut self) -> GroutResult<()> {
        debug_assert!(self.next_matches("/*"));
        self.toks_mut().next();
        self.toks_mut().next();

        let mut prev = None;
        while let Some(tok) = self.toks_mut().next() {
            if prev == Some('*') && tok.kind == '/' {
                return Ok(());
            }
            prev = Some(tok.kind);
        }

        Err(("expected more input.", self.toks().current_span()).into())
    }

    /// Whether the upcoming tokens spell `s`. Nothing is consumed.
    fn next_matches(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(idx, c)| self.toks().peek_n(idx).map_or(false, |tok| tok.kind == c))
    }

    fn scan_char(&mut self, c: char) -> bool {
        if self.toks().next_char_is(c) {
            self.toks_mut().next();
            true
        } else {
            false
        }
    }

    /// Consumes `s` if the upcoming tokens spell it
    fn scan(&mut self, s: &str) -> bool {
        if !self.next_matches(s) {
            return false;
        }

        for _ in s.chars() {
            self.toks_mut().next();
        }

        true
    }

    fn expect_char(&mut self, c: char) -> GroutResult<()> {
        if self.scan_char(c) {
            return Ok(());
        }

        Err((format!("expected \"{}\".", c), self.toks().current_span()).into())
    }

    /// A CSS identifier such as an at-rule name. Escapes are kept as written.
    fn parse_identifier(&mut self) -> GroutResult<String> {
        let mut text = String::new();

        while self.scan_char('-') {
            text.push('-');
        }

        match self.toks().peek() {
            Some(Token { kind, .. }) if is_name_start(kind) => {}
            Some(Token { kind: '\\', .. }) => {}
            _ if text == "--" => return Ok(text),
            Some(..) | None => {
                return Err(("Expected identifier.", self.toks().current_span()).into())
            }
        }

        while let Some(tok) = self.toks().peek() {
            if tok.kind == '\\' {
                text.push_str(&self.parse_raw_escape()?);
            } else if is_name(tok.kind) {
                self.toks_mut().next();
                text.push(tok.kind);
            } else {
                break;
            }
        }

        Ok(text)
    }

    /// `\` followed by up to six hex digits and an optional space, or by any
    /// other single character
    fn parse_raw_escape(&mut self) -> GroutResult<String> {
        let start = self.toks().cursor();
        self.expect_char('\\')?;

        match self.toks().peek() {
            None => return Err(("Expected expression.", self.toks().current_span()).into()),
            Some(Token { kind: '\n', .. }) => {
                return Err(("Expected escape sequence.", self.toks().current_span()).into())
            }
            Some(Token { kind, .. }) if kind.is_ascii_hexdigit() => {
                let mut digits = 0;
                while digits < 6
                    && self
                        .toks()
                        .peek()
                        .map_or(false, |tok| tok.kind.is_ascii_hexdigit())
                {
                    self.toks_mut().next();
                    digits += 1;
                }

                if self
                    .toks()
                    .peek()
                    .map_or(false, |tok| matches!(tok.kind, ' ' | '\t' | '\n'))
                {
                    self.toks_mut().next();
                }
            }
            Some(..) => {
                self.toks_mut().next();
            }
        }

        Ok(self.toks().raw_text(start))
    }

    /// The contents of a quoted string, without the quotes
    fn parse_string(&mut self) -> GroutResult<String> {
        let quote = match self.toks_mut().next() {
            Some(Token {
                kind: q @ ('\'' | '"'),
                ..
            }) => q,
            Some(..) | None => return Err(("Expected string.", self.toks().current_span()).into()),
        };

        let start = self.toks().cursor();

        while let Some(tok) = self.toks().peek() {
            match tok.kind {
                c if c == quote => {
                    let contents = self.toks().raw_text(start);
                    self.toks_mut().next();
                    return Ok(contents);
                }
                '\n' => break,
                '\\' => {
                    self.toks_mut().next();
                    self.toks_mut().next();
                }
                _ => {
                    self.toks_mut().next();
                }
            }
        }

        Err((format!("Expected {}.", quote), self.toks().current_span()).into())
    }

    fn fallible_raw_text<T>(
        &mut self,
        func: impl Fn(&mut Self) -> GroutResult<T>,
    ) -> GroutResult<String> {
        let start = self.toks().cursor();
        func(self)?;
        Ok(self.toks().raw_text(start))
    }

    /// `#{` in SCSS or `@{` in LESS
    fn looking_at_interpolation(&self) -> bool {
        matches!(
            self.toks().peek(),
            Some(Token {
                kind: '#' | '@',
                ..
            })
        ) && matches!(self.toks().peek_n(1), Some(Token { kind: '{', .. }))
    }

    /// Consumes an interpolation and returns its source text unchanged.
    /// Nothing is evaluated.
    fn parse_raw_interpolation(&mut self) -> GroutResult<String> {
        let start = self.toks().cursor();
        self.toks_mut().next();
        self.expect_char('{')?;

        let mut depth = 1_usize;

        while let Some(tok) = self.toks().peek() {
            match tok.kind {
                '"' | '\'' => {
                    self.parse_string()?;
                    continue;
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.toks_mut().next();
                        return Ok(self.toks().raw_text(start));
                    }
                }
                _ => {}
            }
            self.toks_mut().next();
        }

        Err(("expected \"}\".", self.toks().current_span()).into())
    }
}
