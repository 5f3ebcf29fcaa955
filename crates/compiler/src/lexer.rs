use std::sync::Arc;

use codemap::{File, Span};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Token {
    pub kind: char,
    /// Byte offset into the text the lexer was built from
    pos: u32,
}

/// A cursor over the characters of a source file or of a snippet that was
/// cut out of one (a selector, an extend target list).
///
/// `\r\n`, `\r` and form feeds are all read as `\n`.
#[derive(Debug, Clone)]
pub(crate) struct Lexer {
    buf: Vec<Token>,
    entire_span: Span,
    cursor: usize,
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        let kind = match c {
            '\r' => {
                chars.next_if(|&(_, next)| next == '\n');
                '\n'
            }
            '\x0C' => '\n',
            c => c,
        };

        tokens.push(Token {
            kind,
            pos: pos as u32,
        });
    }

    tokens
}

impl Lexer {
    pub fn new_from_file(file: &Arc<File>) -> Self {
        Self::new_from_string(file.source(), file.span)
    }

    /// `s` must be the text covered by `entire_span`, or a trimmed prefix of it
    pub fn new_from_string(s: &str, entire_span: Span) -> Self {
        Self {
            buf: tokenize(s),
            entire_span,
            cursor: 0,
        }
    }

    pub fn peek(&self) -> Option<Token> {
        self.peek_n(0)
    }

    /// The token `n` places past the cursor
    pub fn peek_n(&self, n: usize) -> Option<Token> {
        self.buf.get(self.cursor + n).copied()
    }

    pub fn next_char_is(&self, c: char) -> bool {
        self.peek().map_or(false, |tok| tok.kind == c)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    /// The (normalized) text between `start` and the cursor
    pub fn raw_text(&self, start: usize) -> String {
        self.buf[start..self.cursor].iter().map(|tok| tok.kind).collect()
    }

    pub fn current_span(&self) -> Span {
        self.span_at_index(self.cursor)
    }

    pub fn prev_span(&self) -> Span {
        self.span_at_index(self.cursor.saturating_sub(1))
    }

    /// From the token at `start` up to and including the last consumed one
    pub fn span_from(&self, start: usize) -> Span {
        self.span_at_index(start).merge(self.prev_span())
    }

    /// Clamped to the last token. An empty input yields an empty span at the
    /// start of the file.
    fn span_at_index(&self, idx: usize) -> Span {
        let (start, len) = self
            .buf
            .get(idx)
            .or_else(|| self.buf.last())
            .map_or((0, 0), |tok| (u64::from(tok.pos), tok.kind.len_utf8() as u64));

        let end = (start + len).min(self.entire_span.len());

        self.entire_span.subspan(start.min(end), end)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let tok = self.peek()?;
        self.cursor += 1;
        Some(tok)
    }
}
