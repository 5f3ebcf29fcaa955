use std::io::Write;

use codemap::{CodeMap, Span};

use crate::{
    ast::{CssStmt, Style},
    error::GroutResult,
    selector::ExtendedSelector,
    Options,
};

pub(crate) struct Serializer<'a> {
    indentation: usize,
    options: &'a Options<'a>,
    indent_width: usize,
    buffer: Vec<u8>,
    map: &'a CodeMap,
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a Options<'a>, map: &'a CodeMap) -> Self {
        Self {
            indentation: 0,
            indent_width: 2,
            options,
            buffer: Vec::new(),
            map,
        }
    }

    /// Selectors containing a placeholder are skipped. The caller has already
    /// checked that at least one selector is visible.
    fn write_selector_list(&mut self, selector: &ExtendedSelector) {
        let compressed = self.options.is_compressed();
        let mut is_first = true;

        for complex in selector.selectors().iter() {
            if complex.is_invisible() {
                continue;
            }

            if !is_first {
                self.write_comma_separator();
            }
            is_first = false;

            self.buffer
                .extend_from_slice(complex.to_css_string(compressed).as_bytes());
        }
    }

    fn write_comma_separator(&mut self) {
        self.buffer.push(b',');
        self.write_optional_space();
    }

    /// Write the top-level statements. Sibling groups are separated by a
    /// blank line in expanded output.
    pub fn serialize(mut self, stmts: Vec<CssStmt>) -> GroutResult<String> {
        let mut prev_was_group_end = false;
        let mut prev_requires_semicolon = false;

        for stmt in stmts {
            if stmt.is_invisible() {
                continue;
            }

            let is_group_end = stmt.is_group_end();
            let requires_semicolon = Self::requires_semicolon(&stmt);

            self.visit_group(stmt, prev_was_group_end, prev_requires_semicolon)?;

            prev_was_group_end = is_group_end;
            prev_requires_semicolon = requires_semicolon;
        }

        self.finish(prev_requires_semicolon)
    }

    fn visit_group(
        &mut self,
        stmt: CssStmt,
        prev_was_group_end: bool,
        prev_requires_semicolon: bool,
    ) -> GroutResult<()> {
        if prev_requires_semicolon {
            self.buffer.push(b';');
        }

        if !self.buffer.is_empty() {
            self.write_optional_newline();

            if prev_was_group_end {
                self.write_optional_newline();
            }
        }

        self.visit_stmt(stmt)?;

        Ok(())
    }

    fn finish(mut self, prev_requires_semicolon: bool) -> GroutResult<String> {
        let is_not_ascii = self.buffer.iter().any(|&c| !c.is_ascii());

        if prev_requires_semicolon {
            self.buffer.push(b';');
        }

        if !self.buffer.is_empty() {
            self.write_optional_newline();
        }

        let mut css = String::from_utf8(self.buffer)?;

        if is_not_ascii && self.options.allows_charset {
            if self.options.is_compressed() {
                css.insert(0, '\u{FEFF}');
            } else {
                css.insert_str(0, "@charset \"UTF-8\";\n");
            }
        }

        Ok(css)
    }

    fn write_indentation(&mut self) {
        if self.options.is_compressed() {
            return;
        }

        self.buffer.reserve(self.indentation);
        for _ in 0..self.indentation {
            self.buffer.push(b' ');
        }
    }

    fn write_style(&mut self, style: Style) {
        self.write_indentation();

        style
            .property
            .with_str(|property| self.buffer.extend_from_slice(property.as_bytes()));
        self.buffer.push(b':');

        if !self.options.is_compressed() {
            self.buffer.push(b' ');
        }

        self.buffer.extend_from_slice(style.value.as_bytes());
    }

    fn write_comment(&mut self, comment: &str, span: Span) -> GroutResult<()> {
        self.write_indentation();
        let col = self.map.look_up_pos(span.low()).position.column;
        let mut lines = comment.lines();

        if let Some(line) = lines.next() {
            self.buffer.extend_from_slice(line.trim_start().as_bytes());
        }

        let lines = lines
            .map(|line| {
                let diff = (line.len() - line.trim_start().len()).saturating_sub(col);
                format!("{}{}", " ".repeat(diff), line.trim_start())
            })
            .collect::<Vec<String>>()
            .join("\n");

        if !lines.is_empty() {
            write!(&mut self.buffer, "\n{}", lines)?;
        }

        Ok(())
    }

    /// Only `/*! ... */` comments survive compression
    fn is_dropped_when_compressed(stmt: &CssStmt) -> bool {
        matches!(stmt, CssStmt::Comment(comment, _) if !comment.starts_with("/*!"))
    }

    fn requires_semicolon(stmt: &CssStmt) -> bool {
        match stmt {
            CssStmt::Style(_) => true,
            CssStmt::UnknownAtRule(rule, _) => !rule.has_body,
            _ => false,
        }
    }

    fn write_children(&mut self, mut children: Vec<CssStmt>) -> GroutResult<()> {
        if self.options.is_compressed() {
            children.retain(|child| !Self::is_dropped_when_compressed(child));
            self.buffer.push(b'{');
        } else {
            self.buffer.extend_from_slice(b" {\n");
        }

        self.indentation += self.indent_width;

        let len = children.len();
        for (idx, child) in children.into_iter().enumerate() {
            let needs_semicolon = Self::requires_semicolon(&child);

            if !self.visit_stmt(child)? {
                continue;
            }

            // the last declaration of a block has no semicolon when compressed
            if needs_semicolon && !(self.options.is_compressed() && idx + 1 == len) {
                self.buffer.push(b';');
            }

            self.write_optional_newline();
        }

        self.indentation -= self.indent_width;

        if self.options.is_compressed() {
            self.buffer.push(b'}');
        } else {
            self.write_indentation();
            self.buffer.extend_from_slice(b"}");
        }

        Ok(())
    }

    fn write_optional_space(&mut self) {
        if !self.options.is_compressed() {
            self.buffer.push(b' ');
        }
    }

    fn write_optional_newline(&mut self) {
        if !self.options.is_compressed() {
            self.buffer.push(b'\n');
        }
    }

    /// Returns whether or not text was written
    fn visit_stmt(&mut self, stmt: CssStmt) -> GroutResult<bool> {
        if stmt.is_invisible()
            || (self.options.is_compressed() && Self::is_dropped_when_compressed(&stmt))
        {
            return Ok(false);
        }

        match stmt {
            CssStmt::RuleSet { selector, body, .. } => {
                self.write_indentation();
                self.write_selector_list(&selector);

                self.write_children(body)?;
            }
            CssStmt::Media(media_rule, ..) => {
                self.write_indentation();
                self.buffer.extend_from_slice(b"@media ");
                self.buffer.extend_from_slice(media_rule.query.as_bytes());

                self.write_children(media_rule.body)?;
            }
            CssStmt::UnknownAtRule(unknown_at_rule, ..) => {
                self.write_indentation();
                self.buffer.push(b'@');
                self.buffer
                    .extend_from_slice(unknown_at_rule.name.as_bytes());

                if !unknown_at_rule.params.is_empty() {
                    write!(&mut self.buffer, " {}", unknown_at_rule.params)?;
                }

                if !unknown_at_rule.has_body {
                    debug_assert!(unknown_at_rule.body.is_empty());
                    return Ok(true);
                } else if unknown_at_rule.body.iter().all(CssStmt::is_invisible) {
                    self.buffer.extend_from_slice(b" {}");
                    return Ok(true);
                }

                self.write_children(unknown_at_rule.body)?;
            }
            CssStmt::Style(style) => self.write_style(style),
            CssStmt::Comment(comment, span) => self.write_comment(&comment, span)?,
            CssStmt::KeyframesRuleSet(keyframes_rule_set) => {
                self.write_indentation();
                self.buffer
                    .extend_from_slice(keyframes_rule_set.selector.as_bytes());

                self.write_children(keyframes_rule_set.body)?;
            }
        }

        Ok(true)
    }
}
