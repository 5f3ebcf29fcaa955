use std::path::Path;

use crate::{Fs, Logger, StdFs, StdLogger};

/// Everything that can be configured about a run of [`crate::from_string`]
/// or [`crate::from_path`].
///
/// Start from `Options::default()` and chain the setters.
#[derive(Debug)]
pub struct Options<'a> {
    pub(crate) fs: &'a dyn Fs,
    pub(crate) logger: &'a dyn Logger,
    pub(crate) style: OutputStyle,
    pub(crate) allows_charset: bool,
    pub(crate) unicode_error_messages: bool,
    pub(crate) quiet: bool,
    pub(crate) input_syntax: Option<InputSyntax>,
}

impl Default for Options<'_> {
    #[inline]
    fn default() -> Self {
        Self {
            fs: &StdFs,
            logger: &StdLogger,
            style: OutputStyle::Expanded,
            allows_charset: true,
            unicode_error_messages: true,
            quiet: false,
            input_syntax: None,
        }
    }
}

impl<'a> Options<'a> {
    /// The file system [`crate::from_path`] reads from.
    ///
    /// Defaults to [`StdFs`], which is backed by [`std::fs`].
    #[must_use]
    #[inline]
    pub fn fs(mut self, fs: &'a dyn Fs) -> Self {
        self.fs = fs;
        self
    }

    /// Where `@debug`, `@warn` and warnings about ignored input are sent.
    ///
    /// Defaults to [`StdLogger`], which writes to stderr.
    #[must_use]
    #[inline]
    pub fn logger(mut self, logger: &'a dyn Logger) -> Self {
        self.logger = logger;
        self
    }

    /// How the resolved stylesheet is formatted. See [`OutputStyle`].
    ///
    /// Defaults to [`OutputStyle::Expanded`].
    #[must_use]
    #[inline]
    pub const fn style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Stop every message from reaching the [`crate::Logger`], including
    /// `@debug` output.
    ///
    /// By default, this value is `false`.
    #[must_use]
    #[inline]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Whether to emit a `@charset` declaration (expanded output) or a UTF-8
    /// byte-order mark (compressed output) when the stylesheet contains
    /// non-ASCII characters.
    ///
    /// Enabled by default.
    #[must_use]
    #[inline]
    pub const fn allows_charset(mut self, allows_charset: bool) -> Self {
        self.allows_charset = allows_charset;
        self
    }

    /// Draw the source excerpt of error messages with box-drawing characters.
    /// Pass `false` for plain ASCII.
    ///
    /// The CSS output is not affected.
    #[must_use]
    #[inline]
    pub const fn unicode_error_messages(mut self, unicode_error_messages: bool) -> Self {
        self.unicode_error_messages = unicode_error_messages;
        self
    }

    /// Parse input using the given dialect.
    ///
    /// By default the dialect is inferred from the file extension: `.less`
    /// files are parsed as LESS and everything else as SCSS.
    #[must_use]
    #[inline]
    pub const fn input_syntax(mut self, syntax: InputSyntax) -> Self {
        self.input_syntax = Some(syntax);
        self
    }

    pub(crate) fn is_compressed(&self) -> bool {
        matches!(self.style, OutputStyle::Compressed)
    }
}

/// The preprocessor dialect of the input
///
/// See [`Options::input_syntax`] for additional information
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSyntax {
    /// SCSS: `@extend`, `%placeholder`, `@at-root`, `@debug` and `@warn`.
    Scss,

    /// LESS: `:extend(...)` and `&:extend(...);`, with extends scoped to the
    /// at-rule they are written in.
    Less,
}

impl InputSyntax {
    pub(crate) fn for_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("less") => Self::Less,
            _ => Self::Scss,
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputStyle {
    /// One declaration per line, nested blocks indented by two spaces and a
    /// blank line between top-level groups
    Expanded,

    /// No optional whitespace, no final semicolons and only `/*! */`
    /// comments
    Compressed,
}
