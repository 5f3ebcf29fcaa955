use std::{
    error::Error,
    fmt::{self, Display},
    io,
    string::FromUtf8Error,
};

use codemap::{Span, SpanLoc};

pub type GroutResult<T> = Result<T, Box<GroutError>>;

/// `GroutError`s can be either a structured error specific to `grout` or an
/// `io::Error`.
///
/// In the former case, the best way to interact with the error is to simply
/// print it to the user. The `Display` implementation of this kind of error
/// mirrors that of the errors generated by sass compilers, and will be
/// stable for use in tests and for pattern matching on the first line.
#[derive(Debug)]
pub struct GroutError {
    kind: GroutErrorKind,
}

impl GroutError {
    pub fn kind(self) -> PublicGroutErrorKind {
        match self.kind {
            GroutErrorKind::ParseError {
                message,
                loc,
                unicode,
            } => PublicGroutErrorKind::ParseError {
                message,
                loc,
                unicode,
            },
            GroutErrorKind::FromUtf8Error(s) => PublicGroutErrorKind::FromUtf8Error(s),
            GroutErrorKind::IoError(io) => PublicGroutErrorKind::IoError(io),
            GroutErrorKind::Raw(..) => unreachable!("raw errors should not be accessible by users"),
        }
    }

    pub(crate) fn raw(self) -> (String, Span) {
        match self.kind {
            GroutErrorKind::Raw(string, span) => (string, span),
            e => unreachable!("unable to get raw of {:?}", e),
        }
    }

    pub(crate) fn from_loc(message: String, loc: SpanLoc, unicode: bool) -> Self {
        GroutError {
            kind: GroutErrorKind::ParseError {
                message,
                loc,
                unicode,
            },
        }
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub enum PublicGroutErrorKind {
    ParseError {
        /// The message of the error
        message: String,

        /// The location of the error in the input
        loc: SpanLoc,

        /// Whether or not the user allows unicode characters to be emitted
        /// in error messages
        unicode: bool,
    },

    /// Stylesheets are read as UTF-8. Invalid bytes in the input end up here.
    FromUtf8Error(String),

    IoError(io::Error),
}

#[derive(Debug)]
enum GroutErrorKind {
    /// A raw error carrying only a message and the span it points at. It is
    /// resolved into a `ParseError` before reaching the user.
    Raw(String, Span),
    ParseError {
        message: String,
        loc: SpanLoc,
        unicode: bool,
    },
    IoError(io::Error),
    FromUtf8Error(String),
}

impl Display for GroutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (message, loc, unicode) = match &self.kind {
            GroutErrorKind::ParseError {
                message,
                loc,
                unicode,
            } => (message, loc, *unicode),
            GroutErrorKind::FromUtf8Error(s) => return writeln!(f, "Error: {}", s),
            GroutErrorKind::IoError(s) => return writeln!(f, "Error: {}", s),
            GroutErrorKind::Raw(..) => unreachable!(),
        };

        let first_bar = if unicode { '╷' } else { ',' };
        let last_bar = if unicode { '╵' } else { '\'' };
        let bar = if unicode { '│' } else { '|' };

        let line = loc.begin.line + 1;
        let col = loc.begin.column + 1;
        let padding = " ".repeat(line.to_string().len() + 1);

        writeln!(f, "Error: {}", message)?;
        writeln!(f, "{}{}", padding, first_bar)?;
        writeln!(
            f,
            "{} {} {}",
            line,
            bar,
            loc.file.source_line(loc.begin.line)
        )?;

        let underline_len = if loc.begin.line == loc.end.line {
            (loc.end.column.saturating_sub(loc.begin.column)).max(1)
        } else {
            1
        };

        writeln!(
            f,
            "{}{} {}{}",
            padding,
            bar,
            " ".repeat(loc.begin.column),
            "^".repeat(underline_len)
        )?;
        writeln!(f, "{}{}", padding, last_bar)?;
        writeln!(f, "  {} {}:{}  root stylesheet", loc.file.name(), line, col)
    }
}

impl From<io::Error> for Box<GroutError> {
    #[inline]
    fn from(error: io::Error) -> Box<GroutError> {
        Box::new(GroutError {
            kind: GroutErrorKind::IoError(error),
        })
    }
}

impl From<FromUtf8Error> for Box<GroutError> {
    #[inline]
    fn from(error: FromUtf8Error) -> Box<GroutError> {
        Box::new(GroutError {
            kind: GroutErrorKind::FromUtf8Error(format!(
                "Invalid UTF-8 character \"\\x{:X?}\"",
                error.as_bytes()[error.utf8_error().valid_up_to()]
            )),
        })
    }
}

impl From<(&str, Span)> for Box<GroutError> {
    #[inline]
    fn from(error: (&str, Span)) -> Box<GroutError> {
        Box::new(GroutError {
            kind: GroutErrorKind::Raw(error.0.to_owned(), error.1),
        })
    }
}

impl From<(String, Span)> for Box<GroutError> {
    #[inline]
    fn from(error: (String, Span)) -> Box<GroutError> {
        Box::new(GroutError {
            kind: GroutErrorKind::Raw(error.0, error.1),
        })
    }
}

impl Error for GroutError {
    #[inline]
    fn description(&self) -> &'static str {
        "selector resolution error"
    }
}
