use std::fmt::{self, Display, Write};

/// The quoting a piece of text was written with. Preserved so output can
/// reproduce the author's choice.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) enum QuoteKind {
    Double,
    Single,
    None,
}

impl QuoteKind {
    pub fn from_char(c: char) -> Self {
        match c {
            '"' => Self::Double,
            '\'' => Self::Single,
            _ => Self::None,
        }
    }
}

impl Display for QuoteKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Double => f.write_char('"'),
            Self::Single => f.write_char('\''),
            Self::None => Ok(()),
        }
    }
}
