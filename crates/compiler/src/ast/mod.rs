pub(crate) use css::*;
pub(crate) use media::*;
pub(crate) use stmt::*;
pub(crate) use style::*;
pub(crate) use unknown::*;

mod css;
mod media;
mod stmt;
mod style;
mod unknown;
