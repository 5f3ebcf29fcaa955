pub(crate) use attribute::{Attribute, AttributeOp};
pub(crate) use complex::Selector;
pub(crate) use extend::*;
pub(crate) use fragment::{Combinator, Pseudo, SelectorFragment};
pub(crate) use nesting::combine;
pub(crate) use parse::SelectorParser;

mod attribute;
mod complex;
mod extend;
mod fragment;
mod nesting;
mod parse;
