pub(crate) use base::BaseParser;
pub(crate) use less::LessParser;
pub(crate) use scss::ScssParser;
pub(crate) use stylesheet::StylesheetParser;

mod base;
mod less;
mod scss;
mod stylesheet;
