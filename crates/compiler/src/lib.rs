/*!
This crate resolves the selectors of [SCSS](https://sass-lang.com/) and
[LESS](https://lesscss.org/) stylesheets into flat CSS.

Nested rules are flattened by substituting the parent selector for every `&`
(or prefixing it when there is none), and `@extend` / `:extend(...)`
directives are applied across the whole document once it has been read.
Expressions, mixins and control flow are not evaluated: declaration values
and at-rule parameters are passed through as written.

## Use as library
```
# use grout_compiler as grout;
fn main() -> Result<(), Box<grout::Error>> {
    let css = grout::from_string(
        "a { b { color: red; } }".to_owned(),
        &grout::Options::default().style(grout::OutputStyle::Compressed)
    )?;
    assert_eq!(css, "a b{color:red}");
    Ok(())
}
```

## Use as binary
```bash
cargo install grout
grout input.scss
grout --syntax less input.less
```
*/

#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::dbg_macro)]
#![deny(missing_debug_implementations)]
#![allow(
    clippy::use_self,
    renamed_and_removed_lints,
    clippy::unknown_clippy_lints,
    clippy::single_match,
    clippy::new_without_default,
    clippy::single_match_else,
    clippy::multiple_crate_versions,
    clippy::wrong_self_convention,
    clippy::unwrap_or_default,
    unknown_lints,
)]

use std::path::Path;

use parse::{LessParser, ScssParser, StylesheetParser};
use serializer::Serializer;
#[cfg(feature = "wasm-exports")]
use wasm_bindgen::prelude::*;

use codemap::CodeMap;

pub use crate::error::{
    GroutError as Error, GroutResult as Result, PublicGroutErrorKind as ErrorKind,
};
pub use crate::fs::{Fs, NullFs, StdFs};
pub use crate::logger::{Logger, NullLogger, StdLogger};
pub use crate::options::{InputSyntax, Options, OutputStyle};
use crate::{evaluate::Visitor, lexer::Lexer};
pub(crate) use crate::{context_flags::ContextFlags, lexer::Token};

pub use codemap;

mod ast;
mod common;
mod context_flags;
mod error;
mod evaluate;
mod fs;
mod interner;
mod lexer;
mod logger;
mod options;
mod parse;
mod selector;
mod serializer;
mod utils;

fn raw_to_parse_error(map: &CodeMap, err: Error, unicode: bool) -> Box<Error> {
    let (message, span) = err.raw();
    Box::new(Error::from_loc(message, map.look_up_span(span), unicode))
}

fn from_string_with_file_name<P: AsRef<Path>>(
    input: String,
    file_name: P,
    options: &Options,
) -> Result<String> {
    let mut map = CodeMap::new();
    let path = file_name.as_ref();
    let file = map.add_file(path.to_string_lossy().into_owned(), input);
    let lexer = Lexer::new_from_file(&file);

    let input_syntax = options
        .input_syntax
        .unwrap_or_else(|| InputSyntax::for_path(path));

    let stylesheet = match input_syntax {
        InputSyntax::Scss => ScssParser::new(lexer).__parse(),
        InputSyntax::Less => LessParser::new(lexer).__parse(),
    };

    let stylesheet = match stylesheet {
        Ok(v) => v,
        Err(e) => return Err(raw_to_parse_error(&map, *e, options.unicode_error_messages)),
    };

    let mut visitor = Visitor::new(options, &map, stylesheet.syntax);
    match visitor.visit_stylesheet(stylesheet) {
        Ok(_) => {}
        Err(e) => return Err(raw_to_parse_error(&map, *e, options.unicode_error_messages)),
    }

    // Extends may target rules declared after them, so they are only applied
    // once every rule has been seen.
    visitor.extender.resolve();

    let stmts = visitor.finish();

    Serializer::new(options, &map).serialize(stmts)
}

/// Compile CSS from a path
///
/// The dialect is inferred from the extension unless
/// [`Options::input_syntax`] is set: `.less` files are read as LESS and
/// everything else as SCSS.
///
/// n.b. `grout` does not currently support files or paths that are not valid UTF-8
///
/// ```no_run
/// # use grout_compiler as grout;
/// fn main() -> Result<(), Box<grout::Error>> {
///     let css = grout::from_path("input.scss", &grout::Options::default())?;
///     Ok(())
/// }
/// ```
#[inline]
pub fn from_path<P: AsRef<Path>>(p: P, options: &Options) -> Result<String> {
    from_string_with_file_name(String::from_utf8(options.fs.read(p.as_ref())?)?, p, options)
}

/// Compile CSS from a string
///
/// Input is read as SCSS unless [`Options::input_syntax`] says otherwise.
///
/// ```
/// # use grout_compiler as grout;
/// fn main() -> Result<(), Box<grout::Error>> {
///     let css = grout::from_string("a { b { color: red; } }".to_string(), &grout::Options::default())?;
///     assert_eq!(css, "a b {\n  color: red;\n}\n");
///     Ok(())
/// }
/// ```
#[inline]
pub fn from_string<S: Into<String>>(input: S, options: &Options) -> Result<String> {
    from_string_with_file_name(input.into(), "stdin", options)
}

#[cfg(feature = "wasm-exports")]
#[wasm_bindgen(js_name = from_string)]
pub fn from_string_js(input: String) -> std::result::Result<String, String> {
    from_string(input, &Options::default()).map_err(|e| e.to_string())
}
