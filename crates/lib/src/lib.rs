/*!
This crate resolves the selectors of [SCSS](https://sass-lang.com/) and
[LESS](https://lesscss.org/) stylesheets into flat CSS.

`&` references are substituted with the enclosing rule's selectors, and
`@extend` (SCSS) or `:extend(...)` (LESS) directives add the extending rule's
selectors to every rule they match, anywhere in the document.

## Use as library
```
fn main() -> Result<(), Box<grout::Error>> {
    let css = grout::from_string(
        ".a { &:hover, & + & { color: red; } }".to_owned(),
        &grout::Options::default()
    )?;
    assert_eq!(css, ".a:hover, .a + .a {\n  color: red;\n}\n");
    Ok(())
}
```

```
fn main() -> Result<(), Box<grout::Error>> {
    let css = grout::from_string(
        ".a { color: red; }\n.b:extend(.a) { margin: 0; }".to_owned(),
        &grout::Options::default().input_syntax(grout::InputSyntax::Less)
    )?;
    assert_eq!(css, ".a, .b {\n  color: red;\n}\n\n.b {\n  margin: 0;\n}\n");
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

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::dbg_macro)]
#![deny(missing_debug_implementations)]
#![allow(
    clippy::use_self,
    clippy::missing_docs_in_private_items,
    clippy::unreachable,
    clippy::module_name_repetitions,
    renamed_and_removed_lints,
    clippy::unknown_clippy_lints,
    clippy::single_match,
    clippy::option_if_let_else,
    clippy::single_match_else,
    clippy::redundant_pub_crate,
    // the api is changing too often to allot this
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::multiple_crate_versions,
    clippy::wrong_self_convention,
    clippy::uninlined_format_args,
    unknown_lints,
)]

pub use grout_compiler::*;
