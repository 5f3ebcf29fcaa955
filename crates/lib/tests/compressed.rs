#[macro_use]
mod macros;

test!(
    declarations,
    "a { b: c; d: e; }",
    "a{b:c;d:e}",
    grout::Options::default().style(grout::OutputStyle::Compressed)
);
test!(
    selector_list,
    "a, b { c: d; }",
    "a,b{c:d}",
    grout::Options::default().style(grout::OutputStyle::Compressed)
);
test!(
    combinators,
    "a > b ~ c + d e { f: g; }",
    "a>b~c+d e{f:g}",
    grout::Options::default().style(grout::OutputStyle::Compressed)
);
test!(
    several_rules,
    "a { b: c; } d { e: f; }",
    "a{b:c}d{e:f}",
    grout::Options::default().style(grout::OutputStyle::Compressed)
);
test!(
    media,
    "@media print { a { b: c; } }",
    "@media print{a{b:c}}",
    grout::Options::default().style(grout::OutputStyle::Compressed)
);
test!(
    extend,
    ".a { x: y; } .b { @extend .a; z: w; }",
    ".a,.b{x:y}.b{z:w}",
    grout::Options::default().style(grout::OutputStyle::Compressed)
);
test!(
    bodyless_at_rule,
    "@import 'a.css'; a { b: c; }",
    "@import 'a.css';a{b:c}",
    grout::Options::default().style(grout::OutputStyle::Compressed)
);
