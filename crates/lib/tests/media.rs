#[macro_use]
mod macros;

test!(
    basic_toplevel,
    "@media foo {\n  a {\n    color: red;\n  }\n}\n",
    "@media foo {\n  a {\n    color: red;\n  }\n}\n"
);
test!(
    bubbles_out_of_style_rule,
    "a {\n  @media foo {\n  color: red;\n  }\n}\n",
    "@media foo {\n  a {\n    color: red;\n  }\n}\n"
);
test!(
    nested_rules_inside_bubbled_media,
    "a {\n  @media screen {\n    b {\n      color: red;\n    }\n    c {\n      color: green;\n    }\n  }\n}\n",
    "@media screen {\n  a b {\n    color: red;\n  }\n  a c {\n    color: green;\n  }\n}\n"
);
test!(
    declarations_around_media,
    "a { x: y; @media print { z: w; } q: r; }",
    "a {\n  x: y;\n  q: r;\n}\n@media print {\n  a {\n    z: w;\n  }\n}\n"
);
test!(
    nested_queries_are_merged,
    "@media screen { @media (min-width: 1px) { a { x: y; } } }",
    "@media screen and (min-width: 1px) {\n  a {\n    x: y;\n  }\n}\n"
);
test!(
    query_whitespace_is_collapsed,
    "@media   screen   and (x)  { a { b: c; } }",
    "@media screen and (x) {\n  a {\n    b: c;\n  }\n}\n"
);
test!(empty_body_is_omitted, "@media print {}", "");
test!(
    only_empty_rules_is_omitted,
    "@media print { a {} }",
    ""
);
test!(
    comment_keeps_media_visible,
    "@media print { /* x */ }",
    "@media print {\n  /* x */\n}\n"
);
error!(
    no_query,
    "@media {\n  a { b: c; }\n}", "Error: Expected identifier."
);
