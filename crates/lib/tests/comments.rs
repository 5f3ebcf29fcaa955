#[macro_use]
mod macros;

test!(
    loud_comment_at_root,
    "/* foo */\na { b: c; }",
    "/* foo */\na {\n  b: c;\n}\n"
);
test!(
    silent_comment_is_dropped,
    "// foo\na { b: c; }",
    "a {\n  b: c;\n}\n"
);
test!(
    comment_in_rule,
    "a { /* x */ b: c; }",
    "a {\n  /* x */\n  b: c;\n}\n"
);
test!(
    comment_in_selector,
    "a /* x */ b { c: d; }",
    "a b {\n  c: d;\n}\n"
);
test!(
    silent_comment_after_declaration,
    "a {\n  b: c; // d\n}",
    "a {\n  b: c;\n}\n"
);
test!(
    compressed_drops_comments,
    "a { /* x */ b: c; }",
    "a{b:c}",
    grout::Options::default().style(grout::OutputStyle::Compressed)
);
test!(
    compressed_keeps_preserved_comments,
    "/*! keep */ a { b: c; }",
    "/*! keep */a{b:c}",
    grout::Options::default().style(grout::OutputStyle::Compressed)
);
error!(unterminated, "a { /* b: c; }", "Error: expected more input.");
