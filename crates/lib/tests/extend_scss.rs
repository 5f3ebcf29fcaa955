#[macro_use]
mod macros;

test!(
    basic,
    ".a { color: red; }\n.b { @extend .a; margin: 0; }",
    ".a, .b {\n  color: red;\n}\n\n.b {\n  margin: 0;\n}\n"
);
test!(
    target_declared_later,
    ".b { @extend .a; }\n.a { color: red; }",
    ".a, .b {\n  color: red;\n}\n"
);
test!(
    multiple_targets,
    ".a { x: y; }\n.c { z: w; }\n.b { @extend .a, .c; }",
    ".a, .b {\n  x: y;\n}\n\n.c, .b {\n  z: w;\n}\n"
);
test!(
    every_selector_of_the_extender,
    ".a { x: y; }\n.b, .c { @extend .a; }",
    ".a, .b, .c {\n  x: y;\n}\n"
);
test!(
    matching_is_strict,
    ".a.x { c: d; }\n.b { @extend .a; }",
    ".a.x {\n  c: d;\n}\n"
);
test!(
    complex_target,
    ".a { .b { x: y; } }\n.c { @extend .a .b; }",
    ".a .b, .c {\n  x: y;\n}\n"
);
test!(
    nested_extender,
    ".a { x: y; }\n.b { .c { @extend .a; } }",
    ".a, .b .c {\n  x: y;\n}\n"
);
test!(
    chained,
    ".a { x: y; }\n.b { @extend .a; }\n.c { @extend .b; }",
    ".a, .b, .c {\n  x: y;\n}\n"
);
test!(
    self_extend,
    ".a { @extend .a; x: y; }",
    ".a {\n  x: y;\n}\n"
);
test!(
    mutual_extend_terminates,
    ".a { @extend .b; x: 1; }\n.b { @extend .a; y: 2; }",
    ".a, .b {\n  x: 1;\n}\n\n.b, .a {\n  y: 2;\n}\n"
);
test!(
    optional_flag,
    ".a { @extend .missing !optional; x: y; }",
    ".a {\n  x: y;\n}\n"
);
test!(
    no_match_is_silent,
    ".a { @extend .missing; x: y; }",
    ".a {\n  x: y;\n}\n"
);
test!(
    extends_into_media,
    "@media print { .a { x: y; } }\n.b { @extend .a; z: w; }",
    "@media print {\n  .a, .b {\n    x: y;\n  }\n}\n\n.b {\n  z: w;\n}\n"
);
test!(
    extends_from_media,
    ".a { x: y; }\n@media print { .b { @extend .a; } }",
    ".a, .b {\n  x: y;\n}\n"
);
test!(
    placeholder,
    "%message { color: blue; }\n.info { @extend %message; font-weight: bold; }",
    ".info {\n  color: blue;\n}\n\n.info {\n  font-weight: bold;\n}\n"
);
test!(unused_placeholder, "%a { x: y; }", "");
test!(
    placeholder_in_list,
    "%a, .b { x: y; }",
    ".b {\n  x: y;\n}\n"
);
test!(
    nested_placeholder,
    "%btn { &:hover { x: y; } }\n.c { @extend %btn:hover; }",
    ".c {\n  x: y;\n}\n"
);
test!(
    less_marker_is_a_plain_pseudo,
    ".a { x: y; }\n.b:extend(.a) { z: w; }",
    ".a {\n  x: y;\n}\n\n.b:extend(.a) {\n  z: w;\n}\n"
);
error!(
    extend_at_root,
    "@extend .a;", "Error: @extend may only be used within style rules."
);
error!(
    extend_in_at_root,
    ".a { @at-root { @extend .b; } }", "Error: @extend may only be used within style rules."
);
