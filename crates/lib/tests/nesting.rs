#[macro_use]
mod macros;

test!(
    implicit_parent,
    "a { b { color: red; } }",
    "a b {\n  color: red;\n}\n"
);
test!(
    three_levels,
    "a { b { c { d: e; } } }",
    "a b c {\n  d: e;\n}\n"
);
test!(
    parent_declarations_stay_together,
    "a { color: red; b { x: y; } margin: 0; }",
    "a {\n  color: red;\n  margin: 0;\n}\na b {\n  x: y;\n}\n"
);
test!(
    parent_list_times_child_list,
    "a, b { c, d { x: y; } }",
    "a c, a d, b c, b d {\n  x: y;\n}\n"
);
test!(
    every_reference_picks_a_parent,
    "A, B { &:hover, &:focus { c: d; } }",
    "A:hover, A:focus, B:hover, B:focus {\n  c: d;\n}\n"
);
test!(
    two_references,
    ".a { & + & { x: y; } }",
    ".a + .a {\n  x: y;\n}\n"
);
test!(
    reference_after_prefix,
    ".a { .b & { x: y; } }",
    ".b .a {\n  x: y;\n}\n"
);
test!(
    reference_with_suffix,
    ".block { &__elem { a: b; } &-mod { a: c; } }",
    ".block__elem {\n  a: b;\n}\n.block-mod {\n  a: c;\n}\n"
);
test!(
    reference_at_root_is_dropped,
    "&:hover { x: y; }",
    ":hover {\n  x: y;\n}\n"
);
test!(
    leading_combinator,
    "a { > b { x: y; } + c { x: y; } ~ d { x: y; } }",
    "a > b {\n  x: y;\n}\na + c {\n  x: y;\n}\na ~ d {\n  x: y;\n}\n"
);
test!(
    duplicates_are_removed,
    "a { b, b { x: y; } }",
    "a b {\n  x: y;\n}\n"
);
test!(
    whitespace_is_normalized,
    "a   >   b\n  c { x: y; }",
    "a > b c {\n  x: y;\n}\n"
);
test!(
    interpolation_is_kept,
    ".a-#{$x} { y: z; }",
    ".a-#{$x} {\n  y: z;\n}\n"
);
test!(
    attribute_selectors,
    "a { &[data-x=\"1\"], &[lang|=en i] { b: c; } }",
    "a[data-x=\"1\"], a[lang|=en i] {\n  b: c;\n}\n"
);
test!(
    namespaced_type,
    "svg|rect { x: y; }",
    "svg|rect {\n  x: y;\n}\n"
);
test!(
    pseudo_element,
    "a { &::before { content: \"\"; } }",
    "a::before {\n  content: \"\";\n}\n"
);
test!(
    reference_inside_pseudo_argument_is_text,
    ".a { :not(&) { b: c; } }",
    ".a :not(&) {\n  b: c;\n}\n"
);
test!(
    sibling_rules_are_grouped,
    "a { b: c; }\nd { e: f; }",
    "a {\n  b: c;\n}\n\nd {\n  e: f;\n}\n"
);
test!(empty_rule_is_omitted, "a {}", "");
test!(empty_nested_rules_are_omitted, "a { b { } }", "");
