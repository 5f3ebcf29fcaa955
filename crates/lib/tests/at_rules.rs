#[macro_use]
mod macros;

test!(
    font_face,
    "@font-face { font-family: x; src: url(a.woff); }",
    "@font-face {\n  font-family: x;\n  src: url(a.woff);\n}\n"
);
test!(
    import_without_body,
    "@import \"foo.css\";",
    "@import \"foo.css\";\n"
);
test!(
    import_before_rule,
    "@import \"foo.css\";\na { b: c; }",
    "@import \"foo.css\";\na {\n  b: c;\n}\n"
);
test!(
    supports_with_nested_rules,
    "@supports (display: grid) { a { b { c: d; } } }",
    "@supports (display: grid) {\n  a b {\n    c: d;\n  }\n}\n"
);
test!(
    supports_bubbles,
    "a { @supports (x: y) { b: c; } }",
    "@supports (x: y) {\n  a {\n    b: c;\n  }\n}\n"
);
test!(
    empty_unknown_at_rule_is_kept,
    "@page :first {}",
    "@page :first {}\n"
);
test!(charset_is_dropped, "@charset \"UTF-8\";\na { b: c; }", "a {\n  b: c;\n}\n");
test!(
    keyframes,
    "@keyframes spin { from { transform: rotate(0deg); } to { transform: rotate(360deg); } }",
    "@keyframes spin {\n  from {\n    transform: rotate(0deg);\n  }\n  to {\n    transform: rotate(360deg);\n  }\n}\n"
);
test!(
    keyframes_percentages,
    "@keyframes fade { 0%,   50% { opacity: 0; } }",
    "@keyframes fade {\n  0%, 50% {\n    opacity: 0;\n  }\n}\n"
);
test!(
    vendor_keyframes,
    "@-webkit-keyframes spin { to { a: b; } }",
    "@-webkit-keyframes spin {\n  to {\n    a: b;\n  }\n}\n"
);
test!(
    keyframes_bubble_without_parent,
    "a { @keyframes x { from { b: c; } } }",
    "@keyframes x {\n  from {\n    b: c;\n  }\n}\n"
);
error!(
    mixin_is_unsupported,
    "@mixin foo { }", "Error: @mixin rules are not supported."
);
error!(
    include_is_unsupported,
    "a { @include foo; }", "Error: @include rules are not supported."
);
error!(
    each_is_unsupported,
    "@each $i in 1, 2 { a { b: $i; } }", "Error: @each rules are not supported."
);
