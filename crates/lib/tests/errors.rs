#[macro_use]
mod macros;

error!(unclosed_block, "a {", "Error: expected \"}\".");
error!(unmatched_close, "}", "Error: unmatched \"}\".");
error!(empty_selector_member, "a,, b { c: d; }", "Error: expected selector.");
error!(trailing_comma, "a, { c: d; }", "Error: expected selector.");
error!(unclosed_bracket, "a[b { c: d; }", "Error: expected \"]\".");
error!(user_error, "@error \"boom\";", "Error: boom");
error!(
    extend_without_target,
    "a { @extend ; }", "Error: Expected selector."
);
