#[macro_use]
mod macros;

use macros::TestLogger;

#[test]
fn debug_is_logged() {
    let input = "@debug \"hello\";\na { b: c; }";
    let logger = TestLogger::default();
    let options = grout::Options::default().logger(&logger);
    let output = grout::from_string(input.to_string(), &options).expect(input);
    assert_eq!(&output, "a {\n  b: c;\n}\n");
    assert_eq!(&[String::from("hello")], logger.debug_messages().as_slice());
    assert!(logger.warning_messages().is_empty());
}

#[test]
fn warn_is_logged() {
    let input = "a { @warn oh   no; b: c; }";
    let logger = TestLogger::default();
    let options = grout::Options::default().logger(&logger);
    let output = grout::from_string(input.to_string(), &options).expect(input);
    assert_eq!(&output, "a {\n  b: c;\n}\n");
    assert_eq!(&[String::from("oh no")], logger.warning_messages().as_slice());
}

#[test]
fn quiet_silences_everything() {
    let input = "@debug a;\n@warn b;";
    let logger = TestLogger::default();
    let options = grout::Options::default().logger(&logger).quiet(true);
    let output = grout::from_string(input.to_string(), &options).expect(input);
    assert_eq!(&output, "");
    assert!(logger.debug_messages().is_empty());
    assert!(logger.warning_messages().is_empty());
}

#[test]
fn less_extend_outside_rule_warns() {
    let input = "&:extend(.a);\n.a { b: c; }";
    let logger = TestLogger::default();
    let options = grout::Options::default()
        .logger(&logger)
        .input_syntax(grout::InputSyntax::Less);
    let output = grout::from_string(input.to_string(), &options).expect(input);
    assert_eq!(&output, ".a {\n  b: c;\n}\n");
    assert_eq!(
        &[String::from(
            "&:extend() is only allowed inside a rule and has been ignored."
        )],
        logger.warning_messages().as_slice()
    );
}
