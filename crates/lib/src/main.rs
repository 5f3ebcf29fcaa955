use std::{
    fs::OpenOptions,
    io::{stdin, stdout, Read, Write},
};

use clap::{builder::PossibleValue, value_parser, Arg, ArgAction, Command, ValueEnum};

use grout::{from_path, from_string, InputSyntax, Options, OutputStyle};

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Style {
    Expanded,
    Compressed,
}

impl ValueEnum for Style {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Expanded, Self::Compressed]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Expanded => PossibleValue::new("expanded"),
            Self::Compressed => PossibleValue::new("compressed"),
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Syntax {
    Scss,
    Less,
}

impl ValueEnum for Syntax {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Scss, Self::Less]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Scss => PossibleValue::new("scss"),
            Self::Less => PossibleValue::new("less"),
        })
    }
}

fn cli() -> Command {
    Command::new("grout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve SCSS and LESS nesting and extend into plain CSS")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .action(ArgAction::Version)
                .long("version")
                .short('v')
                .global(true)
        )
        .arg(
            Arg::new("STDIN")
                .action(ArgAction::SetTrue)
                .long("stdin")
                .help("Read the stylesheet from stdin"),
        )
        .arg(
            Arg::new("STYLE")
                .short('s')
                .long("style")
                .help("Minified or expanded output")
                .default_value("expanded")
                .ignore_case(true)
                .num_args(1)
                .value_parser(value_parser!(Style)),
        )
        .arg(
            Arg::new("SYNTAX")
                .long("syntax")
                .help("The input dialect. Inferred from the file extension when omitted.")
                .ignore_case(true)
                .num_args(1)
                .value_parser(value_parser!(Syntax)),
        )
        .arg(
            Arg::new("NO_CHARSET")
                .action(ArgAction::SetTrue)
                .long("no-charset")
                .help("Don't emit a @charset or BOM for CSS with non-ASCII characters."),
        )
        .arg(
            Arg::new("NO_UNICODE")
                .action(ArgAction::SetTrue)
                .long("no-unicode")
                .help("Whether to use Unicode characters for messages.")
        )
        .arg(
            Arg::new("QUIET")
                .action(ArgAction::SetTrue)
                .short('q')
                .long("quiet")
                .help("Don't print warnings."),
        )
        .arg(
            Arg::new("INPUT")
                .value_parser(value_parser!(String))
                .required_unless_present("STDIN")
                .help("SCSS or LESS file"),
        )
        .arg(
            Arg::new("OUTPUT")
                .help("Output CSS file")
        )
}

fn main() -> std::io::Result<()> {
    let matches = cli().get_matches();

    let style = match matches.get_one::<Style>("STYLE") {
        Some(Style::Compressed) => OutputStyle::Compressed,
        Some(Style::Expanded) | None => OutputStyle::Expanded,
    };

    let mut options = Options::default()
        .style(style)
        .quiet(matches.get_flag("QUIET"))
        .unicode_error_messages(!matches.get_flag("NO_UNICODE"))
        .allows_charset(!matches.get_flag("NO_CHARSET"));

    match matches.get_one::<Syntax>("SYNTAX") {
        Some(Syntax::Scss) => options = options.input_syntax(InputSyntax::Scss),
        Some(Syntax::Less) => options = options.input_syntax(InputSyntax::Less),
        None => {}
    }

    let options = &options;

    let (mut stdout_write, mut file_write);
    let buf_out: &mut dyn Write = if let Some(path) = matches.get_one::<String>("OUTPUT") {
        file_write = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        &mut file_write
    } else {
        stdout_write = stdout();
        &mut stdout_write
    };

    let result = if let Some(name) = matches.get_one::<String>("INPUT") {
        from_path(name, options)
    } else {
        let mut buffer = String::new();
        stdin().read_to_string(&mut buffer)?;
        from_string(buffer, options)
    };

    buf_out.write_all(
        result
            .unwrap_or_else(|e| {
                eprintln!("{}", e);
                std::process::exit(1)
            })
            .as_bytes(),
    )?;
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::cli;

    #[test]
    fn verify() {
        cli().debug_assert();
    }
}
