use std::{
    borrow::Cow,
    cell::RefCell,
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use grout::{codemap::SpanLoc, Fs, Logger};

#[macro_export]
macro_rules! test {
    (@base $( #[$attr:meta] ),*$func:ident, $input:expr, $output:expr, $options:expr) => {
        $(#[$attr])*
        #[test]
        #[allow(non_snake_case)]
        fn $func() {
            let css = grout::from_string($input.to_string(), &$options)
                .expect(concat!("failed to parse on ", $input));
            assert_eq!(
                String::from($output),
                css
            );
        }
    };
    ($( #[$attr:meta] ),*$func:ident, $input:expr, $output:expr, $options:expr) => {
        test!(@base $(#[$attr])* $func, $input, $output, $options);
    };
    ($( #[$attr:meta] ),*$func:ident, $input:expr, $output:expr) => {
        test!(@base $(#[$attr])* $func, $input, $output, grout::Options::default());
    };
}

/// Compile as LESS
#[macro_export]
macro_rules! less_test {
    ($( #[$attr:meta] ),*$func:ident, $input:expr, $output:expr) => {
        test!(
            @base $(#[$attr])* $func,
            $input,
            $output,
            grout::Options::default().input_syntax(grout::InputSyntax::Less)
        );
    };
}

/// Verify the error *message*
/// Span and scope information are not yet tested
#[macro_export]
macro_rules! error {
    (@base $( #[$attr:meta] ),*$func:ident, $input:expr, $err:expr, $options:expr) => {
        $(#[$attr])*
        #[test]
        #[allow(non_snake_case)]
        fn $func() {
            match grout::from_string($input.to_string(), &$options) {
                Ok(..) => panic!("did not fail"),
                Err(e) => assert_eq!($err, e.to_string()
                                                .chars()
                                                .take_while(|c| *c != '\n')
                                                .collect::<String>()
                                                .as_str()
                ),
            }
        }
    };
    ($( #[$attr:meta] ),*$func:ident, $input:expr, $err:expr) => {
        error!(@base $(#[$attr])* $func, $input, $err, grout::Options::default());
    };
    ($( #[$attr:meta] ),*$func:ident, $input:expr, $err:expr, $options:expr) => {
        error!(@base $(#[$attr])* $func, $input, $err, $options);
    };
}

/// In-memory files for `from_path`
#[derive(Debug)]
pub struct TestFs {
    files: BTreeMap<PathBuf, Cow<'static, str>>,
}

#[allow(unused)]
impl TestFs {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
        }
    }

    pub fn add_file(&mut self, name: &'static str, contents: &'static str) {
        self.files
            .insert(PathBuf::from(name), Cow::Borrowed(contents));
    }
}

impl Fs for TestFs {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        match self.files.get(path) {
            Some(contents) => Ok(contents.as_bytes().to_vec()),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )),
        }
    }
}

#[derive(Debug, Default)]
struct TestLoggerState {
    debug_messages: Vec<String>,
    warning_messages: Vec<String>,
}

#[derive(Debug, Default)]
pub struct TestLogger(RefCell<TestLoggerState>);

#[allow(unused)]
impl TestLogger {
    pub fn debug_messages(&self) -> Vec<String> {
        self.0.borrow().debug_messages.clone()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.0.borrow().warning_messages.clone()
    }
}

impl Logger for TestLogger {
    fn debug(&self, _location: SpanLoc, message: &str) {
        self.0.borrow_mut().debug_messages.push(message.into());
    }

    fn warning(&self, _location: SpanLoc, message: &str) {
        self.0.borrow_mut().warning_messages.push(message.into());
    }
}
