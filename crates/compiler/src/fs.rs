use std::{
    io::{self, Error, ErrorKind},
    path::Path,
};

/// Where [`crate::from_path`] reads its input from.
///
/// Implement this to compile from an in-memory store or to forbid disk access
/// entirely. Only the entry file is ever read, since imports are passed
/// through to the output untouched.
pub trait Fs: std::fmt::Debug {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads from the real file system through [`std::fs`]. This is the default.
#[derive(Debug)]
pub struct StdFs;

impl Fs for StdFs {
    #[inline]
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Has no files at all. Every read fails with [`ErrorKind::NotFound`].
#[derive(Debug)]
pub struct NullFs;

impl Fs for NullFs {
    #[inline]
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        Err(Error::new(
            ErrorKind::NotFound,
            format!("{}: no file system is available", path.display()),
        ))
    }
}
