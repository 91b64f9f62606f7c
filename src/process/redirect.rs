use std::{
    fs::{File, OpenOptions},
    io,
    path::Path,
    process::Stdio,
};

/// Opens the file feeding the first stage, read-only.
pub fn input(path: &Path) -> io::Result<Stdio> {
    trace!(path = %path.display(), "redirecting stdin");

    File::open(path).map(Stdio::from)
}

/// Opens the file receiving the last stage, creating or truncating it.
pub fn output(path: &Path) -> io::Result<Stdio> {
    trace!(path = %path.display(), "redirecting stdout");

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map(Stdio::from)
}
