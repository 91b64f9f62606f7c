use std::{
    borrow::Cow,
    io::{self, BufRead},
};

#[derive(Debug)]
pub enum InputMessage {
    Line(String),
    Eof,
    Error(io::Error),
}

/// Reads the next line from stdin on the blocking pool.
///
/// On a terminal, input is read one line at a time, so a foreground stage
/// that inherits stdin sees what is typed while it runs. Piped input is
/// buffered and later lines may already have been consumed by the shell.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub async fn next_line() -> InputMessage {
    let read = tokio::task::spawn_blocking(|| read_line(&mut io::stdin().lock())).await;

    match read {
        Ok(msg) => msg,
        Err(err) => InputMessage::Error(io::Error::other(err)),
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> InputMessage {
    let mut buf = Vec::new();

    match reader.read_until(b'\n', &mut buf) {
        Ok(0) => InputMessage::Eof,
        Ok(_) => {
            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                warn!("input line is not valid utf-8, invalid bytes were replaced");
            }
            InputMessage::Line(line.trim_end_matches(['\n', '\r']).to_owned())
        }
        Err(err) => InputMessage::Error(err),
    }
}
