/// Separator between the words of a single command.
pub const WORD_DELIMITER: char = ' ';

/// Separator between the stages of a pipeline.
pub const PIPE_DELIMITER: char = '|';

/// Splits `line` on `delimiter`, collapsing runs of the delimiter.
///
/// No quoting or escaping is recognised, so a delimiter can never appear
/// inside a token. Empty input yields no tokens.
pub fn split(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).filter(|tok| !tok.is_empty()).collect()
}

pub fn words(line: &str) -> Vec<&str> {
    split(line, WORD_DELIMITER)
}
