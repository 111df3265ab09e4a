use std::io::Write;

const PROMPT: &str = "hovers> ";

/// Prompt and read one line from stdin. `Ok(None)` at end of input.
pub fn readline() -> Result<Option<String>, String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{PROMPT}").map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())?;

    let mut buffer = String::new();
    let read = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;

    Ok((read > 0).then_some(buffer))
}

/// Print a command error on its own line, ahead of the next prompt
pub fn print_error(out: &mut impl Write, err: &str) -> std::io::Result<()> {
    writeln!(out, "{}", err.trim_end())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_end_with_newline() {
        let mut out = Vec::new();
        print_error(&mut out, "error: Invalid quoting").unwrap();
        assert_eq!(out, b"error: Invalid quoting\n");
    }

    #[test]
    fn clap_errors_are_not_double_spaced() {
        let mut out = Vec::new();
        print_error(&mut out, "error: unrecognized subcommand 'foo'\n").unwrap();
        assert_eq!(out, b"error: unrecognized subcommand 'foo'\n");
    }
}
