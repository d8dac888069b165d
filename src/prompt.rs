use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use termion::{color, cursor};

pub fn clear<W: Write>(stdout: &mut W) -> Result<()> {
    write!(
        stdout,
        "{}{}{}",
        termion::clear::All,
        cursor::Goto(1, 1),
        cursor::Show
    )?;

    Ok(())
}

pub fn heading<W: Write>(stdout: &mut W, text: &str) -> Result<()> {
    writeln!(
        stdout,
        "{}{}{}",
        color::Fg(color::Yellow),
        text,
        color::Fg(color::Reset)
    )?;
    Ok(())
}

pub fn prompt<R: BufRead, W: Write>(
    stdout: &mut W,
    stdin: &mut R,
    prompt_string: &str,
) -> Result<String> {
    write!(stdout, "{}", prompt_string)?;
    stdout.flush()?;

    let mut buffer = String::new();
    if stdin.read_line(&mut buffer)? == 0 {
        bail!("input closed");
    }

    Ok(buffer.trim().to_string())
}

/// Re-prompts until the answer parses as a number.
pub fn prompt_number<R: BufRead, W: Write>(
    stdout: &mut W,
    stdin: &mut R,
    prompt_string: &str,
) -> Result<usize> {
    loop {
        let answer = prompt(stdout, stdin, prompt_string)?;
        match answer.parse::<usize>() {
            Ok(number) => return Ok(number),
            Err(_) => flash_warning(stdout, &format!("'{}' is not a number", answer))?,
        }
    }
}

pub fn prompt_yesno<R: BufRead, W: Write>(
    stdout: &mut W,
    stdin: &mut R,
    prompt_string: &str,
) -> Result<bool> {
    let answer = prompt(stdout, stdin, prompt_string)?;
    Ok(matches!(answer.as_str(), "y" | "Y" | "yes"))
}

// Print a warning in red. Used for invalid prompt entries and recoverable errors.
pub fn flash_warning<W: Write>(stdout: &mut W, warning_text: &str) -> Result<()> {
    writeln!(
        stdout,
        "{}{}{}",
        color::Fg(color::Red),
        warning_text,
        color::Fg(color::Reset)
    )?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_trims_answer() {
        let mut stdin = Cursor::new("  hello  \n");
        let mut stdout = Vec::new();

        let answer = prompt(&mut stdout, &mut stdin, "Say: ").unwrap();
        assert_eq!(answer, "hello");
        assert!(String::from_utf8(stdout).unwrap().contains("Say: "));
    }

    #[test]
    fn test_prompt_number_reprompts_on_garbage() {
        let mut stdin = Cursor::new("abc\n-1\n7\n");
        let mut stdout = Vec::new();

        assert_eq!(prompt_number(&mut stdout, &mut stdin, "n: ").unwrap(), 7);
        let output = String::from_utf8(stdout).unwrap();
        assert!(output.contains("'abc' is not a number"));
        assert!(output.contains("'-1' is not a number"));
    }

    #[test]
    fn test_prompt_fails_on_closed_input() {
        let mut stdin = Cursor::new("");
        let mut stdout = Vec::new();
        assert!(prompt(&mut stdout, &mut stdin, "> ").is_err());
    }

    #[test]
    fn test_prompt_yesno() {
        let mut stdin = Cursor::new("Y\nn\n");
        let mut stdout = Vec::new();
        assert!(prompt_yesno(&mut stdout, &mut stdin, "? ").unwrap());
        assert!(!prompt_yesno(&mut stdout, &mut stdin, "? ").unwrap());
    }
}
