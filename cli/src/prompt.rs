use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};

const YES_ANSWERS: [&str; 2] = ["y", "yes"];

/// Line-based questions on stdin/stdout. Conversion errors go to the separate error stream.
pub struct Console<R, W, E> {
    input: R,
    output: W,
    errors: E,
    assume_yes: bool,
}

impl Console<io::StdinLock<'static>, io::Stdout, io::Stderr> {
    pub fn stdio(assume_yes: bool) -> Self {
        Console::new(io::stdin().lock(), io::stdout(), io::stderr(), assume_yes)
    }
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, output: W, errors: E, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            errors,
            assume_yes,
        }
    }

    /// Asks a yes/no question; anything but `y`/`yes` means no.
    pub fn confirm(&mut self, message: &str) -> Result<bool> {
        let question = format!("{} [{}/N]", message, YES_ANSWERS[0]);
        if self.assume_yes {
            writeln!(self.output, "{} {}", question, YES_ANSWERS[0])?;
            return Ok(true);
        }
        let answer = self.prompt(&question, |s| Ok(s.to_lowercase()), Some("no".to_string()))?;
        Ok(YES_ANSWERS.contains(&answer.as_str()))
    }

    /// Asks until a non-empty answer converts, or returns `default` on an empty answer.
    pub fn prompt<T, F>(&mut self, message: &str, convert: F, default: Option<T>) -> Result<T>
    where
        F: Fn(&str) -> Result<T>,
    {
        let mut default = default;
        loop {
            if message.ends_with(' ') {
                write!(self.output, "{}", message)?;
            } else {
                write!(self.output, "{} ", message)?;
            }
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(anyhow!("No answer given for \"{}\"", message.trim()));
            }

            let answer = line.trim();
            if answer.is_empty() {
                if let Some(value) = default.take() {
                    return Ok(value);
                }
                continue;
            }
            match convert(answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.errors, "Could not convert \"{}\": {}", answer, e)?,
            }
        }
    }
}

pub fn positive_int(value: &str) -> Result<u32> {
    let value: u32 = value.parse().map_err(|_| anyhow!("Expected a positive number"))?;
    if value < 1 {
        return Err(anyhow!("Expected a positive number"));
    }
    Ok(value)
}
