use std::io::{BufRead, Write};

use rksearch::{parse_radius, Pattern, SearchError, SearchResult};

/// Reads one line from `input` as raw bytes, without its line terminator.
///
/// Returns `None` once the input is exhausted.
fn read_line<R: BufRead>(input: &mut R) -> SearchResult<Option<Vec<u8>>> {
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with(b"\n") {
        line.pop();
        if line.ends_with(b"\r") {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Collects the pattern and radius from an interactive (or piped) session
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> SearchResult<Option<Vec<u8>>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        read_line(&mut self.input)
    }

    /// Asks for the search string and validates it
    pub fn pattern(&mut self) -> SearchResult<Pattern> {
        let answer = self.ask("Enter the search string: ")?;
        Pattern::from_bytes(answer.unwrap_or_default())
    }

    /// Asks for the context radius and validates it
    pub fn radius(&mut self) -> SearchResult<usize> {
        match self.ask("Enter the radius of visibility of the context: ")? {
            Some(answer) => parse_radius(&String::from_utf8_lossy(&answer)),
            None => Err(SearchError::invalid_radius("")),
        }
    }
}
