// src/cli/prompt.rs
use std::io::{BufRead, Write};
use tracing::debug;

use crate::application::Confirmation;

/// Asks on `output`, reads one line of `input`.
///
/// Only `y` or `yes` (any case) confirms; anything else, including end of
/// input or an I/O error, declines.
pub struct PromptConfirmation<'a, R: BufRead, W: Write> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> PromptConfirmation<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmation for PromptConfirmation<'_, R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N]: ")
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => {
                let answer = answer.trim();
                debug!(answer, "Confirmation answered");
                answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case("y\n", true)]
    #[case("YES\n", true)]
    #[case(" yes \n", true)]
    #[case("n\n", false)]
    #[case("\n", false)]
    #[case("", false)]
    #[case("maybe\n", false)]
    fn given_answer_when_confirming_then_only_yes_confirms(#[case] input: &str, #[case] expected: bool) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();

        let confirmed = PromptConfirmation::new(&mut input, &mut output).confirm("Delete?");

        assert_eq!(confirmed, expected);
        assert_eq!(String::from_utf8(output).unwrap(), "Delete? [y/N]: ");
    }
}
