// src/application/confirm.rs

/// Blocking yes/no question put to the user before a destructive action.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Confirms everything, for `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

impl<F: FnMut(&str) -> bool> Confirmation for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
