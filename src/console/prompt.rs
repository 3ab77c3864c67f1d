use crate::domain::credentials::Credentials;
use std::io;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Source of the account credentials. The password must never be echoed.
pub trait CredentialPrompt {
    fn credentials(&mut self) -> Result<Credentials, PromptError>;
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("unable to read from the terminal: {0}")]
    Io(#[from] io::Error),
    #[error("input was closed before the {0} was entered")]
    Closed(&'static str),
}

/// Asks for the email on stdin and reads the password without echo.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn credentials(&mut self) -> Result<Credentials, PromptError> {
        let mut stdout = io::stdout();
        write!(stdout, "Enter Email: ")?;
        stdout.flush()?;

        let email = read_email(&mut io::stdin().lock())?;
        let password = rpassword::prompt_password("Enter Password: ")?;

        Ok(Credentials::new(email, password))
    }
}

fn read_email(input: &mut impl BufRead) -> Result<String, PromptError> {
    let mut email = String::new();
    if input.read_line(&mut email)? == 0 {
        return Err(PromptError::Closed("email"));
    }

    Ok(email.trim_end_matches(['\r', '\n']).to_string())
}

/// Credentials handed over up front, for runs without a terminal.
#[cfg(test)]
pub struct SuppliedCredentials(Option<Credentials>);

#[cfg(test)]
impl SuppliedCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        SuppliedCredentials(Some(Credentials::new(email, password)))
    }
}

#[cfg(test)]
impl CredentialPrompt for SuppliedCredentials {
    fn credentials(&mut self) -> Result<Credentials, PromptError> {
        self.0.take().ok_or(PromptError::Closed("email"))
    }
}
