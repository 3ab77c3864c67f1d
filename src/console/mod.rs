mod prompt;

#[cfg(test)]
pub use prompt::SuppliedCredentials;
pub use prompt::{CredentialPrompt, TerminalPrompt};
