//! CLI commands

mod changelog;
mod init;
mod spellcheck;

pub use changelog::ChangelogCommand;
pub use init::InitCommand;
pub use spellcheck::SpellcheckCommand;
