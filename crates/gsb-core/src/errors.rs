/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the command
/// layer can propagate failures without knowing which backend produced them.
/// Malformed user input is never an `Error`: it is answered with a usage reply.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
