/// Core error type for the bot.
///
/// Adapter crates map their transport errors into this type so the command
/// service can tell a remote failure apart from a domain outcome.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// The remote group store was unreachable, timed out, or returned data we
    /// could not use.
    #[error("remote error: {0}")]
    Remote(String),

    #[error("signature error: {0}")]
    Signature(String),

    #[error("external error: {0}")]
    External(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
