use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrollError {
    #[error("Target element is not resolved; nothing to observe")]
    UnresolvedTarget,

    #[error("Lifecycle error: {0}")]
    Lifecycle(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    TerminalError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type ScrollResult<T> = Result<T, ScrollError>;

pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> ScrollResult<T>;
    fn with_context<F>(self, f: F) -> ScrollResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn context(self, msg: &str) -> ScrollResult<T> {
        self.map_err(|e| ScrollError::Unknown(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> ScrollResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ScrollError::Unknown(format!("{}: {}", f(), e)))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn context(self, msg: &str) -> ScrollResult<T> {
        self.ok_or_else(|| ScrollError::Unknown(msg.to_string()))
    }

    fn with_context<F>(self, f: F) -> ScrollResult<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| ScrollError::Unknown(f()))
    }
}

#[macro_export]
macro_rules! scroll_error {
    ($error_type:ident, $msg:expr) => {
        $crate::error::ScrollError::$error_type($msg.to_string())
    };
    ($error_type:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::error::ScrollError::$error_type(format!($fmt, $($arg)*))
    };
}
