/// Type alias for Result with anyhow::Error as the error type.
/// Application and CLI layers use this; domain code returns `DependencyError`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
