pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("line {line_no} invalid, {reason}: '{line}'")]
    MalformedLine {
        line_no: usize,
        line: String,
        reason: &'static str,
    },

    #[error("self-referencing edge on vertex `{name}`")]
    SelfLoop { name: String },

    #[error("nothing left in graph")]
    Exhausted,

    #[error("family listing line {line_no} invalid: {message}")]
    MalformedFamily { line_no: usize, message: String },

    #[error("degree bucket invariant violated: {message}")]
    BrokenInvariant { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
