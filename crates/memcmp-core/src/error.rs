use thiserror::Error;

/// All errors produced while sampling and reporting memory sizes.
///
/// None of these are fatal to a run: the source readers turn them into
/// not-found readings at their boundary, and only the binary decides whether
/// a missing source should change the exit status.
#[derive(Error, Debug)]
pub enum CompareError {
    /// An external utility could not be spawned.
    #[error("Failed to run `{command}`: {source}")]
    SourceUnavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A source was opened but reading its text failed part-way.
    #[error("Failed to read {source_name} output: {source}")]
    SourceRead {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// A `sysconf` query returned its error indicator.
    #[error("sysconf({name}) failed with errno {errno}")]
    Sysconf { name: &'static str, errno: i32 },

    /// The comparison report could not be serialised.
    #[error("Failed to serialise report: {0}")]
    Report(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a source name.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the memcmp crates.
pub type Result<T> = std::result::Result<T, CompareError>;
