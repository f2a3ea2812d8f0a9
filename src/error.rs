use std::path::PathBuf;
use thiserror::Error;

/// Failures past the (infallible) matrix build. All of them abort the run.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("provider {provider} has an entry for unknown feature '{feature}'")]
    UnknownFeature { provider: String, feature: String },

    #[error("rendering feature matrix")]
    Render(#[from] std::fmt::Error),

    #[error("serializing feature matrix")]
    Serialize(#[from] serde_json::Error),

    #[error("writing {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is out of date; rerun feature-matrix without --check", path.display())]
    Stale { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, MatrixError>;
