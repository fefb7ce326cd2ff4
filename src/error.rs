use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to load `{resource}`: {reason}")]
    Load { resource: String, reason: String },

    #[error("malformed csv in `{resource}`: {source}")]
    Csv {
        resource: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("load of `{resource}` was cancelled")]
    Cancelled { resource: String },
}

impl ChartError {
    pub(crate) fn load(resource: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Load {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}
