use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntrospectionError>;

#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Failed to parse introspection response at `{path}`: {message}")]
    Parse { path: String, message: String },

    #[error("Introspection query returned errors: {0}")]
    Graphql(String),

    #[error("Invalid introspection response: {0}")]
    Invalid(String),
}

impl IntrospectionError {
    pub(crate) fn parse(err: &serde_path_to_error::Error<serde_json::Error>) -> Self {
        Self::Parse {
            path: err.path().to_string(),
            message: err.inner().to_string(),
        }
    }
}
