#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum GraphDexError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error from {api}: {message}")]
    Api { api: String, message: String },

    #[error("API JSON error from {api}: {source}")]
    ApiJson {
        api: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("GraphQL errors from {api}: {message}")]
    GraphQl { api: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "API key required: set the {env_var} environment variable or pass --api-key.\n\nTo set:\n  export {env_var}=your-key\n\nGet a free key at {docs_url}"
    )]
    ApiKeyRequired { env_var: String, docs_url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
