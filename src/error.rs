use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to start layout engine `{program}`: {source}")]
    EngineSpawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("layout engine rejected the graph description: {0}")]
    EngineRejected(String),
    #[error("malformed layout JSON: {0}")]
    LayoutJson(#[from] serde_json::Error),
    #[error("malformed position `{0}`")]
    Position(String),
    #[error("edge {edge} references object {index}, which is not a node")]
    MissingEndpoint { edge: usize, index: usize },
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,
    #[error("model request failed: {0}")]
    Model(String),
    #[error("model returned no text")]
    EmptyCompletion,
    #[error("unknown node `{0}` in flow table")]
    UnknownFlowNode(String),
    #[error("diagram has no frames")]
    NoFrames,
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                Error::Model(format!("status {code}: {}", body.trim()))
            }
            ureq::Error::Transport(transport) => Error::Model(transport.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
