use crate::display::DEFAULT_SCALE;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MODEL_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub model: ModelConfig,
    pub scale: f64,
    pub web_context: bool,
    pub graphviz: String,
}

#[derive(Clone, PartialEq)]
pub struct ModelConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            scale: DEFAULT_SCALE,
            web_context: false,
            graphviz: "dot".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_MODEL_ENDPOINT.to_string(),
        }
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
