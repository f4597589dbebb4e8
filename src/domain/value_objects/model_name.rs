use serde::{Deserialize, Serialize};

/// Language models a request may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ModelName {
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "llama3.2")]
    Llama32,
    #[serde(rename = "phi3")]
    Phi3,
    #[serde(rename = "mistral")]
    Mistral,
    #[serde(rename = "gemma2:2b")]
    Gemma2_2b,
}

/// Runtime that serves a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    OpenAi,
    Ollama,
}

impl ModelName {
    pub const ALL: [ModelName; 6] = [
        ModelName::Gpt4o,
        ModelName::Gpt4oMini,
        ModelName::Llama32,
        ModelName::Phi3,
        ModelName::Mistral,
        ModelName::Gemma2_2b,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Gpt4o => "gpt-4o",
            ModelName::Gpt4oMini => "gpt-4o-mini",
            ModelName::Llama32 => "llama3.2",
            ModelName::Phi3 => "phi3",
            ModelName::Mistral => "mistral",
            ModelName::Gemma2_2b => "gemma2:2b",
        }
    }

    pub fn backend(&self) -> ModelBackend {
        match self {
            ModelName::Gpt4o | ModelName::Gpt4oMini => ModelBackend::OpenAi,
            ModelName::Llama32 | ModelName::Phi3 | ModelName::Mistral | ModelName::Gemma2_2b => {
                ModelBackend::Ollama
            }
        }
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelName::ALL
            .iter()
            .find(|model| model.as_str() == s.trim())
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = ModelName::ALL.iter().map(|m| m.as_str()).collect();
                format!("Unknown model '{}'. Known models: {}", s, known.join(", "))
            })
    }
}
