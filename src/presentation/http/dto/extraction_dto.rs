use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExtractRequestDto {
    pub file_name: String,
    #[serde(default)]
    pub model: Option<String>,
}
