use crate::application::ports::language_model::{GenerationRequest, LanguageModel};
use crate::application::services::prompts::filename_resolution_prompt;
use crate::application::services::reply_parsing::extract_json_array;
use crate::domain::entities::ConversationTurn;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his",
    "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most",
    "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our",
    "ours", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
    "yours",
];

/// Question words that survive stopword removal.
pub fn content_words(question: &str) -> Vec<String> {
    question
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| c.is_ascii_punctuation() && c != '.'))
        .map(|token| token.trim_end_matches('.'))
        .filter(|token| !token.is_empty())
        .filter(|token| !token.chars().all(|c| c.is_ascii_punctuation()))
        .filter(|token| !STOP_WORDS.contains(&token.to_lowercase().as_str()))
        .map(str::to_string)
        .collect()
}

/// Asks the model which known files a question refers to. Never fails.
#[derive(Debug, Default, Clone)]
pub struct FilenameResolver;

impl FilenameResolver {
    pub fn new() -> Self {
        Self
    }

    pub async fn resolve(
        &self,
        model: &dyn LanguageModel,
        question: &str,
        known_filenames: &[String],
        history: &[ConversationTurn],
    ) -> Vec<String> {
        let words = content_words(question);
        let request = GenerationRequest::new()
            .history(history)
            .human(filename_resolution_prompt(known_filenames, &words));

        let reply = match model.generate(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Filename resolution call failed: {}", e);
                return Vec::new();
            }
        };

        match extract_json_array(&reply) {
            Some(filenames) => filenames,
            None => {
                tracing::warn!("No filename array in model reply: {}", reply);
                Vec::new()
            }
        }
    }
}
