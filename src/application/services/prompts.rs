use crate::application::ports::language_model::OutputSchema;

pub const CONTEXTUALIZE_QUESTION_PROMPT: &str = "Given a chat history and the latest user question \
which might reference context in the chat history, formulate a standalone question which can be \
understood without the chat history. Do NOT answer the question, just reformulate it if needed and \
otherwise return it as is.";

pub const QA_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Use the following context to \
answer the user's question or tell about the same that you have found from the document(s). If \
the context does not contain the answer, say that you don't know. Do not make anything up.";

pub const GROUNDED_ANSWER_TEMPLATE: &str = "You are an assistant for question-answering tasks. Use \
the following pieces of retrieved context to answer the question. If you don't know the answer, \
say that you don't know. DON'T MAKE UP ANYTHING.\n\n{context}\n\n---\n\nAnswer the question based \
on the above context: {question}";

pub const SLA_EXTRACTION_PROMPT: &str = "Extract every Service Level Agreement (SLA) described in \
the document. For each SLA provide:\n\
1. sla_name: the name or title of the SLA\n\
2. parties_involved: the parties bound by the agreement\n\
3. system_concerned: the system or service the SLA applies to\n\
4. description: a short description of the commitment\n\
5. associated_metrics: the list of metrics used to measure the SLA\n\
6. page_number: the page where the SLA appears\n\
7. Return the result in json format, as a list of objects with exactly these keys. Use \
\"Not Mentioned\" for any value the document does not state.";

pub fn context_message(context: &str) -> String {
    format!("Context: {}", context)
}

pub fn grounded_answer_prompt(context: &str, question: &str) -> String {
    GROUNDED_ANSWER_TEMPLATE
        .replace("{context}", context)
        .replace("{question}", question)
}

pub fn filename_resolution_prompt(filenames: &[String], words: &[String]) -> String {
    let filenames = serde_json::to_string(filenames).unwrap_or_else(|_| "[]".to_string());
    let words = serde_json::to_string(words).unwrap_or_else(|_| "[]".to_string());
    format!(
        "These are list of file names: {} and these are list of words: {}. only expect array of file names",
        filenames, words
    )
}

/// Strict schema for `{"docs_info": [DocInfo]}` replies.
pub fn extraction_schema() -> OutputSchema {
    let string = serde_json::json!({ "type": "string" });
    OutputSchema {
        name: "ExtractInformation".to_string(),
        schema: serde_json::json!({
            "type": "object",
            "properties": {
                "docs_info": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "sla_name": string,
                            "parties_involved": string,
                            "system_concerned": string,
                            "description": string,
                            "associated_metrics": { "type": "array", "items": string },
                            "page_number": { "type": ["integer", "null"] }
                        },
                        "required": [
                            "sla_name",
                            "parties_involved",
                            "system_concerned",
                            "description",
                            "associated_metrics",
                            "page_number"
                        ],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["docs_info"],
            "additionalProperties": false
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grounded_answer_prompt() {
        let prompt = grounded_answer_prompt("uptime is 99.9%", "what is the uptime?");

        assert!(prompt.contains("uptime is 99.9%\n\n---\n\n"));
        assert!(prompt.ends_with("Answer the question based on the above context: what is the uptime?"));
        assert!(!prompt.contains("{context}"));
    }

    #[test]
    fn test_filename_prompt_lists_inputs() {
        let prompt = filename_resolution_prompt(
            &["aws_sla.pdf".to_string()],
            &["aws".to_string(), "uptime".to_string()],
        );

        assert_eq!(
            prompt,
            r#"These are list of file names: ["aws_sla.pdf"] and these are list of words: ["aws","uptime"]. only expect array of file names"#
        );
    }

    #[test]
    fn test_extraction_schema_covers_record_fields() {
        let schema = extraction_schema();
        let item = &schema.schema["properties"]["docs_info"]["items"];
        assert_eq!(item["required"].as_array().map(|r| r.len()), Some(6));
        assert!(SLA_EXTRACTION_PROMPT.contains("system_concerned"));
    }
}
