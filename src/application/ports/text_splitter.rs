pub trait TextSplitter: Send + Sync {
    /// Non-empty, trimmed chunks in document order.
    fn split_text(&self, text: &str) -> Vec<String>;
}
