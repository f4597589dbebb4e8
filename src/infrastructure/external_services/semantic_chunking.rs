use std::collections::VecDeque;

use crate::application::ports::TextSplitter;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Splits on the coarsest separator present, recursing into pieces that are
/// still too long, then merges neighbours back up to `chunk_size` characters
/// with `chunk_overlap` characters carried between consecutive chunks.
#[derive(Debug, Clone)]
pub struct RTSplitter {
    separators: Vec<&'static str>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for RTSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl RTSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            separators: vec![
                "\n\n", // Double newline (paragraphs)
                "\n",   // Single newline
                " ",    // Space
                "",     // Character level
            ],
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    fn recursive_split(&self, text: &str, separators: &[&'static str]) -> Vec<String> {
        let position = separators
            .iter()
            .position(|sep| sep.is_empty() || text.contains(sep))
            .unwrap_or(separators.len().saturating_sub(1));
        let separator = separators.get(position).copied().unwrap_or("");
        let remaining = separators.get(position + 1..).unwrap_or(&[]);

        let splits: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut fitting: Vec<String> = Vec::new();

        for split in splits {
            if char_len(&split) <= self.chunk_size {
                fitting.push(split);
                continue;
            }

            if !fitting.is_empty() {
                chunks.extend(self.merge_splits(&fitting, separator));
                fitting.clear();
            }

            if remaining.is_empty() {
                chunks.push(split);
            } else {
                chunks.extend(self.recursive_split(&split, remaining));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge_splits(&fitting, separator));
        }

        chunks
    }

    fn merge_splits(&self, splits: &[String], separator: &str) -> Vec<String> {
        let separator_len = char_len(separator);
        let mut merged = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for split in splits {
            let len = char_len(split);
            let joiner = if window.is_empty() { 0 } else { separator_len };

            if total + len + joiner > self.chunk_size && !window.is_empty() {
                if let Some(chunk) = join_window(&window, separator) {
                    merged.push(chunk);
                }

                // Keep a tail of at most `chunk_overlap` characters that still
                // leaves room for the incoming split.
                while total > self.chunk_overlap
                    || (total > 0 && total + len + separator_len > self.chunk_size)
                {
                    let Some(first) = window.pop_front() else {
                        break;
                    };
                    let dropped_joiner = if window.is_empty() { 0 } else { separator_len };
                    total = total.saturating_sub(char_len(first) + dropped_joiner);
                }
            }

            let joiner = if window.is_empty() { 0 } else { separator_len };
            window.push_back(split);
            total += len + joiner;
        }

        if let Some(chunk) = join_window(&window, separator) {
            merged.push(chunk);
        }

        merged
    }
}

impl TextSplitter for RTSplitter {
    fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        if char_len(text) <= self.chunk_size {
            return vec![text.trim().to_string()];
        }

        self.recursive_split(text, &self.separators)
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn join_window(window: &VecDeque<&str>, separator: &str) -> Option<String> {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
