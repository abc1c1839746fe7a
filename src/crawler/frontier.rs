//! Layer frontier management
//!
//! Owns the ordered queue for the current depth layer, the cursor into it,
//! and the accumulation buffer for the next layer. One pass per layer:
//! every identifier before the cursor has been dequeued and either skipped
//! or fully processed.

use std::collections::BTreeSet;

/// Current-layer queue plus next-layer buffer
#[derive(Debug, Default)]
pub struct LayerFrontier {
    layer: Vec<String>,
    cursor: usize,
    next_buffer: Vec<String>,
}

impl LayerFrontier {
    /// Creates a frontier starting at the given layer
    pub fn new(layer: Vec<String>) -> Self {
        Self {
            layer,
            cursor: 0,
            next_buffer: Vec::new(),
        }
    }

    /// Restores a frontier from checkpointed state
    pub fn restore(layer: Vec<String>, cursor: usize, next_buffer: Vec<String>) -> Self {
        Self {
            layer,
            cursor,
            next_buffer,
        }
    }

    /// The current layer in processing order
    pub fn current_layer(&self) -> &[String] {
        &self.layer
    }

    /// Position of the next unprocessed identifier
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The accumulated next-layer buffer, duplicates included
    pub fn next_buffer(&self) -> &[String] {
        &self.next_buffer
    }

    /// The identifier at the cursor, or `None` when the layer is exhausted
    pub fn peek(&self) -> Option<&str> {
        self.layer.get(self.cursor).map(String::as_str)
    }

    /// Moves the cursor past the current identifier
    ///
    /// Called exactly once per dequeued identifier, whether it was skipped
    /// or processed.
    pub fn advance(&mut self) {
        if self.cursor < self.layer.len() {
            self.cursor += 1;
        }
    }

    /// Whether every identifier in the current layer has been dequeued
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.layer.len()
    }

    /// Appends a discovery to the next-layer buffer
    ///
    /// Duplicates are tolerated here; they are removed at layer close.
    pub fn push_next(&mut self, identifier: String) {
        self.next_buffer.push(identifier);
    }

    /// Closes the current layer
    ///
    /// Deduplicates the buffer (set semantics, sorted order) into the new
    /// current layer and resets the cursor to 0.
    pub fn close_layer(&mut self) {
        let unique: BTreeSet<String> = self.next_buffer.drain(..).collect();
        self.layer = unique.into_iter().collect();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontier_of(ids: &[&str]) -> LayerFrontier {
        LayerFrontier::new(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_peek_and_advance() {
        let mut frontier = frontier_of(&["a", "b"]);

        assert_eq!(frontier.peek(), Some("a"));
        assert_eq!(frontier.cursor(), 0);

        frontier.advance();
        assert_eq!(frontier.peek(), Some("b"));
        assert_eq!(frontier.cursor(), 1);
        assert!(!frontier.is_exhausted());

        frontier.advance();
        assert_eq!(frontier.peek(), None);
        assert!(frontier.is_exhausted());
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut frontier = frontier_of(&["a"]);
        frontier.advance();
        frontier.advance();
        assert_eq!(frontier.cursor(), 1);
    }

    #[test]
    fn test_empty_layer_is_exhausted() {
        let frontier = LayerFrontier::new(Vec::new());
        assert!(frontier.is_exhausted());
        assert_eq!(frontier.peek(), None);
    }

    #[test]
    fn test_close_layer_dedups_buffer() {
        let mut frontier = frontier_of(&["seed"]);
        for id in ["a", "b", "a", "c", "b"] {
            frontier.push_next(id.to_string());
        }
        frontier.advance();

        frontier.close_layer();

        assert_eq!(frontier.current_layer(), &["a", "b", "c"]);
        assert_eq!(frontier.cursor(), 0);
        assert!(frontier.next_buffer().is_empty());
    }

    #[test]
    fn test_close_layer_with_empty_buffer_gives_empty_layer() {
        let mut frontier = frontier_of(&["seed"]);
        frontier.advance();
        frontier.close_layer();
        assert!(frontier.current_layer().is_empty());
    }

    #[test]
    fn test_restore_resumes_mid_layer() {
        let frontier = LayerFrontier::restore(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            2,
            vec!["d".to_string()],
        );

        assert_eq!(frontier.peek(), Some("c"));
        assert_eq!(frontier.next_buffer(), &["d"]);
    }
}
