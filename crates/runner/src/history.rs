//! Command History
//!
//! Shell lines entered in the console, with an up/down recall cursor.

/// Recall direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall {
    /// Older entry (Up)
    Previous,
    /// Newer entry (Down)
    Next,
}

/// Append-only history of executed shell lines
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    /// Distance from the newest entry; `None` means not recalling
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and reset the recall cursor
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = None;
    }

    /// Move the cursor and return the line to show in the input.
    ///
    /// `Previous` stops at the oldest entry. `Next` past the newest entry
    /// returns an empty line. An empty history always returns an empty line.
    pub fn recall(&mut self, direction: Recall) -> &str {
        if self.entries.is_empty() {
            return "";
        }

        self.cursor = match (direction, self.cursor) {
            (Recall::Previous, None) => Some(0),
            (Recall::Previous, Some(n)) => Some((n + 1).min(self.entries.len() - 1)),
            (Recall::Next, Some(n)) if n > 0 => Some(n - 1),
            (Recall::Next, _) => None,
        };

        match self.cursor {
            Some(n) => &self.entries[self.entries.len() - 1 - n],
            None => "",
        }
    }

    /// Entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Current recall position (0 = newest), if recalling
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(lines: &[&str]) -> CommandHistory {
        let mut h = CommandHistory::new();
        for line in lines {
            h.push(*line);
        }
        h
    }

    #[test]
    fn test_previous_most_recent_first_then_clamps() {
        let mut h = history(&["ls", "pwd", "echo hi"]);
        let recalled: Vec<String> =
            (0..3).map(|_| h.recall(Recall::Previous).to_string()).collect();
        assert_eq!(recalled, vec!["echo hi", "pwd", "ls"]);

        assert_eq!(h.recall(Recall::Previous), "ls");
        assert_eq!(h.cursor(), Some(2));
    }

    #[test]
    fn test_next_past_newest_clears() {
        let mut h = history(&["a", "b"]);
        h.recall(Recall::Previous);
        h.recall(Recall::Previous);

        assert_eq!(h.recall(Recall::Next), "b");
        assert_eq!(h.recall(Recall::Next), "");
        assert_eq!(h.cursor(), None);
        assert_eq!(h.recall(Recall::Next), "");
    }

    #[test]
    fn test_push_resets_cursor() {
        let mut h = history(&["a", "b"]);
        h.recall(Recall::Previous);
        h.recall(Recall::Previous);
        h.push("c");

        assert_eq!(h.cursor(), None);
        assert_eq!(h.recall(Recall::Previous), "c");
        assert_eq!(h.entries(), &["a", "b", "c"]);
    }

    #[test]
    fn test_empty_history() {
        let mut h = CommandHistory::new();
        assert_eq!(h.recall(Recall::Previous), "");
        assert_eq!(h.recall(Recall::Next), "");
        assert!(h.is_empty());
    }
}
