use std::fmt;

use serde::{Deserialize, Serialize};

/// One labelled line on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailLine {
    pub label: String,
    pub content: String,
}

/// Rendered detail page for a single record.
///
/// Absent fields are rendered as empty strings, never as placeholder text
/// like `undefined`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailView {
    pub heading: String,
    pub website_url: String,
    pub lines: Vec<DetailLine>,
}

impl DetailView {
    /// Looks up the content of a line by its label.
    pub fn line(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.content.as_str())
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        if !self.website_url.is_empty() {
            writeln!(f, "{}", self.website_url)?;
        }
        for line in &self.lines {
            writeln!(f, "{}: {}", line.label, line.content)?;
        }
        Ok(())
    }
}
