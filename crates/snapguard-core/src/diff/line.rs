use super::DiffRenderer;
use crate::errors::Result;
use similar::TextDiff;

/// In-process unified diff, no subprocess or scratch files.
#[derive(Debug, Clone)]
pub struct LineDiffRenderer {
    context_lines: usize,
}

impl LineDiffRenderer {
    pub fn new(context_lines: usize) -> Self {
        Self { context_lines }
    }
}

impl Default for LineDiffRenderer {
    fn default() -> Self {
        Self::new(3)
    }
}

impl DiffRenderer for LineDiffRenderer {
    fn render(&self, expected: &str, stored: &str) -> Result<String> {
        let diff = TextDiff::from_lines(expected, stored);
        let mut output = String::new();

        // Same orientation as `diff -u expected saved`
        output.push_str("--- expected\n+++ saved\n");
        for hunk in diff
            .unified_diff()
            .context_radius(self.context_lines)
            .iter_hunks()
        {
            output.push_str(&hunk.to_string());
        }

        if !output.ends_with('\n') {
            output.push('\n');
        }
        Ok(output)
    }
}
