//! Human-readable rendering of one mismatched field.
//!
//! The output is for people only and is never parsed back.

mod external;
mod line;

pub use external::ExternalDiffRenderer;
pub use line::LineDiffRenderer;

use crate::config::{DiffConfig, RendererKind};
use crate::errors::Result;

/// Strategy turning an expected/saved pair into diff text.
pub trait DiffRenderer: Send + Sync {
    /// Render the difference between the two representations.
    ///
    /// # Errors
    ///
    /// Returns an error when the renderer cannot produce a diff (scratch
    /// file failure, missing or crashing external program).
    fn render(&self, expected: &str, stored: &str) -> Result<String>;
}

impl<F> DiffRenderer for F
where
    F: Fn(&str, &str) -> Result<String> + Send + Sync,
{
    fn render(&self, expected: &str, stored: &str) -> Result<String> {
        self(expected, stored)
    }
}

/// Build the renderer selected by the `[diff]` config section.
pub fn renderer_from_config(config: &DiffConfig) -> Box<dyn DiffRenderer> {
    match config.renderer {
        RendererKind::External => Box::new(ExternalDiffRenderer::from_config(config)),
        RendererKind::Line => Box::new(LineDiffRenderer::new(config.context_lines)),
    }
}

/// Replace the five HTML-significant characters with entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_closure_is_a_renderer() {
        let renderer = |a: &str, b: &str| -> Result<String> { Ok(format!("{a}|{b}")) };
        assert_eq!(renderer.render("x", "y").unwrap(), "x|y");
    }

    #[test]
    fn test_config_selects_line_renderer() {
        let config = DiffConfig {
            renderer: RendererKind::Line,
            ..DiffConfig::default()
        };
        let rendered = renderer_from_config(&config).render("a\n", "b\n").unwrap();
        assert!(rendered.contains("-a"));
        assert!(rendered.contains("+b"));
    }
}
