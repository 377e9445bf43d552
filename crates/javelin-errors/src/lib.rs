//! Rendering of positioned messages with source snippets.

use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn level(self) -> Level {
        match self {
            Self::Error => Level::Error,
            Self::Warning => Level::Warning,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    range: TextRange,
    label: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, range: TextRange) -> Self {
        Self { severity, message: message.into(), range, label: "here".to_owned() }
    }

    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self::new(Severity::Error, message, range)
    }

    pub fn warning(message: impl Into<String>, range: TextRange) -> Self {
        Self::new(Severity::Warning, message, range)
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = self.severity.level();
        let message = level.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(level.span(self.range.into()).label(&self.label))
                .fold(true),
        );
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;

    #[test]
    fn renders_snippet_with_origin() {
        let text = "class A {\n  int x = ;\n}\n";
        let range = TextRange::at(TextSize::new(20), TextSize::new(1));
        let diagnostic = Diagnostic::error("expected expression", range).with_label("found `;`");
        let rendered = diagnostic.render(&Renderer::plain(), "A.java", text).to_string();

        assert!(rendered.starts_with("error: expected expression"), "{rendered}");
        assert!(rendered.contains("A.java:2:"), "{rendered}");
        assert!(rendered.contains("found `;`"), "{rendered}");
    }

    #[test]
    fn warning_level() {
        let range = TextRange::empty(TextSize::new(0));
        let diagnostic = Diagnostic::warning("unused import", range);
        assert_eq!(diagnostic.severity(), Severity::Warning);
        let rendered = diagnostic.render(&Renderer::plain(), "A.java", "import a.B;").to_string();
        assert!(rendered.starts_with("warning: unused import"), "{rendered}");
    }
}
