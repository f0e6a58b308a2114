//! Leveled diagnostics recorded while laying out a document in lax mode.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticLevel {
    Message,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// Short machine-friendly category, such as `"cannot-fit-content"`.
    pub category: &'static str,
    pub message: String,
}

/// Collects diagnostics and mirrors each one to the `log` facade.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, level: DiagnosticLevel, category: &'static str, message: String) {
        match level {
            DiagnosticLevel::Message => log::debug!("[{}] {}", category, message),
            DiagnosticLevel::Warning => log::warn!("[{}] {}", category, message),
            DiagnosticLevel::Error => log::error!("[{}] {}", category, message),
        }
        self.entries.push(Diagnostic {
            level,
            category,
            message,
        });
    }

    pub fn message(&mut self, category: &'static str, message: impl Into<String>) {
        self.record(DiagnosticLevel::Message, category, message.into());
    }

    pub fn warning(&mut self, category: &'static str, message: impl Into<String>) {
        self.record(DiagnosticLevel::Warning, category, message.into());
    }

    pub fn error(&mut self, category: &'static str, message: impl Into<String>) {
        self.record(DiagnosticLevel::Error, category, message.into());
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.entries.iter().filter(|d| d.level == level).count()
    }

    pub fn in_category(&self, category: &str) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
