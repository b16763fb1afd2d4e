use colored::Colorize;

use mockgen_common::{Diagnostic, DiagnosticCategory};

pub struct Reporter {
    color: bool,
    verbose: bool,
}

impl Reporter {
    pub fn new(color: bool, verbose: bool) -> Self {
        Reporter { color, verbose }
    }

    /// Diagnostics worth printing: informational messages only in verbose mode.
    pub fn visible<'a>(&self, diagnostics: &'a [Diagnostic]) -> Vec<&'a Diagnostic> {
        diagnostics
            .iter()
            .filter(|d| self.verbose || d.category != DiagnosticCategory::Message)
            .collect()
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in self.visible(diagnostics).into_iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = String::new();
        if diagnostic.file.is_empty() {
            output.push_str("<unknown>");
        } else {
            output.push_str(&diagnostic.file);
        }
        if !diagnostic.member.is_empty() {
            output.push(':');
            output.push_str(&diagnostic.member);
        }

        output.push_str(" - ");
        output.push_str(&category);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    /// One-line tally printed after the diagnostics.
    pub fn summary(&self, mocks: usize, diagnostics: &[Diagnostic]) -> String {
        let warnings = diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Warning)
            .count();
        let noun = if mocks == 1 { "mock" } else { "mocks" };
        let text = format!("Generated {mocks} {noun} with {warnings} warning(s).");
        if self.color && warnings > 0 {
            text.yellow().to_string()
        } else {
            text
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }

        let label = format!("MG{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
