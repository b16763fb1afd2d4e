//! Indented line writer for emitted source text.

use mockgen_common::layout::INDENT_WIDTH;

#[derive(Debug, Default)]
pub struct SourceWriter {
    output: String,
    indent: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer whose lines start at `indent` levels.
    pub fn with_indent(indent: usize) -> Self {
        Self {
            output: String::new(),
            indent,
        }
    }

    /// Write one indented line. Empty text writes an empty line without indentation.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent * INDENT_WIDTH {
                self.output.push(' ');
            }
            self.output.push_str(text);
        }
        self.output.push('\n');
    }

    /// Write pre-rendered text verbatim, ensuring it ends with a newline.
    pub fn raw(&mut self, text: &str) {
        self.output.push_str(text);
        if !text.ends_with('\n') {
            self.output.push('\n');
        }
    }

    /// Write `head {`, run `body` one level deeper, then write `}`.
    pub fn block(&mut self, head: &str, body: impl FnOnce(&mut SourceWriter)) {
        self.line(&format!("{head} {{"));
        self.increase_indent();
        body(self);
        self.decrease_indent();
        self.line("}");
    }

    pub fn increase_indent(&mut self) {
        self.indent += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Emitted text without the trailing newline.
    pub fn finish(mut self) -> String {
        while self.output.ends_with('\n') {
            self.output.pop();
        }
        self.output
    }
}
