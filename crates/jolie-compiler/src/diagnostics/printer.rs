//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

/// Builder for rendering diagnostics with various options.
///
/// Without source text every diagnostic renders as one line. With source
/// text, diagnostics located in that source get an annotated snippet.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// Name of the source; only diagnostics recorded against this name get a snippet.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.source_line(diag, source) {
                Some((line, text)) => {
                    write!(w, "{}", renderer.render(&self.report(diag, line, text)))?
                }
                None => write!(w, "{}", diag)?,
            }
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", diag)?;
        }
        Ok(())
    }

    /// The 1-based line the diagnostic points at, if it lies in the rendered source.
    fn source_line<'a>(
        &self,
        diag: &DiagnosticMessage,
        source: &'a str,
    ) -> Option<(usize, &'a str)> {
        let ctx = diag.ctx.as_ref()?;
        if self.path.is_some_and(|p| p != ctx.source) {
            return None;
        }
        let line = usize::try_from(ctx.line).ok()?.checked_sub(1)?;
        source.lines().nth(line).map(|text| (line + 1, text))
    }

    fn report<'a>(
        &'a self,
        diag: &'a DiagnosticMessage,
        line: usize,
        text: &'a str,
    ) -> Vec<Group<'a>> {
        let mut snippet = Snippet::source(text)
            .line_start(line)
            .annotation(AnnotationKind::Primary.span(line_range(text)));

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let mut group = severity_to_level(diag.severity())
            .primary_title(&diag.message)
            .element(snippet);

        for hint in &diag.hints {
            group = group.element(Level::HELP.message(hint));
        }

        vec![group]
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// The line without its indentation and trailing blanks.
fn line_range(text: &str) -> std::ops::Range<usize> {
    let start = text.len() - text.trim_start().len();
    let end = text.trim_end().len();

    if start >= end {
        return start..(start + 1).min(text.len());
    }

    start..end
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
