//! HTML output utilities.

use std::fmt::Write;

/// Escape text content (`&`, `<`, `>`).
pub fn escape_text(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape a double-quoted attribute value. Quotes of both kinds are
/// escaped so the value is safe whichever quoting a consumer re-emits it in.
pub fn escape_attr(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

fn write_attrs(output: &mut String, attrs: &[(&str, &str)]) {
    for (key, value) in attrs {
        let _ = write!(output, " {}=\"{}\"", key, escape_attr(value));
    }
}

/// Line-oriented HTML builder. Each element goes on its own line, nested
/// elements are indented two spaces per level.
pub struct HtmlBuilder {
    output: String,
    indent: usize,
}

impl Default for HtmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            indent: 0,
        }
    }

    /// Start an element and indent everything until the matching [`close`](Self::close).
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "<{tag}");
        write_attrs(&mut self.output, attrs);
        self.output.push_str(">\n");
        self.indent += 1;
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "</{tag}>");
        self
    }

    /// One-line element with escaped text content.
    pub fn text_element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.raw_element(tag, attrs, &escape_text(text))
    }

    /// One-line element whose content is trusted markup.
    pub fn raw_element(&mut self, tag: &str, attrs: &[(&str, &str)], inner: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "<{tag}");
        write_attrs(&mut self.output, attrs);
        let _ = writeln!(self.output, ">{inner}</{tag}>");
        self
    }

    /// Element with no content, e.g. an icon span.
    pub fn empty_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.raw_element(tag, attrs, "")
    }

    /// Finish building and return the markup.
    pub fn build(self) -> String {
        self.output
    }

    /// Current nesting depth.
    pub fn indent(&self) -> usize {
        self.indent
    }
}
