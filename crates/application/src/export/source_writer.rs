/// Line-oriented text buffer with two-space indentation.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    buffer: String,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends one line at `depth` levels of indentation.
    pub(crate) fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..depth {
                self.buffer.push_str("  ");
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    /// Appends several lines at the same depth.
    pub(crate) fn lines<I, S>(&mut self, depth: usize, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for text in lines {
            self.line(depth, text);
        }
    }

    /// Appends an empty line.
    pub(crate) fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Returns the text with a single trailing newline.
    pub(crate) fn finish(self) -> String {
        let mut text = self.buffer.trim_end().to_owned();
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::SourceWriter;

    #[test]
    fn indents_non_empty_lines_only() {
        let mut writer = SourceWriter::new();
        writer.line(0, "<form>");
        writer.line(1, "<div>");
        writer.line(2, "");
        writer.blank();
        writer.line(0, "</form>");

        assert_eq!(writer.finish(), "<form>\n  <div>\n\n\n</form>\n");
    }

    #[test]
    fn finish_collapses_trailing_whitespace() {
        let mut writer = SourceWriter::new();
        writer.lines(0, ["a", "b"]);
        writer.blank();
        writer.blank();

        assert_eq!(writer.finish(), "a\nb\n");
    }
}
