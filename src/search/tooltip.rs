//! HTML tooltips for table cells with search hits highlighted.

use std::ops::Range;

use logsift_search::TextHighlighter;

const BR: &str = "<br>";
const SPAN_END: &str = "</span>";

/// Collects highlighted ranges of a cell value and renders it as an HTML
/// tooltip.
///
/// Highlighted text is wrapped in a colored `<span>`, everything is
/// HTML-escaped, and a hard `<br>` is inserted every `max_width` characters.
#[derive(Debug, Clone)]
pub struct TooltipGenerator {
    text: String,
    highlights: Vec<Range<usize>>,
    max_width: usize,
    span_begin: String,
}

impl TooltipGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlights: Vec::new(),
            max_width: logsift_config::defaults::tooltip_max_width(),
            span_begin: span_begin(
                &logsift_config::defaults::highlight_foreground(),
                &logsift_config::defaults::highlight_background(),
            ),
        }
    }

    /// Width and colors taken from the search settings.
    pub fn from_config(text: impl Into<String>, config: &logsift_config::SearchConfig) -> Self {
        Self::new(text)
            .with_max_width(config.tooltip_max_width)
            .with_colors(&config.highlight_foreground, &config.highlight_background)
    }

    /// Characters per line. Zero is treated as one.
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width.max(1);
        self
    }

    pub fn with_colors(mut self, foreground: &str, background: &str) -> Self {
        self.span_begin = span_begin(foreground, background);
        self
    }

    /// Whether any range has been highlighted.
    pub fn has_highlights(&self) -> bool {
        !self.highlights.is_empty()
    }

    /// Render the tooltip.
    pub fn tooltip(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 16);
        out.push_str("<html>");

        let mut column = 0;
        for (highlighted, part) in self.parts() {
            if highlighted {
                out.push_str(&self.span_begin);
            }

            let mut rest = part;
            // Split off full lines while the part does not fit on this one.
            while let Some((split, _)) = rest.char_indices().nth(self.max_width - column) {
                out.push_str(&html_escape(&rest[..split]));
                out.push_str(BR);
                column = 0;
                rest = &rest[split..];
            }
            out.push_str(&html_escape(rest));
            column += rest.chars().count();

            if highlighted {
                out.push_str(SPAN_END);
            }
        }

        if out.ends_with(BR) {
            out.truncate(out.len() - BR.len());
        }
        if out.ends_with("<br></span>") {
            out.truncate(out.len() - "<br></span>".len());
            out.push_str(SPAN_END);
        }
        out.push_str("</html>");
        out
    }

    /// Alternating (plain, highlighted) slices of the text. Ranges that are
    /// out of order, overlapping or not on character boundaries are skipped.
    fn parts(&self) -> Vec<(bool, &str)> {
        let mut ranges = self.highlights.clone();
        ranges.sort_by_key(|r| r.start);

        let mut parts = Vec::with_capacity(ranges.len() * 2 + 1);
        let mut pos = 0;
        for range in ranges {
            if range.start < pos || range.end <= range.start {
                continue;
            }
            let (Some(plain), Some(hit)) = (
                self.text.get(pos..range.start),
                self.text.get(range.start..range.end),
            ) else {
                log::warn!("Ignoring highlight {:?} outside of the cell text", range);
                continue;
            };
            parts.push((false, plain));
            parts.push((true, hit));
            pos = range.end;
        }
        parts.push((false, &self.text[pos..]));
        parts
    }
}

impl TextHighlighter for TooltipGenerator {
    fn highlight_text(&mut self, from: usize, to: usize) {
        self.highlights.push(from..to);
    }
}

fn span_begin(foreground: &str, background: &str) -> String {
    format!(
        "<span style='color: {}; background-color: {}'>",
        html_escape(foreground),
        html_escape(background)
    )
}

/// Escape text for inclusion in HTML.
fn html_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
