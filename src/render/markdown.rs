//! Markdown rendering for extracted articles.

use crate::error::Result;
use crate::model::{
    ContentBox, Document, Heading, Image, List, Paragraph, Table, CELL_LINE_SEPARATOR,
};

use super::html::write_table as write_html_table;
use super::renderer::{render_document, BlockRenderer};
use super::{RenderOptions, TableFallback};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut renderer = MarkdownRenderer::new(options.clone());
    Ok(render_document(&mut renderer, doc))
}

/// Markdown renderer.
///
/// Headings are followed by a single newline, every other block by a blank
/// line.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    /// Escape text that starts a block, such as a paragraph or list item.
    fn escape_block(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_block_start(&escape_markdown(text))
        } else {
            text.to_string()
        }
    }

    fn cell(&self, text: &str) -> String {
        let escaped = self.escape(text);
        let escaped = if self.options.escape_special_chars {
            escaped
        } else {
            escaped.replace('|', "\\|")
        };
        escaped
            .split(CELL_LINE_SEPARATOR)
            .collect::<Vec<_>>()
            .join("<br/>")
    }

    /// Nested lists are indented to the content column of their parent
    /// item: two spaces under `- `, three under `1. `, four under `10. `.
    fn write_list(&self, list: &List, indent: usize, out: &mut String) {
        for (i, item) in list.items.iter().enumerate() {
            let marker = if list.ordered {
                format!("{}.", i + 1)
            } else {
                self.options.list_marker.to_string()
            };
            out.push_str(&" ".repeat(indent));
            out.push_str(&marker);
            out.push(' ');
            out.push_str(&self.escape_block(&item.text));
            out.push('\n');
            if let Some(ref nested) = item.nested {
                self.write_list(nested, indent + marker.chars().count() + 1, out);
            }
        }
    }

    fn write_pipe_table(&self, table: &Table, out: &mut String) {
        let col_count = table.column_count();
        if col_count == 0 {
            return;
        }

        for (i, row) in table.rows.iter().enumerate() {
            let mut cells: Vec<String> = Vec::with_capacity(col_count);
            for cell in &row.cells {
                cells.push(self.cell(&cell.text));
                // Pipe tables have no spans; pad with empty cells.
                for _ in 1..cell.colspan {
                    cells.push(String::new());
                }
            }
            cells.resize(col_count.max(cells.len()), String::new());

            out.push('|');
            for cell in &cells {
                out.push(' ');
                out.push_str(cell);
                out.push_str(" |");
            }
            out.push('\n');

            // The first row is the header row of a pipe table.
            if i == 0 {
                out.push('|');
                for _ in 0..cells.len() {
                    out.push_str("---|");
                }
                out.push('\n');
            }
        }
    }
}

impl BlockRenderer for MarkdownRenderer {
    fn begin_document(&mut self, doc: &Document, out: &mut String) {
        if self.options.include_frontmatter {
            out.push_str(&doc.metadata().to_yaml_frontmatter());
        }
        if self.options.include_title && !doc.is_empty() {
            if let Some(title) = doc.title() {
                out.push_str(&format!("# {}\n\n", self.escape(title)));
            }
        }
    }

    fn end_document(&mut self, _doc: &Document, out: &mut String) {
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        if !out.is_empty() {
            out.push('\n');
        }
    }

    fn heading(&mut self, heading: &Heading, out: &mut String) {
        let level = heading.level.min(self.options.max_heading_level);
        out.push_str(&"#".repeat(level as usize));
        out.push(' ');
        out.push_str(&self.escape(&heading.text));
        out.push('\n');
    }

    fn paragraph(&mut self, paragraph: &Paragraph, out: &mut String) {
        out.push_str(&self.escape_block(&paragraph.text));
        out.push_str("\n\n");
    }

    fn table(&mut self, table: &Table, out: &mut String) {
        if let Some(ref caption) = table.caption {
            out.push_str(&format!("*{}*\n\n", self.escape(caption)));
        }
        if table.has_merged_cells() && self.options.table_fallback == TableFallback::Html {
            write_html_table(table, out);
        } else {
            self.write_pipe_table(table, out);
        }
        out.push('\n');
    }

    fn image(&mut self, image: &Image, out: &mut String) {
        let alt = image.alt_or_caption().replace(['[', ']'], "");
        out.push_str(&format!("![{}]({})\n", alt, image.url));
        if let Some(ref caption) = image.caption {
            out.push_str(&format!("*{}*\n", self.escape(caption)));
        }
        out.push('\n');
    }

    fn list(&mut self, list: &List, out: &mut String) {
        self.write_list(list, 0, out);
        out.push('\n');
    }

    fn content_box(&mut self, content_box: &ContentBox, body: &str, out: &mut String) {
        let kind = content_box.kind;
        out.push_str(&format!("> {} **{}:**", kind.icon(), kind.label()));
        if let Some(ref title) = content_box.title {
            out.push(' ');
            out.push_str(&self.escape(title));
        }
        out.push('\n');

        let body = body.trim_end();
        if !body.is_empty() {
            out.push_str(">\n");
            for line in body.lines() {
                if line.is_empty() {
                    out.push_str(">\n");
                } else {
                    out.push_str("> ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }
        out.push('\n');
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

/// Escape a leading marker that would turn text into a heading, quote,
/// list item or thematic break.
fn escape_block_start(text: &str) -> String {
    if text.starts_with(['#', '-', '+', '>', '=']) {
        return format!("\\{}", text);
    }
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && text[digits..].starts_with(['.', ')']) {
        return format!("{}\\{}", &text[..digits], &text[digits..]);
    }
    text.to_string()
}

/// Parse the pipe tables of a Markdown string back into cell rows.
///
/// Separator rows are skipped. Useful for checking that rendered tables keep
/// their shape.
pub fn parse_pipe_tables(markdown: &str) -> Vec<Vec<Vec<String>>> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in markdown.lines() {
        let line = line.trim();
        if line.starts_with('|') && line.ends_with('|') && line.len() > 1 {
            let inner = &line[1..line.len() - 1];
            if inner.split('|').all(|c| !c.is_empty() && c.chars().all(|ch| ch == '-' || ch == ':')) {
                continue;
            }
            current.push(split_row(inner));
        } else if !current.is_empty() {
            tables.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tables.push(current);
    }
    tables
}

/// Split a pipe-table row on unescaped pipes.
fn split_row(inner: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('\\');
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}
