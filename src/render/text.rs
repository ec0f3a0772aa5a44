//! Plain text rendering for extracted articles.

use crate::error::Result;
use crate::model::{ContentBox, Document, Heading, Image, List, Paragraph, Table, TableRow};

use super::renderer::{render_document, BlockRenderer};
use super::RenderOptions;

/// Joins the lines of a flattened cell on one text row.
const CELL_LINE_JOINER: &str = " / ";

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut renderer = TextRenderer::new(options.clone());
    Ok(render_document(&mut renderer, doc))
}

/// Plain text renderer with underlined headings and fixed-width tables.
pub struct TextRenderer {
    options: RenderOptions,
}

impl TextRenderer {
    /// Create a new text renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn write_heading(&self, text: &str, level: u8, out: &mut String) {
        out.push_str(text);
        out.push('\n');
        let underline = match level {
            1 => Some('='),
            2 => Some('-'),
            3 => Some('~'),
            _ => None,
        };
        if let Some(c) = underline {
            out.push_str(&c.to_string().repeat(text.chars().count()));
            out.push('\n');
        }
        out.push('\n');
    }

    fn write_list(&self, list: &List, level: usize, out: &mut String) {
        let indent = "  ".repeat(level);
        for (i, item) in list.items.iter().enumerate() {
            let marker = if list.ordered {
                format!("{}.", i + 1)
            } else if level == 0 {
                "•".to_string()
            } else {
                "◦".to_string()
            };
            out.push_str(&format!("{}{} {}\n", indent, marker, item.text));
            if let Some(ref nested) = item.nested {
                self.write_list(nested, level + 1, out);
            }
        }
    }
}

impl BlockRenderer for TextRenderer {
    fn begin_document(&mut self, doc: &Document, out: &mut String) {
        if self.options.include_title && !doc.is_empty() {
            if let Some(title) = doc.title() {
                self.write_heading(title, 1, out);
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
        self.write_heading(&heading.text, level, out);
    }

    fn paragraph(&mut self, paragraph: &Paragraph, out: &mut String) {
        out.push_str(&paragraph.text);
        out.push_str("\n\n");
    }

    fn table(&mut self, table: &Table, out: &mut String) {
        if let Some(ref caption) = table.caption {
            out.push_str(caption);
            out.push('\n');
        }

        let rows: Vec<Vec<String>> = table.rows.iter().map(row_cells).collect();
        let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; col_count];
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let header_rows = table.header().len();
        for (i, row) in rows.iter().enumerate() {
            let line = widths
                .iter()
                .enumerate()
                .map(|(col, width)| {
                    let cell = row.get(col).map(String::as_str).unwrap_or("");
                    format!("{:<width$}", cell, width = *width)
                })
                .collect::<Vec<_>>()
                .join(" | ");
            out.push_str(line.trim_end());
            out.push('\n');

            if header_rows > 0 && i + 1 == header_rows {
                let rule = widths
                    .iter()
                    .map(|w| "-".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("-+-");
                out.push_str(&rule);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    fn image(&mut self, image: &Image, out: &mut String) {
        out.push_str(&format!("[Image: {}] {}\n", image.alt_or_caption(), image.url));
        if let Some(ref caption) = image.caption {
            if image.alt.as_deref() != Some(caption.as_str()) {
                out.push_str(caption);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    fn list(&mut self, list: &List, out: &mut String) {
        self.write_list(list, 0, out);
        out.push('\n');
    }

    fn content_box(&mut self, content_box: &ContentBox, body: &str, out: &mut String) {
        let kind = content_box.kind;
        match content_box.title {
            Some(ref title) => {
                out.push_str(&format!("[{} {}: {}]\n", kind.icon(), kind.label(), title))
            }
            None => out.push_str(&format!("[{} {}]\n", kind.icon(), kind.label())),
        }
        for line in body.trim_end().lines() {
            if !line.is_empty() {
                out.push_str("  ");
                out.push_str(line);
            }
            out.push('\n');
        }
        out.push('\n');
    }
}

/// Display text of each column, merged cells padded with empty columns.
fn row_cells(row: &TableRow) -> Vec<String> {
    let mut cells = Vec::new();
    for cell in &row.cells {
        cells.push(cell.lines().collect::<Vec<_>>().join(CELL_LINE_JOINER));
        for _ in 1..cell.colspan {
            cells.push(String::new());
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BoxKind, ListItem, Metadata, TableCell};

    fn render(blocks: Vec<Block>) -> String {
        to_text(&Document::from_blocks(blocks), &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_headings_underlined() {
        let text = render(vec![
            Block::heading(1, "Sepsis"),
            Block::heading(2, "Causes"),
            Block::heading(3, "Viral"),
            Block::heading(4, "Rare"),
        ]);
        assert_eq!(
            text,
            "Sepsis\n======\n\nCauses\n------\n\nViral\n~~~~~\n\nRare\n"
        );
    }

    #[test]
    fn test_table_columns() {
        let mut table = Table::new();
        table.add_row(TableRow::header(vec![TableCell::text("Drug"), TableCell::text("Dose")]));
        table.add_row(TableRow::from_strings(["Ceftriaxone", "2 g\nonce daily"]));

        let text = render(vec![Block::Table(table)]);
        assert_eq!(
            text,
            "Drug        | Dose\n------------+-----------------\nCeftriaxone | 2 g / once daily\n"
        );
    }

    #[test]
    fn test_nested_list_markers() {
        let list = List::unordered().with_item(
            ListItem::new("B").with_nested(List::ordered().with_item(ListItem::new("B1"))),
        );
        assert_eq!(render(vec![Block::List(list)]), "• B\n  1. B1\n");
    }

    #[test]
    fn test_content_box_indented() {
        let content_box = ContentBox::new(BoxKind::Tip)
            .with_title("Mnemonic")
            .with_block(Block::paragraph("I GET SMASHED"))
            .with_block(Block::paragraph("Gallstones"));
        assert_eq!(
            render(vec![Block::ContentBox(content_box)]),
            "[📝 Tip: Mnemonic]\n  I GET SMASHED\n\n  Gallstones\n"
        );
    }

    #[test]
    fn test_image_line() {
        let image = Image::new("https://x.org/a.png").with_caption("CT");
        assert_eq!(render(vec![Block::Image(image)]), "[Image: CT] https://x.org/a.png\nCT\n");
    }

    #[test]
    fn test_title_and_empty_document() {
        let metadata = Metadata {
            title: Some("Gout".to_string()),
            ..Default::default()
        };
        let doc = Document::new(metadata.clone(), vec![Block::paragraph("Uric acid")]);
        let text = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(text, "Gout\n====\n\nUric acid\n");

        let empty = Document::new(metadata, Vec::new());
        assert_eq!(to_text(&empty, &RenderOptions::default()).unwrap(), "");
    }
}
