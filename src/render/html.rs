//! Standalone HTML rendering.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::Result;
use crate::model::{
    ContentBox, Document, Heading, Image, List, Paragraph, Table, TableRow, CELL_LINE_SEPARATOR,
};

use super::renderer::{render_document, BlockRenderer};
use super::RenderOptions;

const STYLESHEET: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; max-width: 860px; margin: 0 auto; padding: 24px; color: #1f2933; }
h1 { border-bottom: 2px solid #1c7ed6; padding-bottom: 8px; }
h2 { border-bottom: 1px solid #dee2e6; padding-bottom: 4px; margin-top: 32px; }
table { border-collapse: collapse; width: 100%; margin: 16px 0; font-size: 0.95em; }
th, td { border: 1px solid #ced4da; padding: 6px 10px; text-align: left; vertical-align: top; }
th { background: #f1f3f5; }
caption { caption-side: top; font-style: italic; padding-bottom: 4px; }
figure { text-align: center; margin: 20px 0; }
figure img { max-width: 100%; height: auto; }
figcaption { font-style: italic; color: #495057; }
.content-box { border-left: 4px solid; border-radius: 4px; padding: 10px 14px; margin: 16px 0; }
.content-box-title { font-weight: bold; margin-bottom: 4px; }
.content-box.note { border-color: #1c7ed6; background: #e7f5ff; }
.content-box.warning { border-color: #f59f00; background: #fff9db; }
.content-box.tip { border-color: #37b24d; background: #ebfbee; }
@media print {
  body { max-width: none; padding: 0; font-size: 11pt; }
  h2 { page-break-after: avoid; }
  table, figure, .content-box { page-break-inside: avoid; }
}
"#;

/// Convert a document to a complete HTML page.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut renderer = HtmlRenderer::new(options.clone());
    Ok(render_document(&mut renderer, doc))
}

/// HTML renderer producing a standalone document with embedded CSS.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn write_list(&self, list: &List, out: &mut String) {
        let tag = if list.ordered { "ol" } else { "ul" };
        out.push_str(&format!("<{}>\n", tag));
        for item in &list.items {
            out.push_str("<li>");
            out.push_str(&encode_text(&item.text));
            if let Some(ref nested) = item.nested {
                out.push('\n');
                self.write_list(nested, out);
            }
            out.push_str("</li>\n");
        }
        out.push_str(&format!("</{}>\n", tag));
    }
}

impl BlockRenderer for HtmlRenderer {
    fn begin_document(&mut self, doc: &Document, out: &mut String) {
        let title = doc.title().unwrap_or("Article");
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        out.push_str(&format!("<title>{}</title>\n", encode_text(title)));
        out.push_str("<style>");
        out.push_str(STYLESHEET);
        out.push_str("</style>\n</head>\n<body>\n");

        if self.options.include_title {
            if let Some(title) = doc.title() {
                out.push_str(&format!("<h1>{}</h1>\n", encode_text(title)));
            }
        }
    }

    fn end_document(&mut self, _doc: &Document, out: &mut String) {
        out.push_str("</body>\n</html>\n");
    }

    fn heading(&mut self, heading: &Heading, out: &mut String) {
        let level = heading.level.min(self.options.max_heading_level);
        out.push_str(&format!(
            "<h{level}>{}</h{level}>\n",
            encode_text(&heading.text),
            level = level
        ));
    }

    fn paragraph(&mut self, paragraph: &Paragraph, out: &mut String) {
        out.push_str(&format!("<p>{}</p>\n", encode_text(&paragraph.text)));
    }

    fn table(&mut self, table: &Table, out: &mut String) {
        write_table(table, out);
    }

    fn image(&mut self, image: &Image, out: &mut String) {
        out.push_str("<figure>\n");
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
            encode_double_quoted_attribute(&image.url),
            encode_double_quoted_attribute(image.alt_or_caption())
        ));
        if let Some(ref caption) = image.caption {
            out.push_str(&format!("<figcaption>{}</figcaption>\n", encode_text(caption)));
        }
        out.push_str("</figure>\n");
    }

    fn list(&mut self, list: &List, out: &mut String) {
        self.write_list(list, out);
    }

    fn content_box(&mut self, content_box: &ContentBox, body: &str, out: &mut String) {
        let kind = content_box.kind;
        out.push_str(&format!("<div class=\"content-box {}\">\n", kind.css_class()));
        out.push_str(&format!(
            "<div class=\"content-box-title\">{} {}",
            kind.icon(),
            kind.label()
        ));
        if let Some(ref title) = content_box.title {
            out.push_str(": ");
            out.push_str(&encode_text(title));
        }
        out.push_str("</div>\n");
        out.push_str(body);
        out.push_str("</div>\n");
    }
}

/// Write `table` as an HTML table with `thead`/`tbody` sections.
///
/// Leading header rows go into `thead`; cell line breaks become `<br>`.
pub(super) fn write_table(table: &Table, out: &mut String) {
    out.push_str("<table>\n");
    if let Some(ref caption) = table.caption {
        out.push_str(&format!("<caption>{}</caption>\n", encode_text(caption)));
    }

    let header = table.header();
    if !header.is_empty() {
        out.push_str("<thead>\n");
        for row in header {
            write_row(row, out);
        }
        out.push_str("</thead>\n");
    }

    let body = table.body();
    if !body.is_empty() {
        out.push_str("<tbody>\n");
        for row in body {
            write_row(row, out);
        }
        out.push_str("</tbody>\n");
    }
    out.push_str("</table>\n");
}

fn write_row(row: &TableRow, out: &mut String) {
    let tag = if row.is_header { "th" } else { "td" };
    out.push_str("<tr>");
    for cell in &row.cells {
        let mut attrs = String::new();
        if cell.rowspan > 1 {
            attrs.push_str(&format!(" rowspan=\"{}\"", cell.rowspan));
        }
        if cell.colspan > 1 {
            attrs.push_str(&format!(" colspan=\"{}\"", cell.colspan));
        }

        let content = cell
            .text
            .split(CELL_LINE_SEPARATOR)
            .map(|line| encode_text(line).into_owned())
            .collect::<Vec<_>>()
            .join("<br>");
        out.push_str(&format!("<{}{}>{}</{}>", tag, attrs, content, tag));
    }
    out.push_str("</tr>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, BoxKind, ListItem, Metadata, TableCell};

    fn render(blocks: Vec<Block>) -> String {
        to_html(&Document::from_blocks(blocks), &RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_document_is_valid_page() {
        let html = render(Vec::new());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<body>\n</body>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_warning_box() {
        let content_box = ContentBox::new(BoxKind::Warning)
            .with_title("Caution")
            .with_block(Block::paragraph("Avoid <NSAIDs> & opioids"));
        let html = render(vec![Block::ContentBox(content_box)]);
        assert!(html.contains("<div class=\"content-box warning\">"));
        assert!(html.contains("⚠️ Warning: Caution"));
        assert!(html.contains("<p>Avoid &lt;NSAIDs&gt; &amp; opioids</p>"));
    }

    #[test]
    fn test_table_sections_and_spans() {
        let mut table = Table::new();
        table.add_row(TableRow::header(vec![TableCell::text("A"), TableCell::text("B")]));
        table.add_row(TableRow::new(vec![TableCell::text("1\n2").colspan(2)]));

        let html = render(vec![Block::Table(table)]);
        assert!(html.contains("<thead>\n<tr><th>A</th><th>B</th></tr>\n</thead>"));
        assert!(html.contains("<td colspan=\"2\">1<br>2</td>"));
    }

    #[test]
    fn test_image_figure() {
        let image = Image::new("https://x.org/a.png?x=1&y=\"2\"").with_caption("Ultrasound");
        let html = render(vec![Block::Image(image)]);
        assert!(html.contains("<figure>"));
        assert!(html.contains("src=\"https://x.org/a.png?x=1&amp;y=&quot;2&quot;\""));
        assert!(html.contains("<figcaption>Ultrasound</figcaption>"));
    }

    #[test]
    fn test_nested_list() {
        let list = List::ordered().with_item(
            ListItem::new("A").with_nested(List::unordered().with_item(ListItem::new("a"))),
        );
        let html = render(vec![Block::List(list)]);
        assert!(html.contains("<ol>\n<li>A\n<ul>\n<li>a</li>\n</ul>\n</li>\n</ol>"));
    }

    #[test]
    fn test_title_heading() {
        let metadata = Metadata {
            title: Some("Sepsis".to_string()),
            ..Default::default()
        };
        let doc = Document::new(metadata, vec![Block::paragraph("x")]);
        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("<title>Sepsis</title>"));
        assert!(html.contains("<h1>Sepsis</h1>"));
    }
}
