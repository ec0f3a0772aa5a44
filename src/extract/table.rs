//! Table extraction.

use ego_tree::iter::Edge;
use ego_tree::NodeId;
use scraper::ElementRef;

use super::list::{is_list, item_text, nested_lists};
use super::{dom, BlockExtractor, ExtractionWarning};
use crate::model::{Table, TableCell, TableRow, CELL_LINE_SEPARATOR};

const TOP_LEVEL_MARKER: &str = "•";
const NESTED_MARKER: &str = "◦";

impl BlockExtractor<'_> {
    /// Build a table from a `table` element or a table wrapper.
    pub(super) fn extract_table(&mut self, el: ElementRef<'_>) -> Option<Table> {
        let table_el = if dom::tag(el) == "table" {
            Some(el)
        } else {
            dom::find_descendant(el, |e| dom::tag(e) == "table")
        };
        let Some(table_el) = table_el else {
            self.warn(ExtractionWarning::EmptyTable);
            return None;
        };

        let mut table = Table::new();
        for child in dom::child_elements(table_el) {
            match dom::tag(child) {
                "caption" => {
                    let caption = self.clean(&dom::visible_text(child));
                    if !caption.is_empty() {
                        table.caption = Some(caption);
                    }
                }
                "thead" | "tbody" | "tfoot" => {
                    let in_head = dom::tag(child) == "thead";
                    for tr in dom::child_elements(child).filter(|e| dom::tag(*e) == "tr") {
                        table.add_row(self.extract_row(tr, in_head));
                    }
                }
                "tr" => table.add_row(self.extract_row(child, false)),
                _ => {}
            }
        }

        if table.is_empty() {
            self.warn(ExtractionWarning::EmptyTable);
            return None;
        }
        Some(table)
    }

    fn extract_row(&self, tr: ElementRef<'_>, in_head: bool) -> TableRow {
        let mut has_th = false;
        let cells = dom::child_elements(tr)
            .filter(|c| matches!(dom::tag(*c), "th" | "td"))
            .map(|cell| {
                has_th |= dom::tag(cell) == "th";
                TableCell::text(self.cell_text(cell))
                    .colspan(span(cell, "colspan"))
                    .rowspan(span(cell, "rowspan"))
            })
            .collect();

        TableRow {
            cells,
            is_header: in_head || has_th,
        }
    }

    /// Cell text with line breaks kept and lists flattened to marked lines.
    fn cell_text(&self, cell: ElementRef<'_>) -> String {
        cell_lines(cell)
            .iter()
            .map(|line| self.clean(line))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(&CELL_LINE_SEPARATOR.to_string())
    }
}

/// Raw text lines of a cell; `br`, block boundaries, and list items start
/// new lines.
fn cell_lines(cell: ElementRef<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut skipped: Option<NodeId> = None;

    for edge in cell.traverse().skip(1) {
        match edge {
            Edge::Open(node) => {
                if skipped.is_some() {
                    continue;
                }
                let Some(el) = ElementRef::wrap(node) else {
                    if let Some(text) = node.value().as_text() {
                        current.push_str(text);
                    }
                    continue;
                };
                if dom::is_ignored(el) {
                    skipped = Some(node.id());
                } else if is_list(el) {
                    lines.push(std::mem::take(&mut current));
                    flatten_list(el, &mut lines);
                    skipped = Some(node.id());
                } else if dom::tag(el) == "br" || dom::is_block(el) {
                    lines.push(std::mem::take(&mut current));
                }
            }
            Edge::Close(node) => match skipped {
                Some(id) if id == node.id() => skipped = None,
                Some(_) => {}
                None => {
                    if ElementRef::wrap(node).is_some_and(dom::is_block) {
                        lines.push(std::mem::take(&mut current));
                    }
                }
            },
        }
    }
    lines.push(current);
    lines
}

/// One marked line per item, nested items one level deeper.
fn flatten_list(list: ElementRef<'_>, lines: &mut Vec<String>) {
    let mut stack = list_items(list, 0);
    stack.reverse();
    while let Some((li, level)) = stack.pop() {
        let marker = if level == 0 {
            TOP_LEVEL_MARKER
        } else {
            NESTED_MARKER
        };
        let text = item_text(li);
        if !text.trim().is_empty() {
            lines.push(format!("{} {}", marker, text));
        }

        let mark = stack.len();
        for nested in nested_lists(li) {
            stack.extend(list_items(nested, level + 1));
        }
        stack[mark..].reverse();
    }
}

fn list_items(list: ElementRef<'_>, level: usize) -> Vec<(ElementRef<'_>, usize)> {
    dom::child_elements(list)
        .filter(|e| dom::tag(*e) == "li")
        .map(|li| (li, level))
        .collect()
}

fn span(cell: ElementRef<'_>, name: &str) -> u16 {
    dom::attr(cell, name)
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractOptions;
    use scraper::{Html, Selector};

    fn extract_first(fragment: &str) -> (Option<Table>, Vec<ExtractionWarning>) {
        let html = Html::parse_fragment(fragment);
        let selector = Selector::parse("table, div.table-wrapper").unwrap();
        let el = html.select(&selector).next().unwrap();
        let options = ExtractOptions::default();
        let mut extractor = BlockExtractor::new(&options);
        let table = extractor.extract_table(el);
        (table, extractor.warnings)
    }

    #[test]
    fn test_thead_marks_header_rows() {
        let (table, _) = extract_first(
            "<table><thead><tr><td>Drug</td><td>Dose</td></tr></thead>\
             <tbody><tr><td>Ceftriaxone</td><td>2 g</td></tr></tbody></table>",
        );
        let table = table.unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert!(table.rows[0].is_header);
        assert!(!table.rows[1].is_header);
        assert_eq!(table.rows[1].cells[0].text, "Ceftriaxone");
    }

    #[test]
    fn test_th_marks_header_and_no_header_otherwise() {
        let (table, _) = extract_first(
            "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>",
        );
        let table = table.unwrap();
        assert!(table.rows[0].is_header);
        assert!(!table.rows[1].is_header);

        let (table, _) = extract_first("<table><tr><td>1</td><td>2</td></tr></table>");
        assert!(!table.unwrap().has_header());
    }

    #[test]
    fn test_cell_lists_are_flattened() {
        let (table, _) = extract_first(
            "<div class=\"table-wrapper\"><table><tr><td>Symptoms\
             <ul><li>Pain<ul><li>RLQ</li></ul></li><li>Fever</li></ul></td></tr></table></div>",
        );
        let table = table.unwrap();
        assert_eq!(
            table.rows[0].cells[0].text,
            "Symptoms\n• Pain\n◦ RLQ\n• Fever"
        );
    }

    #[test]
    fn test_spans_and_caption() {
        let (table, _) = extract_first(
            "<table><caption>Scores</caption><tr><td colspan=\"2\" rowspan=\"x\">Total</td></tr></table>",
        );
        let table = table.unwrap();
        assert_eq!(table.caption.as_deref(), Some("Scores"));
        assert_eq!(table.rows[0].cells[0].colspan, 2);
        assert_eq!(table.rows[0].cells[0].rowspan, 1);
        assert!(table.has_merged_cells());
    }

    #[test]
    fn test_br_splits_cell_lines() {
        let (table, _) = extract_first("<table><tr><td>Line one<br>Line two</td></tr></table>");
        assert_eq!(table.unwrap().rows[0].cells[0].text, "Line one\nLine two");
    }

    #[test]
    fn test_deeply_nested_cell_text() {
        let depth = 20_000;
        let html = format!(
            "<table><tr><td>{}Dose{}</td></tr></table>",
            "<span><div>".repeat(depth),
            "</div></span>".repeat(depth)
        );
        let (table, _) = extract_first(&html);
        assert_eq!(table.unwrap().rows[0].cells[0].text, "Dose");
    }

    #[test]
    fn test_wrapper_without_table_warns() {
        let (table, warnings) = extract_first(r#"<div class="table-wrapper"><p>Loading</p></div>"#);
        assert!(table.is_none());
        assert_eq!(warnings, vec![ExtractionWarning::EmptyTable]);
    }
}
