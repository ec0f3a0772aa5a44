//! Integration tests for rendering and file conversion.

use std::fs;

use amboss_extract::convert::{convert_file, ConvertOptions};
use amboss_extract::render::parse_pipe_tables;
use amboss_extract::{
    extract, render, render_with_options, to_markdown, ExtractionWarning, JsonFormat,
    OutputFormat, RenderOptions,
};

const CAUSES: &str =
    r#"<div class="baseStyles"><h2>Causes</h2><ul><li>A</li><li>B<ul><li>B1</li></ul></li></ul></div>"#;

const SCORE_TABLE: &str = r#"<div class="baseStyles">
  <table>
    <thead><tr><th>Criterion</th><th>Points</th></tr></thead>
    <tbody><tr><td>Fever</td><td>1</td></tr></tbody>
  </table>
</div>"#;

#[test]
fn test_markdown_heading_and_nested_list() {
    let markdown = to_markdown(CAUSES, "causes.html").unwrap();
    assert!(markdown.contains("## Causes\n- A\n- B\n  - B1"));
}

#[test]
fn test_markdown_nested_list_under_numbered_item() {
    let html = r#"<div class="baseStyles"><ol><li>Stabilize<ul><li>Airway</li><li>Fluids</li></ul></li><li>Imaging</li></ol></div>"#;
    let markdown = to_markdown(html, "x").unwrap();
    assert!(markdown.contains("1. Stabilize\n   - Airway\n   - Fluids\n2. Imaging\n"));
}

#[test]
fn test_markdown_paragraph_not_read_as_heading() {
    let html = r#"<div class="baseStyles"><h2>Epidemiology</h2><p># of cases rises in summer</p></div>"#;
    let markdown = to_markdown(html, "x").unwrap();
    assert!(markdown.contains("## Epidemiology\n\\# of cases rises in summer\n"));
}

#[test]
fn test_markdown_table_separator_row() {
    let doc = extract(SCORE_TABLE, "score.html").unwrap();
    let markdown = render(&doc, OutputFormat::Markdown).unwrap();

    let lines: Vec<&str> = markdown.lines().filter(|l| l.starts_with('|')).collect();
    assert_eq!(
        lines,
        vec!["| Criterion | Points |", "|---|---|", "| Fever | 1 |"]
    );
}

#[test]
fn test_markdown_tables_keep_their_shape() {
    let html = r#"<div class="baseStyles">
      <table>
        <tr><th>Drug</th><th>Dose</th><th>Route</th></tr>
        <tr><td>Ceftriaxone</td><td>2 g</td><td>IV</td></tr>
        <tr><td>Metronidazole</td><td>500 mg</td><td>IV | PO</td></tr>
      </table>
      <p>Between</p>
      <table><tr><td>Only</td></tr></table>
    </div>"#;
    let doc = extract(html, "x").unwrap();
    let markdown = render(&doc, OutputFormat::Markdown).unwrap();

    let tables = parse_pipe_tables(&markdown);
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].len(), 3);
    assert!(tables[0].iter().all(|row| row.len() == 3));
    assert_eq!(tables[0][2][2], "IV \\| PO");
    assert_eq!(tables[1], vec![vec!["Only".to_string()]]);
}

#[test]
fn test_html_warning_box() {
    let html = r#"<div class="baseStyles">
      <div class="box box-red"><h4>Cave</h4><p>No NSAIDs in renal failure</p></div>
    </div>"#;
    let doc = extract(html, "x").unwrap();
    let page = render(&doc, OutputFormat::Html).unwrap();

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<div class=\"content-box warning\">"));
    assert!(page.contains("⚠️ Warning: Cave"));
    assert!(page.contains("<p>No NSAIDs in renal failure</p>"));
}

#[test]
fn test_text_output() {
    let doc = extract(CAUSES, "causes.html").unwrap();
    let text = render(&doc, OutputFormat::Text).unwrap();
    assert!(text.contains("Causes\n------\n\n• A\n• B\n  ◦ B1\n"));
}

#[test]
fn test_json_output_round_trips() {
    let doc = extract(CAUSES, "causes.html").unwrap();
    let json = amboss_extract::render::to_json(&doc, JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["blocks"][0]["type"], "heading");
    assert_eq!(value["blocks"][1]["items"][1]["nested"]["items"][0]["text"], "B1");
}

#[test]
fn test_frontmatter_option() {
    let doc = extract(CAUSES, "https://next.amboss.com/us/article/abc123").unwrap();
    let options = RenderOptions::default().with_frontmatter(true);
    let markdown = render_with_options(&doc, OutputFormat::Markdown, &options).unwrap();

    assert!(markdown.starts_with("---\n"));
    assert!(markdown.contains("id: \"abc123\""));
    assert!(markdown.contains("# Causes\n"));
}

#[test]
fn test_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gout.html");
    fs::write(
        &path,
        r#"<html><head><title>Gout - AMBOSS</title></head><body>
        <div class="baseStyles"><h2>Causes</h2><p>Uric acid</p><img alt="Tophus"></div>
        </body></html>"#,
    )
    .unwrap();

    let options = ConvertOptions::new().with_format(OutputFormat::Markdown);
    let result = convert_file(&path, &options).unwrap();

    assert_eq!(result.content, "# Gout\n\n## Causes\nUric acid\n");
    assert_eq!(result.metadata.identifier.as_deref(), Some("gout"));
    assert_eq!(result.stats.heading_count, 1);
    assert_eq!(result.warnings, vec![ExtractionWarning::MissingImageSource]);
    assert_eq!(result.mime_type, "text/markdown");
    assert_eq!(
        result.suggested_filename(7, OutputFormat::Markdown),
        "page_007_Gout.md"
    );
}

#[test]
fn test_convert_missing_file() {
    let result = convert_file("/nonexistent/page.html", &ConvertOptions::default());
    assert!(matches!(result, Err(amboss_extract::Error::Io(_))));
}
