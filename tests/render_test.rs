//! Integration tests for the renderers.

use unscan::render::{self, ExtractionStats, JsonFormat, RenderOptions};
use unscan::{analyze_output, Extraction, OcrOutput};

fn push(output: &mut OcrOutput, text: &str, x: f64, y: f64, width: f64) {
    output.push(text, [x, y - 10.0, x + width, y + 10.0], 0.9);
}

/// A two-row table followed by a lead-in paragraph.
fn sample() -> Extraction {
    let mut output = OcrOutput::new();
    push(&mut output, "Month", 0.0, 10.0, 50.0);
    push(&mut output, "Sales", 60.0, 10.0, 50.0);
    push(&mut output, "Jan", 0.0, 40.0, 50.0);
    push(&mut output, "100", 60.0, 40.0, 50.0);
    push(&mut output, "Summary:", 0.0, 80.0, 80.0);
    push(&mut output, "The results are positive.", 0.0, 110.0, 250.0);
    analyze_output(&output).unwrap()
}

#[test]
fn test_report_block_order_and_labels() {
    let report = render::to_report(&sample(), &RenderOptions::default()).unwrap();
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "ORGANIZED TEXT OUTPUT");
    assert_eq!(lines[3], "📊 TABLE:");
    assert_eq!(lines[8], "");
    assert_eq!(lines[9], "📄 TEXT:");
    assert_eq!(lines[11], "Summary: The results are positive.");
    assert_eq!(lines.last(), Some(&"=".repeat(60).as_str()));
}

#[test]
fn test_report_without_icons() {
    let options = RenderOptions::new().with_icons(false);
    let report = render::to_report(&sample(), &options).unwrap();

    assert!(report.contains("\nTABLE:\n"));
    assert!(report.contains("\nTEXT:\n"));
    assert!(!report.contains("📊"));
}

#[test]
fn test_report_custom_title_and_widths() {
    let options = RenderOptions::new()
        .with_title("SCAN")
        .with_banner_width(10)
        .with_divider_width(5)
        .with_min_column_width(3);
    let report = render::to_report(&sample(), &options).unwrap();

    assert!(report.starts_with("SCAN\n==========\n"));
    assert!(report.contains("\n-----\n"));
    assert!(report.contains("| Jan   | 100   |"));
}

#[test]
fn test_markdown_output() {
    let extraction = sample();
    let doc = extraction.document().unwrap();
    let markdown = render::to_markdown(doc, &RenderOptions::default()).unwrap();

    assert_eq!(
        markdown,
        "| Month | Sales |\n| --- | --- |\n| Jan | 100 |\n\nSummary: The results are positive."
    );
}

#[test]
fn test_markdown_with_stats() {
    let extraction = sample();
    let doc = extraction.document().unwrap();
    let result = render::to_markdown_with_stats(doc, &RenderOptions::default()).unwrap();

    assert_eq!(result.stats.table_count, 1);
    assert_eq!(result.stats.paragraph_count, 1);
    assert_eq!(result.stats.row_count, 4);
    assert_eq!(result.content_len(), result.content.len());
}

#[test]
fn test_text_output() {
    let extraction = sample();
    let text = render::to_text(extraction.document().unwrap()).unwrap();
    assert_eq!(
        text,
        "Month\tSales\nJan\t100\n\nSummary: The results are positive."
    );
}

#[test]
fn test_json_document_shape() {
    let json = render::extraction_to_json(&sample(), JsonFormat::Compact).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["status"], "document");
    let blocks = value["content"]["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0]["kind"], "table");
    assert_eq!(blocks[0]["grid"]["rows"][1][1], "100");
    assert_eq!(blocks[1]["kind"], "text");
    assert_eq!(value["content"]["metadata"]["tokens"]["kept"], 6);
}

#[test]
fn test_json_no_text() {
    let extraction = analyze_output(&OcrOutput::new()).unwrap();
    let json = render::extraction_to_json(&extraction, JsonFormat::Compact).unwrap();
    assert_eq!(json, r#"{"status":"no_text","content":"empty_ocr_output"}"#);
}

#[test]
fn test_json_pretty_vs_compact() {
    let extraction = sample();
    let doc = extraction.document().unwrap();
    let pretty = render::to_json(doc, JsonFormat::Pretty).unwrap();
    let compact = render::to_json(doc, JsonFormat::Compact).unwrap();

    assert!(pretty.contains('\n'));
    assert!(!compact.contains('\n'));

    let a: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    let b: serde_json::Value = serde_json::from_str(&compact).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_stats_from_document() {
    let extraction = sample();
    let stats = ExtractionStats::from_document(extraction.document().unwrap());

    assert_eq!(stats.document_count, 1);
    assert_eq!(stats.row_count, 4);
    assert_eq!(stats.table_count, 1);
    assert_eq!(stats.cell_count, 4);
    assert_eq!(stats.paragraph_count, 1);
    assert_eq!(stats.word_count, 9);
}
