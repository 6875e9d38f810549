use std::fs;

use mailforge::compose::descriptor::{Descriptor, DescriptorBatch};
use mailforge::compose::options::{DeliveryOptions, OptionsPatch, TextFormat};
use mailforge::compose::part::Part;
use mailforge::compose::pipeline;
use mailforge::compose::table::Table;

fn defaults() -> DeliveryOptions {
    DeliveryOptions::default()
}

fn no_break() -> OptionsPatch {
    OptionsPatch {
        append_break: Some(false),
        ..OptionsPatch::default()
    }
}

#[test]
fn batch_order_is_preserved() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = dir.path().join("report.csv");
    fs::write(&csv, b"a,b\n1,2\n").expect("write fixture");

    let mut table = Table::new(vec!["A".to_string()]);
    table.push_row(vec!["1".to_string()]);

    let batch = vec![
        Descriptor::text("first").with_options(no_break()),
        Descriptor::tabular(table).with_options(no_break()),
        Descriptor::file(&csv).with_options(no_break()),
        Descriptor::text("last").with_options(no_break()),
    ];

    let parts = pipeline::process(batch, &defaults());
    assert_eq!(parts.len(), 4);
    assert!(matches!(&parts[0], Part::Text { content, format: TextFormat::Plain } if content == "first"));
    assert!(matches!(&parts[1], Part::Text { format: TextFormat::Markup, .. }));
    assert!(matches!(&parts[2], Part::File { filename, mime_type, data }
        if filename == "report.csv" && mime_type == "text/csv" && data == b"a,b\n1,2\n"));
    assert!(matches!(&parts[3], Part::Text { content, .. } if content == "last"));
}

#[test]
fn unknown_kind_is_reported_and_skipped() {
    let batch: DescriptorBatch = serde_json::from_str(
        r#"[
            {"kind": "text", "input": "one"},
            {"kind": "spreadsheet", "input": "x.ods"},
            {"kind": "text", "input": "two"}
        ]"#,
    )
    .expect("batch parse");

    let parts = pipeline::process(batch, &defaults());

    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["one", "two"]);

    // Two text parts, each with its default trailing separator.
    assert_eq!(parts.len(), 4);
}

#[test]
fn delete_source_removes_file_after_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.csv");
    fs::write(&path, b"a,b\n").expect("write fixture");

    let patch = OptionsPatch {
        delete_source: Some(true),
        ..OptionsPatch::default()
    };
    let parts = pipeline::process([Descriptor::file(&path).with_options(patch)], &defaults());

    assert!(matches!(&parts[0], Part::File { data, .. } if data == b"a,b\n"));
    assert!(!path.exists());
}

#[test]
fn source_survives_without_delete_option() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.csv");
    fs::write(&path, b"a,b\n").expect("write fixture");

    pipeline::process([Descriptor::file(&path)], &defaults());
    assert!(path.exists());
}

#[test]
fn missing_image_leaves_reference_without_image_part() {
    let batch = vec![
        Descriptor::image("/nonexistent/chart.png"),
        Descriptor::text("after").with_options(no_break()),
    ];

    let parts = pipeline::process(batch, &defaults());

    // The cid reference survives the failed read; the image part does not,
    // and the batch keeps going.
    assert_eq!(parts.len(), 2);
    assert!(matches!(&parts[0], Part::Text { content, format: TextFormat::Markup }
        if content == "<img src=\"cid:chart\">"));
    assert!(matches!(&parts[1], Part::Text { content, .. } if content == "after"));
}

#[test]
fn inline_image_gets_break_between_reference_and_image() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.png");
    fs::write(&path, [0x89, 0x50, 0x4e, 0x47]).expect("write fixture");

    let patch = OptionsPatch {
        inline: Some(true),
        break_count: Some(2),
        ..OptionsPatch::default()
    };
    let parts = pipeline::process([Descriptor::image(&path).with_options(patch)], &defaults());

    assert_eq!(parts.len(), 3);
    assert!(matches!(&parts[0], Part::Text { content, .. } if content == "<img src=\"cid:chart\">"));
    assert!(matches!(&parts[1], Part::Separator { lines: 2 }));
    assert!(matches!(&parts[2], Part::Image { content_id, subtype, inline: true, .. }
        if content_id == "chart" && subtype == "png"));
}

#[test]
fn detached_image_gets_no_break_at_all() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.png");
    fs::write(&path, [1, 2, 3]).expect("write fixture");

    let parts = pipeline::process([Descriptor::image(&path)], &defaults());

    assert_eq!(parts.len(), 2);
    assert!(matches!(&parts[0], Part::Text { .. }));
    assert!(matches!(&parts[1], Part::Image { inline: false, .. }));
}

#[test]
fn inline_image_delete_source_removes_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.png");
    fs::write(&path, [1, 2, 3]).expect("write fixture");

    let patch = OptionsPatch {
        delete_source: Some(true),
        ..OptionsPatch::default()
    };
    let parts = pipeline::process([Descriptor::image(&path).with_options(patch)], &defaults());

    assert!(matches!(&parts[1], Part::Image { data, .. } if data == &[1, 2, 3]));
    assert!(!path.exists());
}
