//! Integration tests for the image-to-layout pipeline.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;
use unscan::render::{self, RenderOptions};
use unscan::{
    Error, ImageFormat, NoTextReason, OcrEngine, OcrOutput, PaddleJsonEngine, Pipeline,
    PipelineOptions, ScanImage,
};

/// Engine that returns the same output for every image and counts calls.
struct CountingEngine {
    output: OcrOutput,
    calls: AtomicUsize,
}

impl OcrEngine for CountingEngine {
    fn name(&self) -> &str {
        "counting"
    }

    fn recognize(&self, _image: &ScanImage) -> unscan::Result<OcrOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.clone())
    }
}

fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(120, 80, image::Rgb([255, 255, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, png_bytes()).unwrap();
    path
}

const PADDLE_RESULT: &str = r#"{
    "input_path": "scan.png",
    "rec_texts": ["Month", "Sales", "Jan", "100", "faint"],
    "rec_scores": [0.98, 0.97, 0.95, 0.99, 0.41],
    "rec_boxes": [
        [0, 0, 50, 20],
        [60, 0, 110, 20],
        [0, 30, 50, 50],
        [60, 30, 110, 50],
        [0, 60, 50, 80]
    ]
}"#;

#[test]
fn test_paddle_sidecar_file() {
    let dir = TempDir::new().unwrap();
    let image = write_png(dir.path(), "scan.png");
    fs::write(dir.path().join("scan_res.json"), PADDLE_RESULT).unwrap();

    let pipeline = Pipeline::new(PaddleJsonEngine::new(), PipelineOptions::default()).unwrap();
    let extraction = pipeline.process_path(&image).unwrap();
    let doc = extraction.document().unwrap();

    assert_eq!(doc.metadata.engine.as_deref(), Some("paddle-json"));
    assert_eq!(doc.metadata.format, Some(ImageFormat::Png));
    assert_eq!(doc.metadata.width, Some(120));
    assert_eq!(doc.metadata.height, Some(80));
    assert_eq!(doc.metadata.tokens.low_confidence, 1);

    let grid = doc.tables().next().unwrap();
    assert_eq!(grid.rows, vec![vec!["Month", "Sales"], vec!["Jan", "100"]]);
}

#[test]
fn test_paddle_result_dir() {
    let images = TempDir::new().unwrap();
    let results = TempDir::new().unwrap();
    let image = write_png(images.path(), "page1.png");
    fs::write(results.path().join("page1_res.json"), PADDLE_RESULT).unwrap();

    let engine = PaddleJsonEngine::with_result_dir(results.path());
    let extraction = unscan::process_file(engine, &image).unwrap();
    assert_eq!(extraction.document().unwrap().tables().count(), 1);
}

#[test]
fn test_malformed_result_is_no_text() {
    let dir = TempDir::new().unwrap();
    let image = write_png(dir.path(), "scan.png");
    let result = dir.path().join("result.json");
    fs::write(&result, r#"{"texts": ["no", "paddle", "keys"]}"#).unwrap();

    let extraction = unscan::process_file(PaddleJsonEngine::from_file(&result), &image).unwrap();
    assert!(matches!(
        extraction.no_text_reason(),
        Some(NoTextReason::MalformedOcrOutput(_))
    ));

    let report = render::to_report(&extraction, &RenderOptions::default()).unwrap();
    assert_eq!(report, "No text detected");
}

#[test]
fn test_empty_result_is_no_text() {
    let dir = TempDir::new().unwrap();
    let image = write_png(dir.path(), "scan.png");
    fs::write(
        dir.path().join("scan_res.json"),
        r#"{"rec_texts": [], "rec_boxes": [], "rec_scores": []}"#,
    )
    .unwrap();

    let report = unscan::report_file(PaddleJsonEngine::new(), &image).unwrap();
    assert_eq!(report, "No text detected");
}

#[test]
fn test_unreadable_image_halts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    fs::write(&path, b"definitely not pixels").unwrap();

    let engine = CountingEngine {
        output: OcrOutput::new(),
        calls: AtomicUsize::new(0),
    };
    let pipeline = Pipeline::new(engine, PipelineOptions::default()).unwrap();

    assert!(matches!(
        pipeline.process_path(&path),
        Err(Error::UnreadableImage(_))
    ));
    assert_eq!(pipeline.engine().calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_truncated_png_is_unreadable() {
    let mut bytes = png_bytes();
    bytes.truncate(40);

    let engine = CountingEngine {
        output: OcrOutput::new(),
        calls: AtomicUsize::new(0),
    };
    let pipeline = Pipeline::new(engine, PipelineOptions::default()).unwrap();
    assert!(matches!(
        pipeline.process_bytes(bytes),
        Err(Error::UnreadableImage(_))
    ));
}

#[test]
fn test_engine_is_reused() {
    let mut output = OcrOutput::new();
    output.push("Hello", [0.0, 0.0, 50.0, 20.0], 0.9);
    let engine = CountingEngine {
        output,
        calls: AtomicUsize::new(0),
    };
    let pipeline = Pipeline::new(engine, PipelineOptions::default()).unwrap();

    for _ in 0..3 {
        let extraction = pipeline.process_bytes(png_bytes()).unwrap();
        assert_eq!(extraction.document().unwrap().row_count(), 1);
    }
    assert_eq!(pipeline.engine().calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_batch_keeps_order_and_continues_past_failures() {
    let dir = TempDir::new().unwrap();
    let first = write_png(dir.path(), "a.png");
    let missing = dir.path().join("missing.png");
    let second = write_png(dir.path(), "b.png");

    let mut output = OcrOutput::new();
    output.push("Total", [0.0, 0.0, 50.0, 20.0], 0.9);
    output.push("4,200", [60.0, 0.0, 110.0, 20.0], 0.9);

    for options in [PipelineOptions::default(), PipelineOptions::new().sequential()] {
        let engine = CountingEngine {
            output: output.clone(),
            calls: AtomicUsize::new(0),
        };
        let pipeline = Pipeline::new(engine, options).unwrap();

        let done = AtomicUsize::new(0);
        let paths = vec![first.clone(), missing.clone(), second.clone()];
        let outcomes = pipeline.process_batch_with(&paths, |_| {
            done.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(done.load(Ordering::SeqCst), 3);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].path, first);
        assert_eq!(outcomes[1].path, missing);
        assert_eq!(outcomes[2].path, second);

        assert!(outcomes[0].result.is_ok());
        assert!(matches!(outcomes[1].result, Err(Error::Io(_))));
        assert!(outcomes[2].result.is_ok());
        assert_eq!(pipeline.engine().calls.load(Ordering::SeqCst), 2);
    }
}

#[test]
fn test_boxed_engine() {
    let mut output = OcrOutput::new();
    output.push("Hello", [0.0, 0.0, 50.0, 20.0], 0.9);
    let engine: Box<dyn OcrEngine> = Box::new(CountingEngine {
        output,
        calls: AtomicUsize::new(0),
    });

    let pipeline = Pipeline::new(engine, PipelineOptions::default()).unwrap();
    let extraction = pipeline.process_bytes(png_bytes()).unwrap();
    assert_eq!(
        extraction.document().unwrap().metadata.engine.as_deref(),
        Some("counting")
    );
}
