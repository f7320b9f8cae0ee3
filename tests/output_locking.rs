// Concurrent snapshot writes must leave one complete file behind.
use std::sync::{Arc, Barrier};
use std::thread;
use todo_snapshot::context::{AppContext, TestContext};
use todo_snapshot::layout::{Body, Snapshot};
use todo_snapshot::output::write_artifact;
use todo_snapshot::{OutputFormat, RenderedArtifact};

#[test]
fn test_concurrent_writes() {
    let ctx = TestContext::new();
    let path = Arc::new(ctx.get_output_path("html").unwrap());

    let thread_count = 8;
    let barrier = Arc::new(Barrier::new(thread_count));
    let mut handles = vec![];

    for i in 0..thread_count {
        let b = barrier.clone();
        let path = path.clone();
        handles.push(thread::spawn(move || {
            let snapshot = Snapshot {
                title: format!("Writer {}", i),
                body: Body::Prompt("x".repeat(4096)),
            };
            let artifact = RenderedArtifact::draw(snapshot, 100, 100, OutputFormat::Html);
            b.wait();
            write_artifact(&path, &artifact).expect("write failed");
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let html = std::fs::read_to_string(path.as_ref()).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.trim_end().ends_with("</html>"));
    assert_eq!(html.matches("<h1>Writer ").count(), 1);
}

#[test]
fn test_png_and_html_written_side_by_side() {
    let ctx = TestContext::new();
    let png_path = ctx.get_output_path("png").unwrap();
    let html_path = ctx.get_output_path("html").unwrap();
    let barrier = Arc::new(Barrier::new(2));

    let mut handles = vec![];
    for (path, format) in [
        (png_path.clone(), OutputFormat::Png),
        (html_path.clone(), OutputFormat::Html),
    ] {
        let b = barrier.clone();
        handles.push(thread::spawn(move || {
            let snapshot = Snapshot {
                title: "Side by side".to_string(),
                body: Body::Prompt("y".repeat(2048)),
            };
            let artifact = RenderedArtifact::draw(snapshot, 400, 300, format);
            b.wait();
            for _ in 0..50 {
                write_artifact(&path, &artifact).expect("write failed");
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let png = std::fs::read(&png_path).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(!ctx.get_cache_dir().unwrap().join("todo.tmp").exists());
}
