// End-to-end render checks: settings + device in, artifact out.
use mockito::{Matcher, Server};
use todo_snapshot::layout::{Body, NO_TASKS};
use todo_snapshot::model::Glyph;
use todo_snapshot::provider::Endpoints;
use todo_snapshot::render::ArtifactContent;
use todo_snapshot::{DeviceProfile, DisplayPlugin, Orientation, OutputFormat, Settings, TodoPlugin};

fn plugin(base: &str, format: OutputFormat) -> TodoPlugin {
    TodoPlugin::new(format).with_endpoints(Endpoints::with_base(base))
}

fn settings(pairs: &[(&str, &str)]) -> Settings {
    pairs.iter().copied().collect()
}

fn error_text(body: &Body) -> &str {
    match body {
        Body::Error(msg) => msg,
        other => panic!("expected an error body, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_credentials_draw_error() {
    let device = DeviceProfile::default()
        .with_env("TODOIST_API_TOKEN", "")
        .with_env("OPEN_AI_SECRET", "");

    for format in [OutputFormat::Png, OutputFormat::Html] {
        let p = plugin("http://127.0.0.1:9", format);

        let google = p.render(&Settings::new(), &device).await;
        assert_eq!(
            error_text(&google.snapshot.body),
            "Error: Google API credentials not configured"
        );

        let todoist = p.render(&settings(&[("provider", "todoist")]), &device).await;
        assert_eq!(
            error_text(&todoist.snapshot.body),
            "Error: Todoist API token not configured"
        );
        assert!(todoist.encode().is_ok());
    }
}

#[tokio::test]
async fn test_example_two_tasks() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"access_token": "at"}"#)
        .create_async()
        .await;
    server
        .mock("GET", Matcher::Regex(r"^/tasks/v1/lists/[^/]+/tasks".to_string()))
        .match_query(Matcher::UrlEncoded("maxResults".into(), "2".into()))
        .with_status(200)
        .with_body(
            r#"{"items": [
                {"title": "Buy milk", "status": "needsAction"},
                {"title": "Pay rent", "status": "completed"}
            ]}"#,
        )
        .create_async()
        .await;

    let s = settings(&[
        ("client_id", "cid"),
        ("client_secret", "secret"),
        ("refresh_token", "rt"),
        ("max_tasks", "2"),
    ]);
    let artifact = plugin(&server.url(), OutputFormat::Png)
        .render(&s, &DeviceProfile::default())
        .await;

    let lines: Vec<String> = artifact.lines().iter().map(|l| l.to_string()).collect();
    assert_eq!(lines, vec!["☐ Buy milk", "☑ Pay rent"]);
    assert_eq!(
        artifact.snapshot.text_lines(),
        vec!["My Todo List", "☐ Buy milk", "☑ Pay rent"]
    );
    assert_eq!(artifact.hidden, 0);
}

#[tokio::test]
async fn test_never_more_lines_than_max_tasks() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/tasks/v1/lists/[^/]+/tasks".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"items": [
                {"title": "Buy milk", "status": "needsAction"},
                {"title": "Pay rent", "status": "completed"},
                {"title": "Call mum", "status": "needsAction"}
            ]}"#,
        )
        .create_async()
        .await;

    let s = settings(&[
        ("client_id", "cid"),
        ("client_secret", "secret"),
        ("access_token", "at"),
        ("max_tasks", "2"),
    ]);
    let artifact = plugin(&server.url(), OutputFormat::Png)
        .render(&s, &DeviceProfile::default())
        .await;

    let lines: Vec<String> = artifact.lines().iter().map(|l| l.to_string()).collect();
    assert_eq!(lines, vec!["☐ Buy milk", "☑ Pay rent"]);
}

#[tokio::test]
async fn test_empty_list_says_no_tasks() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v2/projects")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    server
        .mock("GET", Matcher::Regex(r"^/rest/v2/tasks".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let s = settings(&[("provider", "todoist"), ("api_key", "tk"), ("title", "Today")]);
    let artifact = plugin(&server.url(), OutputFormat::Html)
        .render(&s, &DeviceProfile::default())
        .await;

    assert_eq!(artifact.snapshot.body, Body::Empty);
    let html = String::from_utf8(artifact.encode().unwrap()).unwrap();
    assert!(html.contains(NO_TASKS));
    assert!(html.contains("<h1>Today</h1>"));
}

#[tokio::test]
async fn test_n_tasks_n_lines_with_priority_glyphs() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v2/projects")
        .with_status(200)
        .with_body(r#"[{"id": "1", "name": "Inbox"}]"#)
        .create_async()
        .await;
    server
        .mock("GET", Matcher::Regex(r"^/rest/v2/tasks".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"[
                {"content": "Call plumber", "priority": 4, "project_id": "1"},
                {"content": "Read book", "priority": 1, "project_id": "1"},
                {"content": "Book dentist", "priority": 3, "project_id": "1",
                 "description": "Ask for Friday"}
            ]"#,
        )
        .create_async()
        .await;

    let s = settings(&[("provider", "todoist"), ("api_key", "tk"), ("max_tasks", "5")]);
    let artifact = plugin(&server.url(), OutputFormat::Png)
        .render(&s, &DeviceProfile::default())
        .await;

    let lines = artifact.lines();
    assert_eq!(lines.len(), 3);
    let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    assert_eq!(rendered, vec!["P1 Call plumber", "P4 Read book", "P2 Book dentist"]);
    assert!(lines.iter().all(|l| matches!(l.glyph, Glyph::Priority(_))));
    assert_eq!(lines[2].details, vec!["Ask for Friday".to_string()]);
    assert!(lines.iter().all(|l| l.group.as_deref() == Some("Inbox")));
}

#[tokio::test]
async fn test_http_error_is_drawn() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v2/projects")
        .with_status(503)
        .create_async()
        .await;

    let s = settings(&[("provider", "todoist"), ("api_key", "tk")]);
    let artifact = plugin(&server.url(), OutputFormat::Png)
        .render(&s, &DeviceProfile::default())
        .await;
    assert_eq!(
        error_text(&artifact.snapshot.body),
        "Error: Failed to fetch projects: HTTP 503 Service Unavailable"
    );
}

#[tokio::test]
async fn test_vertical_orientation_swaps_size() {
    let s = settings(&[("provider", "placeholder")]);
    let p = plugin("http://127.0.0.1:9", OutputFormat::Png);

    let landscape = p
        .render(&s, &DeviceProfile::new(800, 480, Orientation::Horizontal))
        .await;
    let portrait = p
        .render(&s, &DeviceProfile::new(800, 480, Orientation::Vertical))
        .await;

    assert_eq!((landscape.width, landscape.height), (800, 480));
    assert_eq!((portrait.width, portrait.height), (480, 800));
    match &portrait.content {
        ArtifactContent::Bitmap(canvas) => {
            assert_eq!((canvas.width(), canvas.height()), (480, 800));
        }
        other => panic!("expected a bitmap, got {:?}", other),
    }

    // IHDR: width and height are the first two big-endian u32s after the
    // 8-byte signature and the 8-byte chunk header.
    let png = portrait.encode().unwrap();
    let w = u32::from_be_bytes(png[16..20].try_into().unwrap());
    let h = u32::from_be_bytes(png[20..24].try_into().unwrap());
    assert_eq!((w, h), (480, 800));
}
