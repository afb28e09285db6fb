//! Integration Tests for Error Handling
//!
//! These tests verify how each failing stage shows up on the console.

#[path = "../test_utils/mock_host.rs"]
mod mock_host;

use mock_host::{temp_context, Discovery, HostCall, MockHost};
use psbridge::editor::NoEditor;
use psbridge::host::DispatchOutput;
use psbridge::{ConsoleView, EditorSnapshot, Error, ExecutionPipeline, FileEditor, Severity};

#[tokio::test]
async fn test_host_not_found_is_silent() {
    let (_dir, context) = temp_context();
    let host = MockHost::new().with_discovery(Discovery::NotFound);
    let mut console = ConsoleView::new();

    let result = ExecutionPipeline::new(&context, &host)
        .run(&EditorSnapshot::saved("/a.jsx", ""), &mut console)
        .await;

    assert!(matches!(result, Err(Error::HostNotFound { .. })));
    assert!(result.unwrap_err().is_silent());
    assert!(console.is_empty(), "no line may be appended");
    assert_eq!(host.calls().len(), 1, "nothing runs after discovery");
}

#[tokio::test]
async fn test_discovery_failure_is_reported_once() {
    let (_dir, context) = temp_context();
    let host = MockHost::new().with_discovery(Discovery::Fails("mdfind: no index".to_string()));
    let mut console = ConsoleView::new();

    let result = ExecutionPipeline::new(&context, &host)
        .run(&EditorSnapshot::saved("/a.jsx", ""), &mut console)
        .await;

    assert!(matches!(result, Err(Error::DiscoveryFailed { .. })));
    assert_eq!(console.texts(), vec!["Error: mdfind: no index"]);
    assert_eq!(console.lines()[0].severity, Severity::Error);
}

#[tokio::test]
async fn test_launch_failure_stops_before_dispatch() {
    let (_dir, context) = temp_context();
    let host = MockHost::new().with_launch_error("LSOpenURLsWithRole() failed");
    let mut console = ConsoleView::new();

    let result = ExecutionPipeline::new(&context, &host)
        .run(&EditorSnapshot::saved("/a.jsx", ""), &mut console)
        .await;

    assert!(matches!(result, Err(Error::LaunchFailed { .. })));
    assert_eq!(console.texts(), vec!["Error: LSOpenURLsWithRole() failed"]);
    assert!(!host
        .calls()
        .iter()
        .any(|call| matches!(call, HostCall::Dispatch { .. })));
}

#[tokio::test]
async fn test_write_failure_stops_before_discovery() {
    let (dir, mut context) = temp_context();
    context.script_path = dir.path().join("missing").join("script.jsx");
    let host = MockHost::new();
    let mut console = ConsoleView::new();

    let result = ExecutionPipeline::new(&context, &host)
        .run(&EditorSnapshot::saved("/a.jsx", ""), &mut console)
        .await;

    assert!(matches!(result, Err(Error::ScriptWriteFailed { .. })));
    assert!(host.calls().is_empty());
    assert_eq!(console.len(), 1);
    assert_eq!(console.lines()[0].severity, Severity::Error);
    assert!(console.lines()[0].text.starts_with("Error: "));
}

#[tokio::test]
async fn test_log_reset_failure_is_returned_without_console_output() {
    let (dir, mut context) = temp_context();
    context.log_path = dir.path().join("missing").join("log.txt");
    let host = MockHost::new();
    let mut console = ConsoleView::new();

    let result = ExecutionPipeline::new(&context, &host)
        .run(&EditorSnapshot::saved("/a.jsx", ""), &mut console)
        .await;

    assert!(matches!(result, Err(Error::LogResetFailed { .. })));
    assert!(console.is_empty());
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_dispatch_error_still_flushes_log() {
    let (_dir, context) = temp_context();
    let host = MockHost::new()
        .writing_log(&context.log_path, "##before the crash")
        .with_dispatch(DispatchOutput::failed(
            1,
            "execution error: Photoshop got an error: General Photoshop error (-2741)\n",
        ));
    let mut console = ConsoleView::new();

    let record = ExecutionPipeline::new(&context, &host)
        .run(&EditorSnapshot::saved("/a.jsx", ""), &mut console)
        .await
        .unwrap();

    assert!(record.is_failed());
    assert_eq!(record.exit_code, Some(1));

    let lines = console.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].severity, Severity::Execution);
    assert_eq!(lines[1].text, "before the crash");
    assert_eq!(lines[2].severity, Severity::Error);
    assert!(lines[2]
        .text
        .ends_with("Error: execution error: Photoshop got an error: General Photoshop error (-2741)"));
}

#[tokio::test]
async fn test_dispatch_spawn_failure_is_reported_after_timing() {
    let (_dir, context) = temp_context();
    let host = MockHost::new().with_dispatch_spawn_error("No such file or directory");
    let mut console = ConsoleView::new();

    let record = ExecutionPipeline::new(&context, &host)
        .run(&EditorSnapshot::saved("/a.jsx", ""), &mut console)
        .await
        .unwrap();

    assert!(record.is_failed());
    assert_eq!(console.len(), 2);
    assert_eq!(console.lines()[0].severity, Severity::Execution);
    assert_eq!(console.lines()[1].severity, Severity::Error);
    assert!(console.lines()[1].text.contains("No such file or directory"));
}

#[tokio::test]
async fn test_no_active_editor() {
    let (_dir, context) = temp_context();
    let host = MockHost::new();
    let mut console = ConsoleView::new();

    let result = ExecutionPipeline::new(&context, &host)
        .run(&NoEditor, &mut console)
        .await;

    assert!(matches!(result, Err(Error::NoActiveEditor)));
    assert_eq!(console.texts(), vec!["Error: No active editor"]);
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_missing_document_is_reported() {
    let (dir, context) = temp_context();
    let host = MockHost::new();
    let mut console = ConsoleView::new();

    let result = ExecutionPipeline::new(&context, &host)
        .run(&FileEditor::new(dir.path().join("nope.jsx")), &mut console)
        .await;

    assert!(matches!(result, Err(Error::Snapshot(_))));
    assert_eq!(console.len(), 1);
    assert_eq!(console.lines()[0].severity, Severity::Error);
}
