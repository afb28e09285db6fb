//! Integration Tests for the user-facing session commands

#[path = "../test_utils/mock_host.rs"]
mod mock_host;

use mock_host::{temp_context, Discovery, MockHost};
use psbridge::host::DispatchOutput;
use psbridge::{
    BridgeSession, ConsoleSink, ConsoleView, EditorSnapshot, LineRenderer, SessionCommand,
    SessionState, Severity, TerminalConsole,
};

#[tokio::test]
async fn test_run_shows_console() {
    let (_dir, context) = temp_context();
    let mut session = BridgeSession::new(context, Box::new(MockHost::new()), ConsoleView::new());
    assert!(!session.console().is_visible());

    session
        .run(&EditorSnapshot::saved("/a.jsx", ""))
        .await
        .unwrap();

    assert!(session.console().is_visible());
    assert_eq!(session.console().len(), 1);
}

#[tokio::test]
async fn test_run_can_leave_console_hidden() {
    let (_dir, context) = temp_context();
    let mut session = BridgeSession::new(context, Box::new(MockHost::new()), ConsoleView::new());
    session.set_show_on_run(false);

    session
        .run(&EditorSnapshot::saved("/a.jsx", ""))
        .await
        .unwrap();

    assert!(!session.console().is_visible());
    assert_eq!(session.console().len(), 1);
}

#[tokio::test]
async fn test_commands_dispatch() {
    let (_dir, context) = temp_context();
    let host = MockHost::new().with_dispatch(DispatchOutput::ok("ok"));
    let mut session = BridgeSession::new(context, Box::new(host), ConsoleView::new());
    let editor = EditorSnapshot::modified("/a.jsx", "1 + 1");

    let record = session
        .dispatch("psbridge:run".parse().unwrap(), &editor)
        .await
        .unwrap();
    assert!(record.unwrap().is_successful());
    assert_eq!(session.console().len(), 2);

    let record = session
        .dispatch(SessionCommand::ToggleConsole, &editor)
        .await
        .unwrap();
    assert!(record.is_none());
    assert!(!session.console().is_visible());

    session
        .dispatch(SessionCommand::ClearConsole, &editor)
        .await
        .unwrap();
    assert!(session.console().is_empty());
}

#[tokio::test]
async fn test_failed_run_keeps_session_usable() {
    let (_dir, context) = temp_context();
    let host = MockHost::new().with_discovery(Discovery::NotFound);
    let mut session = BridgeSession::new(context, Box::new(host), ConsoleView::new());
    let editor = EditorSnapshot::saved("/a.jsx", "");

    assert!(session.run(&editor).await.is_err());
    assert!(session.console().is_empty());
    assert!(session.console().is_visible());
    assert!(!session.toggle_console());
}

#[tokio::test]
async fn test_terminal_console_output() {
    let (_dir, context) = temp_context();
    let host = MockHost::new()
        .writing_log(&context.log_path, "##hello from jsx")
        .with_dispatch(DispatchOutput::ok("ok"));
    let console = TerminalConsole::new(Vec::new(), LineRenderer::new(false));
    let mut session = BridgeSession::new(context, Box::new(host), console);

    session
        .run(&EditorSnapshot::saved("/a.jsx", ""))
        .await
        .unwrap();

    let console = session.deactivate();
    let out = String::from_utf8(console.writer().clone()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Execution Time: "));
    assert_eq!(lines[1], "hello from jsx");
    assert!(lines[2].ends_with("Result: ok"));

    // deactivation hides and empties the view
    assert!(!console.view().is_visible());
    assert!(console.view().is_empty());
}

#[test]
fn test_serialize_is_passthrough() {
    let (_dir, context) = temp_context();
    let mut session = BridgeSession::new(context, Box::new(MockHost::new()), ConsoleView::new());
    session.clear_console();

    assert_eq!(session.serialize(), SessionState::default());
}

#[test]
fn test_console_sink_object_safety() {
    let mut view = ConsoleView::new();
    let sink: &mut dyn ConsoleSink = &mut view;
    sink.append("warning!", Severity::Warning);
    sink.append_untagged("plain");

    assert_eq!(view.lines()[0].class_name(), "warning");
    assert_eq!(view.lines()[1].class_name(), "log");
}

#[tokio::test]
async fn test_clear_command_wipes_terminal() {
    let (_dir, context) = temp_context();
    let console = TerminalConsole::new(Vec::new(), LineRenderer::new(true));
    let mut session = BridgeSession::new(context, Box::new(MockHost::new()), console);
    let editor = EditorSnapshot::modified("/a.jsx", "");

    session
        .dispatch(SessionCommand::Run, &editor)
        .await
        .unwrap();
    session
        .dispatch(SessionCommand::ClearConsole, &editor)
        .await
        .unwrap();

    let out = String::from_utf8(session.console().writer().clone()).unwrap();
    assert!(out.ends_with("\x1b[2J\x1b[H"));
    assert!(session.console().view().is_empty());
}
