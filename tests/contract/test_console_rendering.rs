//! Contract tests for console rendering
//!
//! Every severity renders with its own styling class; untagged and unknown
//! tags fall back to the default.

use psbridge::{ConsoleLine, ConsoleSink, ConsoleView, LineRenderer, Severity, TerminalConsole};

#[test]
fn test_each_severity_has_its_class() {
    let expected = [
        (Some("log"), "log"),
        (Some("execution"), "execution"),
        (Some("error"), "error"),
        (Some("info"), "info"),
        (Some("warning"), "warning"),
        (None, "log"),
        (Some("debug"), "log"),
    ];

    let mut view = ConsoleView::new();
    for (tag, _) in &expected {
        view.append("message", Severity::from_tag(*tag));
    }

    let classes: Vec<&str> = view.lines().iter().map(|l| l.class_name()).collect();
    let wanted: Vec<&str> = expected.iter().map(|(_, class)| *class).collect();
    assert_eq!(classes, wanted);
}

#[test]
fn test_clear_after_any_number_of_appends() {
    for count in [0usize, 1, 2, 50, 500] {
        let mut view = ConsoleView::new();
        for i in 0..count {
            view.append(&format!("line {}", i), Severity::ALL[i % Severity::ALL.len()]);
        }
        view.clear();
        assert_eq!(view.len(), 0);
    }
}

#[test]
fn test_distinct_terminal_styles() {
    let renderer = LineRenderer::new(true);
    let rendered: Vec<String> = Severity::ALL
        .iter()
        .map(|s| renderer.render(&ConsoleLine::new("x", *s)))
        .collect();

    for (i, a) in rendered.iter().enumerate() {
        for b in rendered.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_terminal_console_skips_output_while_hidden() {
    let mut console = TerminalConsole::new(Vec::new(), LineRenderer::new(false));
    console.show();
    console.append("visible", Severity::Info);
    console.hide();
    console.append("hidden", Severity::Info);
    console.clear();
    console.show();
    console.append("after clear", Severity::Info);

    let out = String::from_utf8(console.writer().clone()).unwrap();
    assert_eq!(out, "visible\nafter clear\n");
}

#[test]
fn test_messages_are_kept_verbatim() {
    let mut view = ConsoleView::new();
    view.append("  padded\nand multi-line  ", Severity::Log);
    assert_eq!(view.lines()[0].text, "  padded\nand multi-line  ");
}
