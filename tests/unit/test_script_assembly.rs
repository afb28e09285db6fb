//! Unit tests for script assembly

use psbridge::script::ScriptAssembler;
use psbridge::EditorSnapshot;

const HELPER: &str = "/opt/psbridge/jsx/Helpers.jsx";

#[test]
fn test_modified_buffer_is_sent_inline() {
    let assembler = ScriptAssembler::new(HELPER);
    let snapshot = EditorSnapshot::modified("/a.jsx", "alert(1)");

    assert_eq!(
        assembler.assemble(&snapshot),
        "#include /opt/psbridge/jsx/Helpers.jsx\n\nalert(1)"
    );
}

#[test]
fn test_saved_document_is_included() {
    let assembler = ScriptAssembler::new(HELPER);
    let snapshot = EditorSnapshot::saved("/a.jsx", "ignored");

    assert_eq!(
        assembler.assemble(&snapshot),
        "#include /opt/psbridge/jsx/Helpers.jsx\n\n#include /a.jsx"
    );
}

#[test]
fn test_empty_modified_buffer() {
    let assembler = ScriptAssembler::new(HELPER);
    let snapshot = EditorSnapshot::modified("/a.jsx", "");

    assert_eq!(
        assembler.assemble(&snapshot),
        "#include /opt/psbridge/jsx/Helpers.jsx\n\n"
    );
}

#[test]
fn test_buffer_text_is_not_altered() {
    let assembler = ScriptAssembler::new(HELPER);
    let text = "#target photoshop\r\nvar doc = app.activeDocument;\n\n";
    let snapshot = EditorSnapshot::modified("/a.jsx", text);

    let script = assembler.assemble(&snapshot);
    assert!(script.ends_with(text));
    assert_eq!(script.matches("#include").count(), 1);
}
