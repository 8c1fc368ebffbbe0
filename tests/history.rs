//! Undo/redo through the editor surface.

use quillspan::{
    EditorConfig, Error, Formats, History, HistoryState, RichEditor, SpannedText,
};

fn editor() -> RichEditor {
    RichEditor::new(EditorConfig::default()).unwrap()
}

#[test]
fn fresh_editor_has_nothing_to_undo() {
    let mut editor = editor();
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert!(!editor.undo());
    assert!(!editor.redo());
    assert_eq!(editor.text(), "");
}

#[test]
fn formatting_only_change_is_not_recorded() {
    let mut editor = editor();
    editor.insert("Hello");
    let len = editor.history().len();
    editor.select_all();
    editor.bold(true);
    assert!(editor.contains(Formats::BOLD));
    assert_eq!(editor.history().len(), len);

    assert!(editor.undo());
    assert_eq!(editor.text(), "");
    assert!(editor.content().spans().is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn snapshots_carry_formatting_of_their_time() {
    let mut editor = editor();
    editor.insert("Hello");
    editor.select_all();
    editor.bold(true);
    editor.set_cursor(5);
    editor.insert("!");

    assert!(editor.undo());
    assert_eq!(editor.text(), "Hello");
    editor.select_all();
    assert!(editor.contains(Formats::BOLD));
    assert!(editor.redo());
    assert_eq!(editor.text(), "Hello!");
}

#[test]
fn redo_walks_forward_to_latest_state() {
    let mut editor = editor();
    editor.insert("a");
    editor.insert("b");
    editor.insert("c");

    editor.undo();
    editor.undo();
    assert_eq!(editor.text(), "a");

    assert!(editor.redo());
    assert_eq!(editor.text(), "ab");
    assert!(editor.redo());
    assert_eq!(editor.text(), "abc");
}

#[test]
fn undo_moves_cursor_to_end() {
    let mut editor = editor();
    editor.insert("abc");
    editor.insert("def");
    editor.undo();

    assert_eq!(editor.selection(), 3..3);
}

#[test]
fn no_op_changes_are_not_recorded() {
    let mut editor = editor();
    editor.insert("plain");
    let len = editor.history().len();

    // Removing a format that is not there changes nothing.
    editor.select_all();
    editor.underline(false);
    editor.bullet(false);
    assert_eq!(editor.history().len(), len);
}

#[test]
fn history_is_bounded() {
    let config = EditorConfig::default().with_history_size(3);
    let mut editor = RichEditor::new(config).unwrap();
    for c in ["a", "b", "c", "d", "e"] {
        editor.insert(c);
    }
    assert_eq!(editor.history().len(), 3);

    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(editor.text(), "ab");
}

#[test]
fn disabled_history_never_undoes() {
    let mut editor = RichEditor::new(EditorConfig::default().with_history(false)).unwrap();
    editor.insert("text");
    assert!(!editor.can_undo());
    assert!(!editor.undo());
    assert_eq!(editor.text(), "text");
    assert!(editor.history().is_empty());
}

#[test]
fn zero_history_size_fails_construction() {
    let err = RichEditor::new(EditorConfig::default().with_history_size(0)).unwrap_err();
    assert_eq!(err, Error::InvalidHistorySize { size: 0 });
}

#[test]
fn clear_history_drops_snapshots() {
    let mut editor = editor();
    editor.insert("one");
    editor.insert(" two");
    editor.clear_history();

    assert!(!editor.can_undo());
    assert_eq!(editor.text(), "one two");
}

#[test]
fn markup_load_is_undoable() {
    let mut editor = editor();
    editor.insert("draft");
    editor.from_markup("<b>final</b>");
    assert_eq!(editor.text(), "final");

    assert!(editor.undo());
    assert_eq!(editor.text(), "draft");
}

#[test]
fn nested_capture_keeps_outermost_snapshot() {
    let mut history: History<SpannedText> = History::new(true, 10);
    let mut doc = SpannedText::with_text("start");

    history.before_change(&doc);
    doc.insert(5, " one");
    history.before_change(&doc);
    assert_eq!(history.state(), HistoryState::Capturing);
    doc.insert(9, " two");
    history.after_change(&doc);

    assert_eq!(history.state(), HistoryState::Idle);
    assert_eq!(history.len(), 1);
    assert!(history.undo(&mut doc));
    assert_eq!(doc.text(), "start");
}
