//! Inline images: placeholders, markup references and async load tickets.

use quillspan::{
    Bitmap, EditorConfig, ImageSource, OBJECT_REPLACEMENT, Payload, RichEditor, StyleKind,
};

#[derive(Debug, PartialEq)]
struct Decoded {
    width: u32,
}

fn editor() -> RichEditor {
    RichEditor::new(EditorConfig::default()).unwrap()
}

fn image_span(editor: &RichEditor) -> Option<(std::ops::Range<usize>, Payload)> {
    editor
        .content()
        .spans_of_kind(StyleKind::Image)
        .next()
        .map(|s| (s.range.clone(), s.payload.clone()))
}

#[test]
fn insert_image_adds_placeholder_and_break() {
    let mut editor = editor();
    editor.insert("ab");
    editor.set_cursor(1);
    editor.insert_image(ImageSource::from_locator("pic.png"), None);

    assert_eq!(editor.text(), format!("a{OBJECT_REPLACEMENT}\nb"));
    assert_eq!(editor.selection(), 3..3);
    let (range, _) = image_span(&editor).unwrap();
    assert_eq!(range, 1..2);
    assert_eq!(editor.to_markup(), r#"a<img src="pic.png"><br>b"#);
}

#[test]
fn markup_images_go_through_resolver() {
    let bitmap = Bitmap::new(Decoded { width: 64 });
    let mut seen = Vec::new();
    let mut resolver = |locator: &str| {
        seen.push(locator.to_string());
        Some(bitmap.clone())
    };

    let mut editor = editor();
    editor.from_markup_with(r#"<img src="https://cdn.example/cat.png">caption"#, &mut resolver);

    assert_eq!(seen, vec!["https://cdn.example/cat.png".to_string()]);
    let (_, payload) = image_span(&editor).unwrap();
    let Payload::Image(image) = payload else {
        panic!("expected an image payload");
    };
    assert_eq!(image.source, ImageSource::Uri("https://cdn.example/cat.png".into()));
    assert_eq!(
        image.bitmap.as_ref().and_then(|b| b.downcast_ref::<Decoded>()),
        Some(&Decoded { width: 64 })
    );
    assert_eq!(editor.to_markup(), r#"<img src="https://cdn.example/cat.png">caption"#);
}

#[test]
fn latest_request_wins() {
    let mut editor = editor();
    let first = editor.request_image(ImageSource::from_locator("one.png"), 320);
    let second = editor.request_image(ImageSource::from_locator("two.png"), 320);
    assert!(second.id() > first.id());

    assert!(!editor.complete_image(first, Bitmap::new(Decoded { width: 1 })));
    assert!(editor.text().is_empty());

    assert!(editor.complete_image(second, Bitmap::new(Decoded { width: 2 })));
    let (_, payload) = image_span(&editor).unwrap();
    let Payload::Image(image) = payload else {
        panic!("expected an image payload");
    };
    assert_eq!(image.source, ImageSource::from_locator("two.png"));
}

#[test]
fn cancelled_request_is_dropped() {
    let mut editor = editor();
    let request = editor.request_image(ImageSource::from_locator("slow.png"), 100);
    editor.cancel_image();

    assert!(!editor.complete_image(request, Bitmap::new(Decoded { width: 3 })));
    assert!(editor.content().spans().is_empty());
}

#[test]
fn completed_request_cannot_complete_twice() {
    let mut editor = editor();
    let request = editor.request_image(ImageSource::from_locator("x.png"), 100);
    assert!(editor.complete_image(request.clone(), Bitmap::new(Decoded { width: 4 })));
    assert!(!editor.complete_image(request, Bitmap::new(Decoded { width: 4 })));
}

#[test]
fn image_insert_is_undoable() {
    let mut editor = editor();
    editor.insert_image(ImageSource::from_locator("a.png"), None);
    assert!(editor.undo());
    assert_eq!(editor.text(), "");
}
