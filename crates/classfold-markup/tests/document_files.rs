//! Documents read from disk.

use std::io::Write;

use classfold_core::target::{ClassNamespace, ClassTarget};
use classfold_markup::{Document, Error};

#[test]
fn read_edit_and_write() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let source = "<?xml version=\"1.0\"?>\n<ul>\n  <li class=\"x-a\">one</li>\n  <li>two</li>\n</ul>\n";
    file.write_all(source.as_bytes()).unwrap();

    let mut doc = Document::from_file(file.path()).unwrap();
    assert_eq!(doc.to_markup().unwrap(), source);

    let relevant = doc.elements_in(&ClassNamespace::default());
    assert_eq!(relevant.len(), 1);
    doc.remove_classes_where(relevant[0], &|c| c.starts_with("x-"));
    doc.add_class(relevant[0], "q0");

    assert_eq!(
        doc.to_markup().unwrap(),
        source.replace("class=\"x-a\"", "class=\"q0\"")
    );
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.html");

    match Document::from_file(&path).unwrap_err() {
        Error::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
}
