//! Archive fixtures for unit tests.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A fixture entry: a file with contents or a bare directory.
pub enum Entry<'a> {
    File(&'a str, &'a [u8]),
    Dir(&'a str),
}

/// Build an in-memory zip archive. Entry names are written verbatim, so
/// hostile names like `../x` end up in the central directory unchanged.
pub fn zip_bytes(entries: &[Entry<'_>]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for entry in entries {
        match entry {
            Entry::File(name, data) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data).unwrap();
            }
            Entry::Dir(name) => {
                writer.add_directory(*name, options).unwrap();
            }
        }
    }
    writer.finish().unwrap().into_inner()
}

/// A small but realistic web build.
pub fn web_build() -> Vec<u8> {
    zip_bytes(&[
        Entry::File("index.html", b"<html><body>game</body></html>"),
        Entry::Dir("Build/"),
        Entry::File("Build/game.wasm", &[0, 97, 115, 109, 1, 0, 0, 0]),
        Entry::File("TemplateData/style.css", b"body { margin: 0; }"),
    ])
}
