//! `filelists` metadata fragments.
//!
//! ```xml
//! <package pkgid="..." name="bash" arch="x86_64">
//!   <version epoch="0" ver="5.2.26" rel="3.fc40"/>
//!   <file>/usr/bin/bash</file>
//!   <file type="dir">/usr/share/doc/bash</file>
//! </package>
//! ```

use super::{sanitize_attr, sanitize_text};
use crate::error::{EmitErrorKind, RepodataError, Result};
use crate::model::PackageRecord;
use crate::normalize::PathClassifier;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// Namespace of the `filelists` document.
pub const FILELISTS_NS: &str = "http://linux.duke.edu/metadata/filelists";

fn xml_error(context: &str, err: impl std::fmt::Display) -> RepodataError {
    RepodataError::emit(context, EmitErrorKind::Xml(err.to_string()))
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| xml_error("writing filelists", e))
}

/// Write one `<file>` element per manifest entry.
///
/// Entries without a base name are skipped. With a classifier, only primary
/// paths are written. The `type` attribute appears for directories and
/// ghosts only.
pub fn write_files<W, C>(
    writer: &mut Writer<W>,
    record: &PackageRecord,
    primary_only: Option<&C>,
) -> Result<()>
where
    W: Write,
    C: PathClassifier + ?Sized,
{
    for file in record.files() {
        if file.name.is_empty() {
            continue;
        }
        let full_path = record.file_path(file);
        if let Some(classifier) = primary_only {
            if !classifier.is_primary(&full_path) {
                continue;
            }
        }

        let mut start = BytesStart::new("file");
        let kind = file.kind.as_str();
        if !kind.is_empty() {
            start.push_attribute(("type", kind));
        }
        write_event(writer, Event::Start(start))?;
        write_event(writer, Event::Text(BytesText::new(&sanitize_text(&full_path))))?;
        write_event(writer, Event::End(BytesEnd::new("file")))?;
    }
    Ok(())
}

/// Write a complete `<package>` element.
pub fn write_package<W, C>(
    writer: &mut Writer<W>,
    record: &PackageRecord,
    pkgid: &str,
    primary_only: Option<&C>,
) -> Result<()>
where
    W: Write,
    C: PathClassifier + ?Sized,
{
    let name = sanitize_attr(record.name());
    let arch = sanitize_attr(record.arch());
    let mut package = BytesStart::new("package");
    package.push_attribute(("pkgid", pkgid));
    package.push_attribute(("name", name.as_ref()));
    package.push_attribute(("arch", arch.as_ref()));
    write_event(writer, Event::Start(package))?;

    let epoch = sanitize_attr(record.epoch());
    let ver = sanitize_attr(record.version());
    let rel = sanitize_attr(record.release());
    let mut version = BytesStart::new("version");
    version.push_attribute(("epoch", epoch.as_ref()));
    version.push_attribute(("ver", ver.as_ref()));
    version.push_attribute(("rel", rel.as_ref()));
    write_event(writer, Event::Empty(version))?;

    write_files(writer, record, primary_only)?;
    write_event(writer, Event::End(BytesEnd::new("package")))
}

/// Render a standalone `filelists` document for the given `(pkgid, record)`
/// pairs.
pub fn filelists_document<'a, I, C>(records: I, primary_only: Option<&C>) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a PackageRecord)>,
    I::IntoIter: ExactSizeIterator,
    C: PathClassifier + ?Sized,
{
    let records = records.into_iter();
    let count = records.len().to_string();
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    let mut root = BytesStart::new("filelists");
    root.push_attribute(("xmlns", FILELISTS_NS));
    root.push_attribute(("packages", count.as_str()));
    write_event(&mut writer, Event::Start(root))?;

    for (pkgid, record) in records {
        write_package(&mut writer, record, pkgid, primary_only)?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("filelists")))?;
    String::from_utf8(writer.into_inner()).map_err(|e| xml_error("encoding filelists", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{HeaderMap, Tag};
    use crate::normalize::{package_from_header, ExtractOptions, PrimaryPaths};

    fn record() -> PackageRecord {
        let dirs: [&[u8]; 3] = [b"/usr/bin/", b"/usr/share/doc/", b"/usr/share/caf\xe9/"];
        let bases: [&[u8]; 4] = [b"tool", b"cafe", b"menu\x01.txt", b""];
        let header = HeaderMap::new()
            .with_string(Tag::Name, b"caf\xe9-tools")
            .with_string(Tag::Version, "1.0")
            .with_string(Tag::Release, "1")
            .with_string(Tag::Arch, "noarch")
            .with_strings(Tag::DirNames, dirs)
            .with_numbers(Tag::DirIndexes, [0, 1, 2, 1])
            .with_strings(Tag::BaseNames, bases)
            .with_numbers(Tag::FileFlags, [0, 0, 1 << 6, 0])
            .with_numbers(Tag::FileModes, [0o100_755, 0o040_755, 0o100_644, 0o100_644]);
        package_from_header(&header, &ExtractOptions::default())
    }

    fn render(primary_only: Option<&PrimaryPaths>) -> String {
        let record = record();
        let mut writer = Writer::new(Vec::new());
        write_package(&mut writer, &record, "abc123", primary_only).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_package_fragment() {
        let xml = render(None);
        assert!(xml.starts_with(r#"<package pkgid="abc123" name="café-tools" arch="noarch">"#));
        assert!(xml.contains(r#"<version epoch="0" ver="1.0" rel="1"/>"#));
        assert!(xml.contains("<file>/usr/bin/tool</file>"));
        assert!(xml.contains(r#"<file type="dir">/usr/share/doc/cafe</file>"#));
        assert!(xml.ends_with("</package>"));
    }

    #[test]
    fn test_text_is_sanitized() {
        let xml = render(None);
        assert!(xml.contains(r#"<file type="ghost">/usr/share/café/menu.txt</file>"#));
        assert!(!xml.contains('\u{1}'));
    }

    #[test]
    fn test_nameless_entries_are_skipped() {
        let xml = render(None);
        assert_eq!(xml.matches("<file").count(), 3);
    }

    #[test]
    fn test_primary_only() {
        let classifier = PrimaryPaths::new();
        let xml = render(Some(&classifier));
        assert_eq!(xml.matches("<file").count(), 1);
        assert!(xml.contains("<file>/usr/bin/tool</file>"));
    }

    #[test]
    fn test_document_wrapper() {
        let record = record();
        let doc = filelists_document([("abc123", &record)], None::<&PrimaryPaths>).unwrap();
        assert!(doc.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(doc.contains(r#"<filelists xmlns="http://linux.duke.edu/metadata/filelists" packages="1">"#));
        assert!(doc.trim_end().ends_with("</filelists>"));
    }
}
