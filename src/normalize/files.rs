//! File manifest construction.

use crate::header::{HeaderStore, Tag};
use crate::model::{FileKind, PackageFile, StringPool};
use std::collections::HashSet;

/// Files of one package plus the set of their full paths.
#[derive(Debug, Default)]
pub struct FileManifest {
    pub files: Vec<PackageFile>,
    paths: HashSet<Vec<u8>>,
}

impl FileManifest {
    /// Whether the package ships the given full path.
    #[must_use]
    pub fn contains(&self, path: &[u8]) -> bool {
        self.paths.contains(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Read the file arrays (dir names, dir indexes, base names, flags, modes)
/// and build the manifest in header order.
///
/// If any of the arrays is missing the package is treated as having no
/// files. Arrays of different lengths are walked up to the shortest.
pub fn build_file_manifest<H>(header: &H, pool: &mut StringPool, nevra: &str) -> FileManifest
where
    H: HeaderStore + ?Sized,
{
    let (Some(dir_names), Some(dir_indexes), Some(base_names), Some(flags), Some(modes)) = (
        header.string_array(Tag::DirNames),
        header.number_array(Tag::DirIndexes),
        header.string_array(Tag::BaseNames),
        header.number_array(Tag::FileFlags),
        header.number_array(Tag::FileModes),
    ) else {
        return FileManifest::default();
    };

    let count = base_names
        .len()
        .min(dir_indexes.len())
        .min(flags.len())
        .min(modes.len());
    let mut manifest = FileManifest {
        files: Vec::with_capacity(count),
        paths: HashSet::with_capacity(count),
    };

    for i in 0..count {
        let base_name = base_names[i];
        let dir_name = usize::try_from(dir_indexes[i])
            .ok()
            .and_then(|idx| dir_names.get(idx).copied())
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Directory index {} of file \"{}\" is out of range in package \"{}\"",
                    dir_indexes[i],
                    String::from_utf8_lossy(base_name),
                    nevra
                );
                b"".as_slice()
            });

        manifest.files.push(PackageFile {
            name: pool.insert(base_name),
            path: pool.insert(dir_name),
            kind: FileKind::from_mode_and_flags(modes[i], flags[i]),
        });
        manifest.paths.insert([dir_name, base_name].concat());
    }

    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderMap;

    fn header() -> HeaderMap {
        HeaderMap::new()
            .with_strings(Tag::DirNames, ["/etc/", "/usr/bin/", "/var/lib/app/"])
            .with_numbers(Tag::DirIndexes, [0, 1, 2, 1])
            .with_strings(Tag::BaseNames, ["app.conf", "app", "state", "app-helper"])
            .with_numbers(Tag::FileFlags, [1, 0, 1 << 6, 0])
            .with_numbers(Tag::FileModes, [0o100_644, 0o100_755, 0o040_755, 0o100_755])
    }

    #[test]
    fn test_manifest_in_header_order() {
        let mut pool = StringPool::new();
        let manifest = build_file_manifest(&header(), &mut pool, "app-0:1-1.x86_64");

        assert_eq!(manifest.len(), 4);
        let paths: Vec<_> = manifest
            .files
            .iter()
            .map(|f| [pool.get(f.path), pool.get(f.name)].concat())
            .collect();
        assert_eq!(
            paths,
            vec![
                b"/etc/app.conf".to_vec(),
                b"/usr/bin/app".to_vec(),
                b"/var/lib/app/state".to_vec(),
                b"/usr/bin/app-helper".to_vec(),
            ]
        );
        let kinds: Vec<_> = manifest.files.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![FileKind::Plain, FileKind::Plain, FileKind::Dir, FileKind::Plain]
        );
        assert!(manifest.contains(b"/usr/bin/app"));
        assert!(!manifest.contains(b"/usr/bin/"));
    }

    #[test]
    fn test_missing_array_means_no_files() {
        let mut header = header();
        header.remove(Tag::FileModes);
        let mut pool = StringPool::new();
        let manifest = build_file_manifest(&header, &mut pool, "app");
        assert!(manifest.is_empty());
        assert!(!manifest.contains(b"/usr/bin/app"));
    }

    #[test]
    fn test_bad_directory_index_gives_empty_path() {
        let header = HeaderMap::new()
            .with_strings(Tag::DirNames, ["/usr/bin/"])
            .with_numbers(Tag::DirIndexes, [3])
            .with_strings(Tag::BaseNames, ["orphan"])
            .with_numbers(Tag::FileFlags, [0])
            .with_numbers(Tag::FileModes, [0o100_644]);
        let mut pool = StringPool::new();
        let manifest = build_file_manifest(&header, &mut pool, "app");

        assert_eq!(manifest.len(), 1);
        assert_eq!(pool.get(manifest.files[0].path), b"");
        assert!(manifest.contains(b"orphan"));
    }

    #[test]
    fn test_ragged_arrays_stop_at_shortest() {
        let header = header().with_numbers(Tag::FileModes, [0o100_644, 0o100_755]);
        let mut pool = StringPool::new();
        let manifest = build_file_manifest(&header, &mut pool, "app");
        assert_eq!(manifest.len(), 2);
    }
}
