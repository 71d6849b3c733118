use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Collect the files under `root` that the scanner should look at.
///
/// Directories whose path contains one of the `exclude` markers are pruned
/// along with everything under them (substring match, so `build` also skips
/// `out/build`). Files are kept when their name ends with one of the
/// configured extensions. Entries are visited in file-name order so repeated
/// runs over an unchanged tree see the same sequence.
pub fn collect_files(root: &Path, exclude: &[String], extensions: &[String]) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, exclude));

    let mut files = Vec::new();
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => warn!("Skipping unreadable entry during walk: {}", e),
        }
    }
    files
}

fn is_excluded_dir(entry: &DirEntry, exclude: &[String]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let path = entry.path().to_string_lossy();
    exclude.iter().any(|marker| path.contains(marker.as_str()))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}
