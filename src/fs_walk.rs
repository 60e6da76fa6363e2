use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

/// Expands a path argument into the files whose lines are tried.
///
/// Directories are only walked when `recursive` is set. Output is sorted.
pub fn collect_files(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if root.is_file() {
        out.push(root.to_path_buf());
    } else if root.is_dir() {
        if recursive {
            collect_recursive(root, &mut out);
        } else {
            warn!("{}: is a directory (use -r)", root.display());
        }
    } else {
        warn!("{}: no such file", root.display());
    }
    out.sort();
    out
}

fn collect_recursive(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("{}: {err}", dir.display());
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_recursive(&path, out);
        } else if path.is_file() {
            out.push(path);
        }
    }
}
