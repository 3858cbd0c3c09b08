//! File system utilities: input discovery, mirrored output paths, writers.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How rewritten files reach the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Append to any existing output file. Re-running duplicates content.
    #[default]
    Append,
    /// Replace the output file atomically.
    Overwrite,
}

/// Lists regular files under `input_dir`, sorted by path.
///
/// Without `recursive` only direct children are returned. Anything under
/// `exclude` (typically the output directory) is skipped.
pub fn collect_input_files(
    input_dir: &Path,
    recursive: bool,
    exclude: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    fs::metadata(input_dir)
        .with_context(|| format!("Failed to access input directory: {}", input_dir.display()))?;

    let exclude = exclude.and_then(|path| path.canonicalize().ok());
    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files = Vec::new();
    let walker = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            exclude.as_ref().is_none_or(|excluded| {
                entry
                    .path()
                    .canonicalize()
                    .map_or(true, |path| !path.starts_with(excluded))
            })
        });

    for entry in walker {
        let entry = entry.with_context(|| {
            format!("Failed to read input directory: {}", input_dir.display())
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Maps `input` under `input_dir` to the same relative path under `output_dir`.
pub fn mirror_path(input: &Path, input_dir: &Path, output_dir: &Path) -> Result<PathBuf> {
    let relative = input.strip_prefix(input_dir).with_context(|| {
        format!(
            "{} is not inside {}",
            input.display(),
            input_dir.display()
        )
    })?;
    Ok(output_dir.join(relative))
}

/// Writes `lines` to `path` according to `mode`, creating parent directories.
pub fn write_lines(path: &Path, lines: &[String], mode: WriteMode) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    match mode {
        WriteMode::Append => append_lines(path, lines),
        WriteMode::Overwrite => atomic_write(path, &lines.concat()),
    }
}

/// Appends `lines` verbatim to `path`, creating it if needed.
pub fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    for line in lines {
        writer
            .write_all(line.as_bytes())
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    Ok(())
}

/// Writes content to a file atomically using a temp file and rename.
///
/// The temp file lives in the target's directory so the rename stays on one
/// filesystem.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace output file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_append_twice_duplicates_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.rs");

        write_lines(&path, &lines(&["a\n", "b\n"]), WriteMode::Append).unwrap();
        write_lines(&path, &lines(&["a\n", "b\n"]), WriteMode::Append).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\na\nb\n");
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.rs");

        fs::write(&path, "old\n").unwrap();
        write_lines(&path, &lines(&["new\n"]), WriteMode::Overwrite).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        assert!(!temp_dir.path().join(".out.rs.tmp").exists());
    }

    #[test]
    fn test_write_lines_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/deeper/out.rs");

        write_lines(&path, &lines(&["// 注释\n"]), WriteMode::Append).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "// 注释\n");
    }

    #[test]
    fn test_mirror_path() {
        let mirrored = mirror_path(
            Path::new("/in/src/main.rs"),
            Path::new("/in"),
            Path::new("/out"),
        )
        .unwrap();
        assert_eq!(mirrored, PathBuf::from("/out/src/main.rs"));

        assert!(mirror_path(Path::new("/elsewhere/a.rs"), Path::new("/in"), Path::new("/out")).is_err());
    }

    #[test]
    fn test_collect_top_level_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.rs"), "").unwrap();
        fs::write(temp_dir.path().join("a.rs"), "").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("sub/c.rs"), "").unwrap();

        let files = collect_input_files(temp_dir.path(), false, None).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_collect_recursive_skips_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.rs"), "").unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/c.rs"), "").unwrap();
        fs::create_dir_all(root.join("translated")).unwrap();
        fs::write(root.join("translated/a.rs"), "").unwrap();

        let files = collect_input_files(root, true, Some(&root.join("translated"))).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.contains(&root.join("a.rs")));
        assert!(files.contains(&root.join("sub/c.rs")));
    }

    #[test]
    fn test_collect_missing_directory() {
        let result = collect_input_files(Path::new("/nonexistent/cmtl/input"), false, None);
        assert!(result.is_err());
    }
}
