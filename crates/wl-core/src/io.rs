use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Readers see either the old content or the new content, never a prefix.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read a text file as lines, without line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Write `lines` to `path`, each followed by `\n`.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut data = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        data.push_str(line);
        data.push('\n');
    }
    atomic_write(path, data.as_bytes())
}
