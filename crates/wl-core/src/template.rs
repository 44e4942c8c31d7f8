use crate::error::Result;
use crate::placeholder::ReplacementMap;
use std::path::Path;

/// Replace every literal occurrence of every key, in map order.
///
/// Values are not protected: if a value contains a key that comes later in
/// the map, that key is substituted too.
pub fn fill(line: &str, replacements: &ReplacementMap) -> String {
    let mut out = line.to_string();
    for (key, value) in replacements {
        if !key.is_empty() && out.contains(key.as_str()) {
            out = out.replace(key.as_str(), value);
        }
    }
    out
}

/// Fill a template file line by line; every line, including the last, ends
/// with `\n`. A template that cannot be read yields an empty string.
pub fn fill_file(path: &Path, replacements: &ReplacementMap) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => fill_text(&content, replacements),
        Err(e) => {
            tracing::error!(template = %path.display(), error = %e, "failed to read template");
            String::new()
        }
    }
}

/// [`fill_file`] over in-memory text.
pub fn fill_text(content: &str, replacements: &ReplacementMap) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.lines() {
        out.push_str(&fill(line, replacements));
        out.push('\n');
    }
    out
}

/// Replace `path` with `content`, logging the outcome.
pub fn write_to_file(path: &Path, content: &str) -> Result<()> {
    match crate::io::atomic_write(path, content.as_bytes()) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "written");
            Ok(())
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to write file");
            Err(e)
        }
    }
}
