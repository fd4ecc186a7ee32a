use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Replaces `path` with `content` through a sibling temp file and a rename,
/// creating missing parent directories first.
pub fn atomic_write_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let tmp_name = format!(
        ".{}.tmp-{}-{}",
        path.file_name().and_then(|v| v.to_str()).unwrap_or("prompt"),
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    );
    let tmp_path = parent.join(tmp_name);

    {
        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&tmp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

/// Writes an assembled prompt followed by a newline.
pub fn export_prompt(path: &Path, prompt: &str) -> std::io::Result<()> {
    let mut body = String::with_capacity(prompt.len() + 1);
    body.push_str(prompt);
    body.push('\n');
    atomic_write_file(path, body.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn export_prompt_creates_parents_and_replaces_content() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("out/prompt.txt");
        export_prompt(&path, "first.").expect("first export");
        export_prompt(&path, "second.").expect("second export");
        assert_eq!(fs::read_to_string(&path).expect("read"), "second.\n");

        let leftovers = fs::read_dir(dir.path().join("out"))
            .expect("list")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp-"))
            .count();
        assert_eq!(leftovers, 0);
    }
}
