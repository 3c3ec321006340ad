use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Append `lines` to the file at `path`, one per line, creating it if needed.
///
/// Existing content is never rewritten. If the file is non-empty and does not
/// end in a line terminator, a `\n` goes first so the new lines never join a
/// partial one. The whole batch is written with a single call.
pub fn append_lines(path: &Path, lines: &[String]) -> io::Result<()> {
    let mut buf = String::new();
    if needs_leading_newline(path)? {
        buf.push('\n');
    }
    for line in lines {
        buf.push_str(line);
        buf.push('\n');
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(buf.as_bytes())?;
    file.flush()?;
    tracing::debug!(path = %path.display(), lines = lines.len(), "appended to sibling file");
    Ok(())
}

/// True when the file exists, is non-empty, and its last byte is neither
/// `\n` nor `\r`.
pub fn needs_leading_newline(path: &Path) -> io::Result<bool> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(!matches!(last[0], b'\n' | b'\r'))
}
