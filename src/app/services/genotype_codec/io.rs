//! Latin-1 file transport for genotype files
//!
//! Genotype files are single-byte Latin-1 text. Reading maps each byte to
//! the Unicode code point of the same value, so column offsets stay equal
//! to byte offsets; writing is the inverse, with `?` substituted for any
//! character outside the Latin-1 range.

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Read a whole file as Latin-1 text
pub fn read_latin1(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;
    Ok(bytes.iter().map(|&b| b as char).collect())
}

/// Write text to a file as Latin-1 bytes
pub fn write_latin1(path: &Path, text: &str) -> Result<()> {
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect();
    fs::write(path, bytes)
        .map_err(|e| Error::io(format!("Failed to write file {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");

        // 0xE9 is 'é' in Latin-1
        std::fs::write(&path, [b'a', 0xE9, b'b']).unwrap();
        let text = read_latin1(&path).unwrap();
        assert_eq!(text, "a\u{e9}b");

        write_latin1(&path, &text).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![b'a', 0xE9, b'b']);
    }

    #[test]
    fn test_non_latin1_substituted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subst.txt");
        write_latin1(&path, "a\u{4e16}b").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"a?b");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_latin1(Path::new("/nonexistent/genotype.CUL")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
