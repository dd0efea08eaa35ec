use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Byte-exact comparison of two files, used to validate a round trip.
/// Succeeds only on full equality; the first difference wins.
pub fn verify(path_a: &Path, path_b: &Path) -> Result<()> {
    let len_a = fs::metadata(path_a)?.len();
    let len_b = fs::metadata(path_b)?.len();
    if len_a != len_b {
        return Err(Error::SizeMismatch {
            expected: len_a,
            actual: len_b,
        });
    }

    let reader_a = BufReader::new(File::open(path_a)?);
    let reader_b = BufReader::new(File::open(path_b)?);
    for (offset, (byte_a, byte_b)) in reader_a.bytes().zip(reader_b.bytes()).enumerate() {
        if byte_a? != byte_b? {
            return Err(Error::ContentMismatch {
                offset: offset as u64,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::verify;
    use crate::error::Error;

    fn pair(name: &str, a: &[u8], b: &[u8]) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir();
        let pid = std::process::id();
        let path_a = dir.join(format!("huffpack_verify_{pid}_{name}_a"));
        let path_b = dir.join(format!("huffpack_verify_{pid}_{name}_b"));
        fs::write(&path_a, a).unwrap();
        fs::write(&path_b, b).unwrap();
        (path_a, path_b)
    }

    fn cleanup(paths: (PathBuf, PathBuf)) {
        let _ = fs::remove_file(paths.0);
        let _ = fs::remove_file(paths.1);
    }

    #[test]
    fn identical_files_pass() {
        let (a, b) = pair("equal", b"same bytes", b"same bytes");
        assert!(verify(&a, &b).is_ok());
        cleanup((a, b));
    }

    #[test]
    fn different_lengths_fail_before_comparison() {
        let (a, b) = pair("len", b"short", b"a fair bit longer");
        assert!(matches!(
            verify(&a, &b),
            Err(Error::SizeMismatch { expected: 5, actual: 17 })
        ));
        cleanup((a, b));
    }

    #[test]
    fn first_differing_offset_is_reported() {
        let (a, b) = pair("diff", b"abcdef", b"abcxef");
        assert!(matches!(
            verify(&a, &b),
            Err(Error::ContentMismatch { offset: 3 })
        ));
        cleanup((a, b));
    }
}
