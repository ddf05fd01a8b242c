//! Definition input: file or stdin, size-capped, optionally gzip-compressed

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;

/// Upload cap applied to the raw (possibly compressed) input.
pub const DEFAULT_MAX_SIZE: usize = 512 * 1024;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

fn open_reader(path: &Path) -> io::Result<Box<dyn Read>> {
    if path.to_string_lossy() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin().lock())));
    }
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

/// Read at most `max_size` bytes from `path` (`-` for stdin) and gunzip them
/// when they carry the gzip magic.
pub fn read_definition(path: &Path, max_size: usize) -> Result<Vec<u8>> {
    let reader = open_reader(path).with_context(|| format!("opening {}", path.display()))?;
    let mut raw = Vec::new();
    reader
        .take(max_size as u64 + 1)
        .read_to_end(&mut raw)
        .with_context(|| format!("reading {}", path.display()))?;
    if raw.len() > max_size {
        bail!("{} exceeds the {max_size} byte limit", path.display());
    }
    log::debug!("read {} bytes from {}", raw.len(), path.display());

    if !raw.starts_with(&GZIP_MAGIC) {
        return Ok(raw);
    }
    let mut content = Vec::new();
    GzDecoder::new(raw.as_slice())
        .read_to_end(&mut content)
        .context("decompressing gzip definition")?;
    log::debug!("gunzipped {} -> {} bytes", raw.len(), content.len());
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    #[test]
    fn test_plain_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"InputLayer linear\n").unwrap();
        assert_eq!(read_definition(file.path(), 64).unwrap(), b"InputLayer linear\n");
    }

    #[test]
    fn test_gzip_file() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"DenseLayer relu\n").unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        assert_eq!(read_definition(file.path(), 1024).unwrap(), b"DenseLayer relu\n");
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'x'; 16]).unwrap();
        assert!(read_definition(file.path(), 16).is_ok());
        assert!(read_definition(file.path(), 15).is_err());
    }

    #[test]
    fn test_corrupt_gzip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x1f, 0x8b, 0x00, 0x01]).unwrap();
        assert!(read_definition(file.path(), 64).is_err());
    }
}
