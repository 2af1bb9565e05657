//! Package archive walking
//!
//! A firmware package is a zip archive with up to four recognized entries,
//! matched by exact name. Unknown entries are ignored. The walk visits
//! every entry exactly once and reads recognized binaries fully into
//! memory; package sizes are bounded (KB–MB scale), so no streaming is
//! needed.

use std::io::{Cursor, Read};

use tracing::{debug, warn};

use crate::error::PackageError;

/// Fixed entry names recognized inside a package archive.
pub mod entry {
    /// JSON manifest describing the package
    pub const MANIFEST: &str = "info.json";
    /// Plain firmware binary
    pub const PLAIN_PAYLOAD: &str = "FIRM.bin";
    /// Encrypted firmware binary
    pub const ENCRYPTED_PAYLOAD: &str = "FIRM.bin.enc";
    /// Optional free-text flashing parameters
    pub const PARAMS: &str = "params.txt";
}

/// Raw entries pulled from a package archive in a single walk.
#[derive(Debug, Default, Clone)]
pub struct ArchiveContents {
    /// Raw manifest bytes, parsed by the manifest stage
    pub manifest: Option<Vec<u8>>,
    /// Plain firmware binary
    pub plain: Option<Vec<u8>>,
    /// Encrypted firmware binary
    pub encrypted: Option<Vec<u8>>,
    /// Flashing parameters text
    pub params: Option<String>,
}

/// Walk every entry of the archive once, collecting recognized entries.
///
/// # Errors
///
/// [`PackageError::Archive`] when the byte stream is not a readable
/// archive at all; [`PackageError::Unknown`] when an individual entry is
/// corrupt after the archive opened (truncated stream, bad local header).
pub fn read_archive(bytes: &[u8]) -> Result<ArchiveContents, PackageError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|err| {
        warn!(error = %err, "failed to open package archive");
        PackageError::Archive
    })?;

    let mut contents = ArchiveContents::default();
    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(|err| {
            warn!(index, error = %err, "failed to open archive entry");
            PackageError::Unknown
        })?;
        let name = file.name().to_string();
        match name.as_str() {
            entry::MANIFEST => contents.manifest = Some(read_entry(&name, &mut file)?),
            entry::PLAIN_PAYLOAD => contents.plain = Some(read_entry(&name, &mut file)?),
            entry::ENCRYPTED_PAYLOAD => contents.encrypted = Some(read_entry(&name, &mut file)?),
            entry::PARAMS => {
                let raw = read_entry(&name, &mut file)?;
                contents.params = Some(String::from_utf8_lossy(&raw).into_owned());
            }
            _ => debug!(name, "ignoring unrecognized archive entry"),
        }
    }
    Ok(contents)
}

/// Read one entry to completion. `read_to_end` keeps reading until the
/// decompressed stream is exhausted, so a short read from the transport
/// cannot truncate a payload silently.
fn read_entry<R: Read>(name: &str, reader: &mut R) -> Result<Vec<u8>, PackageError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(|err| {
        warn!(name, error = %err, "failed to read archive entry");
        PackageError::Unknown
    })?;
    debug!(name, bytes = buf.len(), "read archive entry");
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &[u8])]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer.start_file(*name, SimpleFileOptions::default())?;
            writer.write_all(data)?;
        }
        Ok(writer.finish()?.into_inner())
    }

    #[test]
    fn recognizes_all_four_entries() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = build_zip(&[
            (entry::MANIFEST, b"{}"),
            (entry::PLAIN_PAYLOAD, b"\x01\x02"),
            (entry::ENCRYPTED_PAYLOAD, b"\x03\x04\x05"),
            (entry::PARAMS, b"speed=25"),
        ])?;

        let contents = read_archive(&bytes)?;
        assert_eq!(contents.manifest.as_deref(), Some(b"{}".as_slice()));
        assert_eq!(contents.plain.as_deref(), Some([1u8, 2].as_slice()));
        assert_eq!(contents.encrypted.as_deref(), Some([3u8, 4, 5].as_slice()));
        assert_eq!(contents.params.as_deref(), Some("speed=25"));
        Ok(())
    }

    #[test]
    fn ignores_unknown_entries() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = build_zip(&[("README.txt", b"hello"), (entry::MANIFEST, b"{}")])?;

        let contents = read_archive(&bytes)?;
        assert!(contents.manifest.is_some());
        assert!(contents.plain.is_none());
        assert!(contents.encrypted.is_none());
        assert!(contents.params.is_none());
        Ok(())
    }

    #[test]
    fn garbage_bytes_are_an_archive_error() {
        let result = read_archive(b"not a zip archive");
        assert_eq!(result.map(|_| ()), Err(PackageError::Archive));
    }

    #[test]
    fn empty_archive_yields_empty_contents() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = build_zip(&[])?;
        let contents = read_archive(&bytes)?;
        assert!(contents.manifest.is_none());
        Ok(())
    }
}
