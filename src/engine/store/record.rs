use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::engine::errors::StoreError;
use crate::shared::storage_header::{FileKind, compute_crc32};

/// Upper bound on one encoded record; anything larger is treated as corruption.
pub const MAX_RECORD_LEN_BYTES: u32 = 64 * 1024 * 1024;

fn corrupt(path: &Path, reason: impl Into<String>) -> StoreError {
    StoreError::CorruptFile {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Writes one `len | crc32 | bincode` record. Records the reader would
/// refuse are refused here too.
pub fn write_record<W: Write, T: Serialize>(w: &mut W, record: &T) -> Result<(), StoreError> {
    let encoded = bincode::serialize(record)?;
    let len = u32::try_from(encoded.len())
        .ok()
        .filter(|len| *len <= MAX_RECORD_LEN_BYTES)
        .ok_or(StoreError::RecordTooLarge {
            len: encoded.len(),
            max: MAX_RECORD_LEN_BYTES,
        })?;
    w.write_all(&len.to_le_bytes())?;
    w.write_all(&compute_crc32(&encoded).to_le_bytes())?;
    w.write_all(&encoded)?;
    Ok(())
}

/// Reads the next record, `Ok(None)` on a clean end of file.
pub fn read_record<R: Read, T: DeserializeOwned>(
    r: &mut R,
    path: &Path,
) -> Result<Option<T>, StoreError> {
    let mut len_buf = [0u8; 4];
    match r.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let len = u32::from_le_bytes(len_buf);
    if len > MAX_RECORD_LEN_BYTES {
        return Err(corrupt(path, format!("record length too large: {} bytes", len)));
    }

    let mut crc_buf = [0u8; 4];
    r.read_exact(&mut crc_buf)
        .map_err(|e| corrupt(path, format!("failed to read CRC: {}", e)))?;
    let expected_crc = u32::from_le_bytes(crc_buf);

    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf)
        .map_err(|e| corrupt(path, format!("failed to read full record: {}", e)))?;
    if compute_crc32(&buf) != expected_crc {
        return Err(corrupt(path, "record CRC mismatch"));
    }
    Ok(Some(bincode::deserialize(&buf)?))
}

/// Writes a headed file holding a sequence of records, via a temp file and rename.
pub fn write_records_file<'a, T, I>(path: &Path, kind: FileKind, records: I) -> Result<(), StoreError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let tmp = path.with_extension("tmp");
    let written = (|| -> Result<(), StoreError> {
        let mut w = BufWriter::new(File::create(&tmp)?);
        kind.write_header(&mut w)?;
        for record in records {
            write_record(&mut w, record)?;
        }
        let file = w.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    })();
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn read_records_file<T: DeserializeOwned>(path: &Path, kind: FileKind) -> Result<Vec<T>, StoreError> {
    let mut r = BufReader::new(File::open(path)?);
    kind.read_header(&mut r)
        .map_err(|e| corrupt(path, e.to_string()))?;
    let mut out = Vec::new();
    while let Some(record) = read_record(&mut r, path)? {
        out.push(record);
    }
    Ok(out)
}

/// Single-record file.
pub fn write_single<T: Serialize>(path: &Path, kind: FileKind, record: &T) -> Result<(), StoreError> {
    write_records_file(path, kind, std::iter::once(record))
}

pub fn read_single<T: DeserializeOwned>(path: &Path, kind: FileKind) -> Result<T, StoreError> {
    let mut records = read_records_file::<T>(path, kind)?;
    if records.len() != 1 {
        return Err(corrupt(
            path,
            format!("expected exactly one record, found {}", records.len()),
        ));
    }
    Ok(records.remove(0))
}
