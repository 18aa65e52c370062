//! Persistent table layout: a little-endian `size_t` element count followed
//! by the raw elements. Transition tables store `i32`; PDBs store packed
//! nibble bytes. Readers verify `file_size == n * elem_size + 8` before
//! trusting the contents.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use memmap2::Mmap;

use crate::error::TableError;
use crate::packed::PackedArray;

/// Sequential I/O is chunked at this size so a single huge read/write never
/// has to cross whatever limit the platform's file API imposes.
const CHUNK_BYTES: usize = 64 * 1024 * 1024;

fn io_err(path: &Path, source: std::io::Error) -> TableError {
    TableError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn check_size(path: &Path, file_size: u64, count: u64, elem_size: u64) -> Result<(), TableError> {
    let expected = count * elem_size + 8;
    if file_size != expected {
        return Err(TableError::SizeMismatch {
            path: path.display().to_string(),
            actual: file_size,
            expected,
            count,
            elem_size,
        });
    }
    Ok(())
}

pub fn write_i32_table(path: &Path, data: &[i32]) -> Result<(), TableError> {
    let file = File::create(path).map_err(|e| io_err(path, e))?;
    let mut writer = BufWriter::with_capacity(CHUNK_BYTES, file);
    writer
        .write_all(&(data.len() as u64).to_le_bytes())
        .map_err(|e| io_err(path, e))?;
    let bytes: &[u8] = bytemuck_cast_i32_slice(data);
    for chunk in bytes.chunks(CHUNK_BYTES) {
        writer.write_all(chunk).map_err(|e| io_err(path, e))?;
    }
    writer.flush().map_err(|e| io_err(path, e))?;
    Ok(())
}

pub fn read_i32_table(path: &Path) -> Result<Vec<i32>, TableError> {
    if !path.exists() {
        return Err(TableError::Missing {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    let file_size = file.metadata().map_err(|e| io_err(path, e))?.len();

    let mut reader = BufReader::with_capacity(CHUNK_BYTES, file);
    let mut count_bytes = [0u8; 8];
    reader.read_exact(&mut count_bytes).map_err(|e| io_err(path, e))?;
    let count = u64::from_le_bytes(count_bytes);
    check_size(path, file_size, count, 4)?;

    let mut data = vec![0i32; count as usize];
    let bytes: &mut [u8] = bytemuck_cast_i32_slice_mut(&mut data);
    let mut filled = 0;
    while filled < bytes.len() {
        let end = (filled + CHUNK_BYTES).min(bytes.len());
        reader.read_exact(&mut bytes[filled..end]).map_err(|e| io_err(path, e))?;
        filled = end;
    }
    Ok(data)
}

pub fn write_packed(path: &Path, packed: &PackedArray) -> Result<(), TableError> {
    let file = File::create(path).map_err(|e| io_err(path, e))?;
    let mut writer = BufWriter::with_capacity(CHUNK_BYTES, file);
    writer
        .write_all(&(packed.len() as u64).to_le_bytes())
        .map_err(|e| io_err(path, e))?;
    for chunk in packed.as_bytes().chunks(CHUNK_BYTES) {
        writer.write_all(chunk).map_err(|e| io_err(path, e))?;
    }
    writer.flush().map_err(|e| io_err(path, e))?;
    Ok(())
}

pub fn read_packed(path: &Path) -> Result<PackedArray, TableError> {
    if !path.exists() {
        return Err(TableError::Missing {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    let file_size = file.metadata().map_err(|e| io_err(path, e))?.len();

    let mut reader = BufReader::with_capacity(CHUNK_BYTES, file);
    let mut count_bytes = [0u8; 8];
    reader.read_exact(&mut count_bytes).map_err(|e| io_err(path, e))?;
    let count = u64::from_le_bytes(count_bytes);
    let packed_bytes = count.div_ceil(2);
    check_size(path, file_size, packed_bytes, 1)?;

    let mut bytes = vec![0u8; packed_bytes as usize];
    let mut filled = 0;
    while filled < bytes.len() {
        let end = (filled + CHUNK_BYTES).min(bytes.len());
        reader.read_exact(&mut bytes[filled..end]).map_err(|e| io_err(path, e))?;
        filled = end;
    }
    Ok(PackedArray::from_bytes(bytes.into_boxed_slice(), count as usize))
}

/// A memory-mapped PDB for the huge (Edges-6 x Corners-2) case, where fully
/// loading the packed bytes into the heap would double peak RSS for no
/// benefit: the OS page cache already holds the hot pages resident.
pub struct MmappedPdb {
    mmap: Mmap,
    len: usize,
}

impl MmappedPdb {
    pub fn open(path: &Path) -> Result<Self, TableError> {
        if !path.exists() {
            return Err(TableError::Missing {
                path: path.display().to_string(),
            });
        }
        let file = File::open(path).map_err(|e| io_err(path, e))?;
        let file_size = file.metadata().map_err(|e| io_err(path, e))?.len();
        // SAFETY: the file is not expected to be mutated by another process
        // while the analyzer holds this mapping.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| io_err(path, e))?;
        let count = u64::from_le_bytes(mmap[0..8].try_into().unwrap());
        let packed_bytes = count.div_ceil(2);
        check_size(path, file_size, packed_bytes, 1)?;
        Ok(MmappedPdb { mmap, len: count as usize })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, i: u64) -> u8 {
        let byte = self.mmap[8 + (i >> 1) as usize];
        (byte >> ((i & 1) << 2)) & 0xF
    }
}

fn bytemuck_cast_i32_slice(data: &[i32]) -> &[u8] {
    // SAFETY: i32 has no padding and any bit pattern is valid; the slice's
    // lifetime and length are preserved via the byte-length conversion.
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

fn bytemuck_cast_i32_slice_mut(data: &mut [i32]) -> &mut [u8] {
    // SAFETY: see bytemuck_cast_i32_slice.
    unsafe { std::slice::from_raw_parts_mut(data.as_mut_ptr() as *mut u8, std::mem::size_of_val(data)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn i32_table_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.bin");
        let data = vec![1, -2, 3, 4, 5];
        write_i32_table(&path, &data).unwrap();
        let back = read_i32_table(&path).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn truncated_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.bin");
        write_i32_table(&path, &[1, 2, 3]).unwrap();
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.pop();
        std::fs::write(&path, bytes).unwrap();
        assert!(matches!(read_i32_table(&path), Err(TableError::SizeMismatch { .. })));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        assert!(matches!(read_i32_table(&path), Err(TableError::Missing { .. })));
    }

    #[test]
    fn packed_pdb_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.bin");
        let mut packed = PackedArray::new(37);
        for i in 0..37u64 {
            packed.set(i, (i % 15) as u8);
        }
        write_packed(&path, &packed).unwrap();
        let back = read_packed(&path).unwrap();
        for i in 0..37u64 {
            assert_eq!(back.get(i), packed.get(i));
        }
    }

    #[test]
    fn mmapped_pdb_matches_owned_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.bin");
        let mut packed = PackedArray::new(50);
        for i in 0..50u64 {
            packed.set(i, (i % 15) as u8);
        }
        write_packed(&path, &packed).unwrap();
        let mapped = MmappedPdb::open(&path).unwrap();
        for i in 0..50u64 {
            assert_eq!(mapped.get(i), packed.get(i));
        }
    }
}
