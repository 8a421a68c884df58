use crate::error::Error;
use crate::memory::Memory;
use byteorder::{BigEndian, ReadBytesExt};
use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Loads one big-endian object image into `memory`, grounded on
/// `twe4ked-lc3/src/file_loader.rs`'s read loop (terminating on
/// `UnexpectedEof`) and `twe4ked-lc3/src/file.rs`'s origin framing, with the
/// `65536 - origin` read clamp from the original `read_image_file`.
///
/// The loader borrows `memory` mutably; it does not own it (spec.md §9).
pub fn load_image(path: &Path, memory: &mut Memory) -> Result<(), Error> {
    let mut reader = BufReader::new(fs::File::open(path).map_err(|e| to_load_error(path, e))?);

    let origin = reader
        .read_u16::<BigEndian>()
        .map_err(|e| to_load_error(path, e))?;

    let max_words = u32::from(u16::MAX) + 1 - u32::from(origin);
    let mut address = origin;
    for _ in 0..max_words {
        match reader.read_u16::<BigEndian>() {
            Ok(word) => {
                memory.write(address, word);
                address = address.wrapping_add(1);
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(to_load_error(path, e)),
        }
    }

    Ok(())
}

fn to_load_error(path: &Path, source: io::Error) -> Error {
    Error::ImageLoad {
        path: PathBuf::from(path),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn image_bytes(origin: u16, words: &[u16]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&origin.to_be_bytes());
        for w in words {
            bytes.extend_from_slice(&w.to_be_bytes());
        }
        bytes
    }

    #[test]
    fn loads_origin_and_words_big_endian() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file()
            .write_all(&image_bytes(0x3000, &[0x1234, 0x5678]))
            .unwrap();

        let mut memory = Memory::new();
        load_image(file.path(), &mut memory).unwrap();

        assert_eq!(memory.peek(0x3000), 0x1234);
        assert_eq!(memory.peek(0x3001), 0x5678);
    }

    #[test]
    fn missing_file_is_image_load_error() {
        let mut memory = Memory::new();
        let err = load_image(Path::new("/nonexistent/path/to/image"), &mut memory);
        assert!(matches!(err, Err(Error::ImageLoad { .. })));
    }

    #[test]
    fn truncated_file_is_image_load_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().write_all(&[0x30]).unwrap();

        let mut memory = Memory::new();
        let err = load_image(file.path(), &mut memory);
        assert!(matches!(err, Err(Error::ImageLoad { .. })));
    }

    #[test]
    fn loader_clamps_reads_past_end_of_address_space() {
        let mut bytes = image_bytes(0xFFFE, &[0xAAAA, 0xBBBB, 0xCCCC]);
        bytes.truncate(bytes.len());
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().write_all(&bytes).unwrap();

        let mut memory = Memory::new();
        load_image(file.path(), &mut memory).unwrap();

        assert_eq!(memory.peek(0xFFFE), 0xAAAA);
        assert_eq!(memory.peek(0xFFFF), 0xBBBB);
    }

    #[test]
    fn later_images_overwrite_overlapping_regions() {
        let file_a = tempfile::NamedTempFile::new().unwrap();
        file_a
            .as_file()
            .write_all(&image_bytes(0x3000, &[1, 2, 3]))
            .unwrap();
        let file_b = tempfile::NamedTempFile::new().unwrap();
        file_b
            .as_file()
            .write_all(&image_bytes(0x3001, &[42]))
            .unwrap();

        let mut memory = Memory::new();
        load_image(file_a.path(), &mut memory).unwrap();
        load_image(file_b.path(), &mut memory).unwrap();

        assert_eq!(memory.peek(0x3000), 1);
        assert_eq!(memory.peek(0x3001), 42);
        assert_eq!(memory.peek(0x3002), 3);
    }
}
