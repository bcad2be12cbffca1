use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

/// Bytes of a capture, either mapped from disk or owned in memory.
pub enum CaptureBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl AsRef<[u8]> for CaptureBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            CaptureBytes::Mapped(mmap) => &mmap[..],
            CaptureBytes::Owned(bytes) => bytes.as_slice(),
        }
    }
}

/// Read a binary file using memory mapping for improved performance.
/// Empty files cannot be mapped and come back as an empty owned buffer.
pub fn read_binary_file_mmap(path: impl AsRef<Path>) -> io::Result<CaptureBytes> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(CaptureBytes::Owned(Vec::new()));
    }
    // Safety: The file is not modified while the mmap is active
    let mmap = unsafe { Mmap::map(&file) }?;
    Ok(CaptureBytes::Mapped(mmap))
}
