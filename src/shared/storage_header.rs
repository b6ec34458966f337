use crc32fast::Hasher as Crc32Hasher;
use std::io::{Read, Write};

/// Fixed-size, CRC-protected preamble written at the start of every store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryHeader {
    pub magic: [u8; 8],
    pub version: u16,
    pub flags: u16,
    pub header_crc32: u32,
}

impl BinaryHeader {
    pub const LEN_WITHOUT_CRC: usize = 8 + 2 + 2 + 4;
    pub const TOTAL_LEN: usize = Self::LEN_WITHOUT_CRC + 4;

    pub fn new(magic: [u8; 8], version: u16, flags: u16) -> Self {
        let mut header = Self {
            magic,
            version,
            flags,
            header_crc32: 0,
        };
        header.header_crc32 = compute_crc32(&header.body());
        header
    }

    /// Magic, version, flags and four reserved zero bytes.
    fn body(&self) -> [u8; Self::LEN_WITHOUT_CRC] {
        let mut out = [0u8; Self::LEN_WITHOUT_CRC];
        out[..8].copy_from_slice(&self.magic);
        out[8..10].copy_from_slice(&self.version.to_le_bytes());
        out[10..12].copy_from_slice(&self.flags.to_le_bytes());
        out
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        w.write_all(&self.body())?;
        w.write_all(&self.header_crc32.to_le_bytes())
    }

    pub fn read_from<R: Read>(mut r: R) -> std::io::Result<Self> {
        let mut buf = [0u8; Self::TOTAL_LEN];
        r.read_exact(&mut buf)?;

        let (body, crc) = buf.split_at(Self::LEN_WITHOUT_CRC);
        let header_crc32 = u32::from_le_bytes([crc[0], crc[1], crc[2], crc[3]]);
        if compute_crc32(body) != header_crc32 {
            return Err(invalid_data("header CRC mismatch"));
        }
        if body[12..16] != [0u8; 4] {
            return Err(invalid_data("reserved header bytes must be zero"));
        }

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&body[..8]);
        Ok(Self {
            magic,
            version: u16::from_le_bytes([body[8], body[9]]),
            flags: u16::from_le_bytes([body[10], body[11]]),
            header_crc32,
        })
    }
}

pub fn compute_crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

fn invalid_data(msg: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, msg.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    StoreManifest,
    SegmentMeta,
    SegmentRows,
    NativeColumn,
}

impl FileKind {
    pub const fn magic(&self) -> [u8; 8] {
        match self {
            FileKind::StoreManifest => *b"DVENMAN\0",
            FileKind::SegmentMeta => *b"DVENSEG\0",
            FileKind::SegmentRows => *b"DVENROW\0",
            FileKind::NativeColumn => *b"DVENCOL\0",
        }
    }

    pub const fn version(&self) -> u16 {
        1
    }

    pub fn write_header<W: Write>(&self, writer: W) -> std::io::Result<()> {
        BinaryHeader::new(self.magic(), self.version(), 0).write_to(writer)
    }

    /// Reads a header and checks it belongs to this kind of file.
    pub fn read_header<R: Read>(&self, reader: R) -> std::io::Result<BinaryHeader> {
        let header = BinaryHeader::read_from(reader)?;
        if header.magic != self.magic() {
            return Err(invalid_data("invalid magic"));
        }
        if header.version != self.version() {
            return Err(invalid_data("unsupported version"));
        }
        Ok(header)
    }
}
