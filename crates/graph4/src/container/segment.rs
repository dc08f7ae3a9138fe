/// First byte of every MSX-BASIC `BSAVE` file.
pub const BSAVE_MAGIC: u8 = 0xFE;

/// File prefix in front of a segment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// 7-byte `BSAVE` header: magic, then start, end and exec address as
    /// little-endian words.
    Bsave { start: u16, end: u16, exec: u16 },
    /// 4-byte `COPY` header: width and height as little-endian words.
    CopyDims { width: u16, height: u16 },
}

impl Header {
    /// `BSAVE` header for a body loaded at `start`.
    ///
    /// The end address saturates at `0xFFFF` for bodies larger than the
    /// 64 KiB address space (multi-page patterns).
    pub fn bsave(start: u16, body_len: usize) -> Self {
        let end = (start as usize).saturating_add(body_len).min(u16::MAX as usize) as u16;
        Header::Bsave {
            start,
            end,
            exec: 0,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match *self {
            Header::Bsave { start, end, exec } => {
                let mut out = Vec::with_capacity(7);
                out.push(BSAVE_MAGIC);
                out.extend_from_slice(&start.to_le_bytes());
                out.extend_from_slice(&end.to_le_bytes());
                out.extend_from_slice(&exec.to_le_bytes());
                out
            }
            Header::CopyDims { width, height } => {
                let mut out = Vec::with_capacity(4);
                out.extend_from_slice(&width.to_le_bytes());
                out.extend_from_slice(&height.to_le_bytes());
                out
            }
        }
    }

    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            Header::Bsave { .. } => 7,
            Header::CopyDims { .. } => 4,
        }
    }
}

/// One output file: extension, optional header and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    extension: &'static str,
    header: Option<Header>,
    body: Vec<u8>,
}

impl Segment {
    pub fn new(extension: &'static str, header: Option<Header>, body: Vec<u8>) -> Self {
        Self {
            extension,
            header,
            body,
        }
    }

    /// Upper-case file extension without the dot, e.g. `"SC5"`.
    #[inline]
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    #[inline]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Payload without the header.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Header bytes followed by the body, as written to disk.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        if let Some(header) = &self.header {
            out.extend_from_slice(&header.to_bytes());
        }
        out.extend_from_slice(&self.body);
        out
    }

    /// File size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.header.map_or(0, |h| h.len()) + self.body.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
