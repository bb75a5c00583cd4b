use crate::error::WireError;
use crate::name::Name;
use std::collections::HashMap;

/// Accumulates the bytes of an outgoing message. Owns the compression
/// map (suffix → offset); supports `reserve`/`release_reserved` so
/// callers can hold back space for a trailing OPT/TSIG record, and
/// `rollback` so truncation handling can drop back to the last section
/// boundary (spec §4.6, §4.5). Section RR counts live on the message
/// header, not here.
pub struct Renderer {
    buf: Vec<u8>,
    /// Name suffix (its canonical bytes) → the wire offset where that
    /// exact suffix was first emitted.
    compress: HashMap<Vec<u8>, u16>,
    reserved: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            buf: Vec::new(),
            compress: HashMap::new(),
            reserved: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Hold back `n` bytes of budget against an external `max_size`
    /// check (the caller compares `len() + reserved` itself); the bytes
    /// are not physically written here.
    pub fn reserve(&mut self, n: usize) {
        self.reserved += n;
    }

    pub fn release_reserved(&mut self) {
        self.reserved = 0;
    }

    pub fn reserved(&self) -> usize {
        self.reserved
    }

    pub fn write_bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Overwrite the two bytes at `offset` (used to backfill an
    /// rdlength once the rdata it covers has been written).
    pub fn patch_u16(&mut self, offset: usize, v: u16) {
        self.buf[offset..offset + 2].copy_from_slice(&v.to_be_bytes());
    }

    /// Truncate the buffer back to `offset` and purge every compression
    /// table entry that points past it (spec §4.6 `_rollback`).
    pub fn rollback(&mut self, offset: usize) {
        self.buf.truncate(offset);
        self.compress.retain(|_, &mut off| (off as usize) < offset);
    }

    /// Write a name, optionally compressing against previously emitted
    /// absolute-name suffixes. Errors if the resulting message would
    /// place a name past the 14-bit pointer range (we simply stop
    /// compressing once offsets exceed it, per common practice, rather
    /// than fail — matching RFC 1035's "first 16384 bytes" carve-out).
    pub fn write_name(&mut self, name: &Name, compress: bool) -> Result<(), WireError> {
        if !compress {
            self.write_name_uncompressed(name);
            return Ok(());
        }

        let labels: Vec<&[u8]> = name.labels().collect();
        for i in 0..=labels.len() {
            let suffix_canon = Self::suffix_canonical(name, i);
            if let Some(&offset) = self.compress.get(&suffix_canon) {
                // Emit the non-matched prefix labels literally, then a pointer.
                for label in &labels[..i] {
                    self.write_label(label);
                }
                let ptr = 0xC000u16 | offset;
                self.write_u16(ptr);
                self.record_suffixes(name, 0, i, &labels);
                return Ok(());
            }
        }
        // No suffix matched at all (including the root): write in full.
        self.write_name_uncompressed(name);
        self.record_suffixes(name, 0, labels.len(), &labels);
        Ok(())
    }

    fn write_label(&mut self, label: &[u8]) {
        self.buf.push(label.len() as u8);
        self.buf.extend_from_slice(label);
    }

    fn write_name_uncompressed(&mut self, name: &Name) {
        for label in name.labels() {
            self.write_label(label);
        }
        self.buf.push(0);
    }

    /// Canonical (lower-cased) bytes of the suffix starting at label
    /// index `i` (0 = whole name, len = root only).
    fn suffix_canonical(name: &Name, i: usize) -> Vec<u8> {
        let labels: Vec<&[u8]> = name.labels().collect();
        let mut out = Vec::new();
        for label in &labels[i..] {
            out.push(label.len() as u8);
            out.extend(label.iter().map(|b| {
                if b.is_ascii_uppercase() {
                    b + 32
                } else {
                    *b
                }
            }));
        }
        out.push(0);
        out
    }

    /// Record every suffix of `name` from label index `start..end` at
    /// the offset it was actually written, so later names can compress
    /// against them too. Offsets beyond the 14-bit pointer space are
    /// simply not recorded (never compressed against).
    fn record_suffixes(&mut self, name: &Name, start: usize, end: usize, labels: &[&[u8]]) {
        let mut offset = self.name_write_start(labels, end);
        for i in start..end {
            if offset <= 0x3FFF {
                let key = Self::suffix_canonical(name, i);
                self.compress.entry(key).or_insert(offset as u16);
            }
            offset += 1 + labels[i].len();
        }
    }

    fn name_write_start(&self, labels: &[&[u8]], end: usize) -> usize {
        // Offset of the start of the name's written bytes is simply
        // `len()` minus however many bytes were just written for the
        // full label run [0..end) + terminator/pointer. Since we always
        // call this immediately after writing, recompute from current
        // position.
        let written: usize = labels[..end].iter().map(|l| 1 + l.len()).sum::<usize>()
            + if end == labels.len() { 1 } else { 2 };
        self.buf.len() - written
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_uncompressed_name() {
        let mut r = Renderer::new();
        let n = Name::from_text("www.example.com.").unwrap();
        r.write_name(&n, false).unwrap();
        assert_eq!(r.bytes(), &[3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0]);
    }

    #[test]
    fn compresses_repeated_suffix() {
        let mut r = Renderer::new();
        let a = Name::from_text("example.com.").unwrap();
        let b = Name::from_text("www.example.com.").unwrap();
        r.write_name(&a, true).unwrap();
        let second_start = r.len();
        r.write_name(&b, true).unwrap();
        // second name should be shorter than its uncompressed encoding (17 bytes)
        assert!(r.len() - second_start < 17);
        // last two bytes of output are a pointer back to offset 0
        let bytes = r.bytes();
        let ptr = u16::from_be_bytes([bytes[bytes.len() - 2], bytes[bytes.len() - 1]]);
        assert_eq!(ptr & 0xC000, 0xC000);
        assert_eq!(ptr & 0x3FFF, 0);
    }

    #[test]
    fn rollback_purges_compression_entries() {
        let mut r = Renderer::new();
        let a = Name::from_text("example.com.").unwrap();
        r.write_name(&a, true).unwrap();
        let checkpoint = r.len();
        let b = Name::from_text("other.example.com.").unwrap();
        r.write_name(&b, true).unwrap();
        r.rollback(checkpoint);
        assert_eq!(r.len(), checkpoint);
    }
}
