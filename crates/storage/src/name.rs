use std::fmt;

use crate::layout::NAME_SIZE;

/// Fixed 64 byte zero-padded identifier used by table and column records.
/// Longer strings are silently truncated at encode time; the string form
/// trims the trailing zero padding.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Name([u8; NAME_SIZE]);

impl Name {
    pub fn new(s: &str) -> Self {
        let mut buf = [0u8; NAME_SIZE];
        let raw = s.as_bytes();
        let len = raw.len().min(NAME_SIZE);
        buf[..len].copy_from_slice(&raw[..len]);
        Name(buf)
    }

    pub fn read(b: &[u8], offset: i64) -> Self {
        let start = offset as usize;
        let mut buf = [0u8; NAME_SIZE];
        buf.copy_from_slice(&b[start..start + NAME_SIZE]);
        Name(buf)
    }

    pub fn write_to(&self, b: &mut [u8], offset: i64) {
        let start = offset as usize;
        b[start..start + NAME_SIZE].copy_from_slice(&self.0);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.0.iter().rposition(|&x| x != 0).map_or(0, |i| i + 1);
        write!(f, "{}", String::from_utf8_lossy(&self.0[..end]))
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({self})")
    }
}
