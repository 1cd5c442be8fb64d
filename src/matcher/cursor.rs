//! Cursor abstractions for matching
//!
//! [`ValueCursor`] only ever moves forward over the value. [`OutputBuffer`] owns the canonical
//! output and refuses to grow past the capacity reserved for it.

use crate::context::Arena;
use crate::error::{Result, ToNumberError};

/// Forward-only position in the value text
#[derive(Debug)]
pub(crate) struct ValueCursor<'a> {
    bytes: &'a [u8],
    start: usize,
    pos: usize,
}

impl<'a> ValueCursor<'a> {
    /// Cursor over `value`, starting at byte `start`
    pub(crate) fn new(value: &'a str, start: usize) -> Self {
        let start = start.min(value.len());
        Self {
            bytes: value.as_bytes(),
            start,
            pos: start,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// First byte of the value after leading spaces
    pub(crate) fn first(&self) -> Option<u8> {
        self.bytes.get(self.start).copied()
    }

    /// Bytes from the current position to the end
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    /// Bytes from the start position to the end
    pub(crate) fn whole(&self) -> &'a [u8] {
        &self.bytes[self.start..]
    }

    pub(crate) fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    /// Consume `b` if it is next; returns whether it was
    pub(crate) fn skip_one(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a run of `b`
    pub(crate) fn skip_run(&mut self, b: u8) {
        while self.skip_one(b) {}
    }
}

/// Canonical output: a sign slot followed by digits and at most one point
#[derive(Debug)]
pub(crate) struct OutputBuffer {
    buf: Vec<u8>,
    limit: usize,
}

impl OutputBuffer {
    /// Sign slot written by every conversion
    pub(crate) const SIGN_PLACEHOLDER: u8 = b' ';

    /// Reserve room for the output of a value of `value_len` bytes: twice the length, plus
    /// the sign, the point and a terminator.
    pub(crate) fn for_value(arena: &Arena, value_len: usize) -> Result<Self> {
        let capacity = value_len
            .checked_mul(2)
            .and_then(|n| n.checked_add(3))
            .ok_or_else(|| ToNumberError::AllocationFailed("value too long".to_string()))?;
        let mut buf = arena.allocate::<u8>(capacity)?;
        buf.push(Self::SIGN_PLACEHOLDER);
        Ok(Self {
            buf,
            // the last byte stays free for the terminator
            limit: capacity - 1,
        })
    }

    pub(crate) fn push(&mut self, b: u8) -> Result<()> {
        if self.buf.len() >= self.limit {
            return Err(ToNumberError::AllocationFailed(format!(
                "output buffer overrun at {} bytes",
                self.limit
            )));
        }
        self.buf.push(b);
        Ok(())
    }

    pub(crate) fn last(&self) -> Option<u8> {
        self.buf.last().copied()
    }

    /// Number of bytes written, sign slot included
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    /// Reverse the bytes written since `from`
    pub(crate) fn reverse_from(&mut self, from: usize) {
        if from < self.buf.len() {
            self.buf[from..].reverse();
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf.into_iter().map(char::from).collect()
    }
}
