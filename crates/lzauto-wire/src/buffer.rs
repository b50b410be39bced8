/// Input cursor shared between the caller, the dispatcher and a delegate.
///
/// The caller owns the slice; `pos` is how far decoding has consumed it.
/// Whoever holds the `&mut InBuf` is the only party allowed to move the
/// cursor, which is what keeps the dispatcher and its delegate from
/// ever reading the same bytes twice.
///
/// ```text
///   buf: [ consumed ........ | unread ............ ]
///          0                pos                   len
/// ```
#[derive(Clone, Copy, Debug)]
pub struct InBuf<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> InBuf<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Resume from a position saved by an earlier call.
    ///
    /// `pos` is clamped to the slice length.
    pub fn with_pos(buf: &'a [u8], pos: usize) -> Self {
        Self {
            buf,
            pos: pos.min(buf.len()),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Next unread byte, without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    pub fn unread(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Consume and return up to `n` bytes.
    pub fn take(&mut self, n: usize) -> &'a [u8] {
        let end = self.pos + n.min(self.remaining());
        let taken = &self.buf[self.pos..end];
        self.pos = end;
        taken
    }

    /// Consume one byte.
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }
}

/// Output cursor: a caller-owned slice plus how much of it is filled.
#[derive(Debug)]
pub struct OutBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> OutBuf<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn with_pos(buf: &'a mut [u8], pos: usize) -> Self {
        let pos = pos.min(buf.len());
        Self { buf, pos }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Free space left.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_full(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Copy as much of `data` as fits. Returns the number of bytes written.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.remaining());
        self.buf[self.pos..self.pos + n].copy_from_slice(&data[..n]);
        self.pos += n;
        n
    }

    /// The filled part of the buffer.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}
