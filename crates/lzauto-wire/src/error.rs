/// Errors shared by the dispatcher and every delegate decoder.
///
/// The dispatcher and the decoders it selects speak one result
/// vocabulary, so a delegate's error can be handed back to the caller
/// untouched. Only `Options`, `Memory`, `Data` and `Prog` are ever
/// produced by the dispatcher itself; the rest are forwarded from a
/// delegate.
///
/// ```text
///   CodecError
///   ├── Options       ← unrecognized flag bit, or options a decoder rejects
///   ├── Memory        ← decoder state could not be allocated
///   ├── MemLimit      ← decoding would exceed the configured memory limit
///   ├── Format        ← input is not in a format the decoder understands
///   ├── Data          ← corrupt input, or trailing bytes after the last unit
///   ├── Buf           ← no progress possible with the given buffers
///   └── Prog          ← internal invariant violated, or use after an error
/// ```
///
/// Every variant is fatal for the current stream. Recovery means
/// reinitializing the decoder.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A flag outside the recognized set was supplied.
    #[error("unsupported decoder flags: {flags:#04X}")]
    Options { flags: u32 },

    /// A delegate decoder could not be created.
    #[error("cannot allocate decoder state")]
    Memory,

    /// The delegate needs more memory than `memlimit` allows.
    #[error("memory usage limit of {limit} bytes reached")]
    MemLimit { limit: u64 },

    /// The delegate did not recognize the stream.
    #[error("file format not recognized")]
    Format,

    /// Corrupt input.
    ///
    /// The dispatcher raises this when input remains after the last
    /// unit of a concatenated stream; `trailing` counts the unconsumed
    /// bytes visible in the current input buffer. Delegates report
    /// `trailing: 0`.
    #[error("compressed data is corrupt")]
    Data { trailing: usize },

    /// Neither input nor output could make progress.
    #[error("no progress is possible")]
    Buf,

    /// The decoder was driven in a way its state machine forbids.
    #[error("programming error: {0}")]
    Prog(&'static str),
}

impl CodecError {
    /// Shorthand for a corrupt-data error that carries no trailing count.
    pub fn corrupt() -> Self {
        Self::Data { trailing: 0 }
    }
}
