/// yEnc header from the `=ybegin` line
///
/// Every field is best-effort: a header with missing or garbled parameters
/// still starts decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YencHeader {
    /// Line length the encoder used (typically 128)
    pub line: Option<usize>,
    /// Total file size in bytes
    pub size: Option<u64>,
    /// Original filename (may contain spaces)
    pub name: Option<String>,
    /// Part number (for multi-part files)
    pub part: Option<u32>,
    /// Total number of parts (for multi-part files)
    pub total: Option<u32>,
}

/// Decoder progress through a yEnc body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YencState {
    /// No line seen yet; the next line must be `=ybegin`
    #[default]
    AwaitingHeader,
    /// Between `=ybegin` and `=yend`
    Decoding,
    /// `=yend` seen; no more payload
    Done,
}

/// What one input line turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YencStep {
    /// The `=ybegin` header line
    Header,
    /// A data line; the buffer now holds its decoded bytes
    Data,
    /// The `=yend` trailer, or any line after it
    End,
}
