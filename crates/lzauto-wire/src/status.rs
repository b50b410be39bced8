/// What the caller is telling the decoder about its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// More input may follow.
    Run,
    /// The input supplied so far (plus anything in this call) is all
    /// there is.
    Finish,
}

/// Non-error outcome of one `advance` call.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────────┐
/// │ Status           │ Meaning                                          │
/// ├──────────────────┼──────────────────────────────────────────────────┤
/// │ Ok               │ Progress made or more input/output space needed  │
/// │ StreamEnd        │ The logical stream is completely decoded         │
/// │ NoCheck          │ Advisory: the stream carries no integrity check  │
/// │ UnsupportedCheck │ Advisory: the check kind cannot be verified      │
/// │ GetCheck         │ Advisory: the check kind can now be queried      │
/// └──────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// The three advisories are returned at most once per stream, and only
/// when the matching `DecoderFlags` bit asked for them. Decoding resumes
/// normally on the next call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    StreamEnd,
    NoCheck,
    UnsupportedCheck,
    GetCheck,
}

impl Status {
    pub fn is_advisory(self) -> bool {
        matches!(self, Self::NoCheck | Self::UnsupportedCheck | Self::GetCheck)
    }
}
