use core::fmt;

/// Log levels, ordered by increasing severity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[repr(u8)]
pub enum Level {
    /// Debug
    Debug = 0,
    /// Info
    Info,
    /// Warn
    Warn,
    /// Error
    Error,
    /// Fatal (a severity label only; nothing here exits the process)
    Fatal,
}

impl Level {
    /// The bracketed tag rendered at the start of every line.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Debug => "[DEBUG]",
            Self::Info => "[INFO]",
            Self::Warn => "[WARN]",
            Self::Error => "[ERROR]",
            Self::Fatal => "[FATAL]",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a level string is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLevelError;

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognized log level")
    }
}

impl std::error::Error for ParseLevelError {}

impl core::str::FromStr for Level {
    type Err = ParseLevelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("fatal") {
            Ok(Self::Fatal)
        } else {
            Err(ParseLevelError)
        }
    }
}

impl core::convert::TryFrom<&str> for Level {
    type Error = ParseLevelError;
    // Spelled out: `Self::Error` here is ambiguous with the `Error` variant.
    fn try_from(s: &str) -> Result<Self, ParseLevelError> {
        s.parse()
    }
}
