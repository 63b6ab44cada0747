use core::fmt::{self, Write as _};
use core::ops;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex as StdMutex;

use time::OffsetDateTime;

use crate::Level;

// ===== Header flags =====

/// Bits or'ed together to select which header fields each line carries.
///
/// There is no control over the order the fields appear (the order listed
/// here) or their format. A colon-space follows the file and line:
///
/// ```text
/// [INFO] svc 2009/01/23 01:23:23.123123 /a/b/c/d.rs:23: message
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Flags(u32);

impl Flags {
    /// No header fields beyond the level tag and logger name.
    pub const NONE: Self = Self(0);
    /// The date: `2009/01/23`.
    pub const DATE: Self = Self(1);
    /// The time: `01:23:23`.
    pub const TIME: Self = Self(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Assumes `TIME`.
    pub const MICROSECONDS: Self = Self(1 << 2);
    /// Full file path and line number: `/a/b/c/d.rs:23`.
    pub const LONG_FILE: Self = Self(1 << 3);
    /// Final file path element and line number: `d.rs:23`. Overrides `LONG_FILE`.
    pub const SHORT_FILE: Self = Self(1 << 4);
    /// Initial flags for a new logger: date and time.
    pub const STANDARD: Self = Self(Self::DATE.0 | Self::TIME.0);

    /// Returns `true` if any bit of `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl ops::BitOr for Flags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Error returned when a flags string is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFlagsError;

impl fmt::Display for ParseFlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unrecognized header flags")
    }
}

impl std::error::Error for ParseFlagsError {}

impl core::str::FromStr for Flags {
    type Err = ParseFlagsError;

    /// Parses a comma-separated list: `date`, `time`, `microseconds`,
    /// `longfile`, `shortfile`, `standard`, `none`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::NONE;
        let mut seen = false;
        for tok in s.split(',') {
            let tok = tok.trim();
            if tok.is_empty() {
                continue;
            }
            seen = true;
            flags |= if tok.eq_ignore_ascii_case("date") {
                Self::DATE
            } else if tok.eq_ignore_ascii_case("time") {
                Self::TIME
            } else if tok.eq_ignore_ascii_case("microseconds") {
                Self::MICROSECONDS
            } else if tok.eq_ignore_ascii_case("longfile") {
                Self::LONG_FILE
            } else if tok.eq_ignore_ascii_case("shortfile") {
                Self::SHORT_FILE
            } else if tok.eq_ignore_ascii_case("standard") {
                Self::STANDARD
            } else if tok.eq_ignore_ascii_case("none") {
                Self::NONE
            } else {
                return Err(ParseFlagsError);
            };
        }
        if seen {
            Ok(flags)
        } else {
            Err(ParseFlagsError)
        }
    }
}

// ===== Caller location =====

/// A resolved caller location for the `file:line:` header field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallSite {
    /// Source file path as recorded by the compiler.
    pub file: &'static str,
    /// 1-based line number.
    pub line: u32,
}

impl CallSite {
    /// Captures the location of the nearest non-`#[track_caller]` caller.
    ///
    /// Every helper between the logging call site and this capture must be
    /// `#[track_caller]`, or the location will point at the wrong frame.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn here() -> Self {
        let loc = core::panic::Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

// ===== Target sink =====

/// Output target.
#[derive(Copy, Clone, Debug)]
pub enum Target {
    /// stdout
    Stdout,
    /// stderr
    Stderr,
    /// custom writer
    Writer,
}

struct Sink {
    target: Target,
    writer: Option<Box<dyn Write + Send>>,
}

impl Sink {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self.target {
            Target::Stdout => io::stdout().lock().write_all(bytes),
            Target::Stderr => io::stderr().lock().write_all(bytes),
            Target::Writer => match &mut self.writer {
                Some(w) => w.write_all(bytes),
                None => Ok(()), // no sink installed => drop the line
            },
        }
    }
}

// Scratch buffer and sink share one critical section; a line is assembled
// and written without releasing the lock, so writes never interleave.
struct Inner {
    buf: Vec<u8>,
    sink: Sink,
}

// ===== Logger =====

/// A named leveled logger writing formatted lines to a single sink.
///
/// Each logging operation makes a single `write_all` call on the sink; a
/// `Logger` can be shared across threads and serializes those writes.
/// `name`, `flags`, and the minimum level are fixed at construction.
pub struct Logger {
    name: String,
    flags: Flags,
    min_level: Level,
    inner: StdMutex<Inner>,
}

/// Cheap integer to fixed-width decimal ASCII. A width of zero or below
/// avoids zero-padding.
#[allow(clippy::cast_possible_truncation)]
fn itoa(buf: &mut Vec<u8>, mut u: u64, mut wid: i32) {
    if u == 0 && wid <= 1 {
        buf.push(b'0');
        return;
    }
    // Assemble decimal in reverse order.
    let mut tmp = [0u8; 32];
    let mut bp = tmp.len();
    while u > 0 || wid > 0 {
        bp -= 1;
        wid -= 1;
        tmp[bp] = b'0' + (u % 10) as u8;
        u /= 10;
    }
    buf.extend_from_slice(&tmp[bp..]);
}

impl Logger {
    /// Creates a logger with the default configuration: `Flags::STANDARD`,
    /// minimum level `Debug`, writing to stderr.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: Flags::STANDARD,
            min_level: Level::Debug,
            inner: StdMutex::new(Inner {
                buf: Vec::new(),
                sink: Sink {
                    target: Target::Stderr,
                    writer: None,
                },
            }),
        }
    }

    /// Creates a new [`LoggerBuilder`].
    #[inline]
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// The logger's name, included in every emitted line.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured header flags.
    #[inline]
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// The minimum severity this logger emits.
    #[inline]
    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    /// Returns `true` if a message at `level` would be emitted.
    #[inline]
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    // ===== Leveled entry points =====

    /// Log at DEBUG with a format template.
    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Debug, args);
    }
    /// Log at DEBUG, space-separating the given values.
    #[track_caller]
    pub fn debugln(&self, values: &[&dyn fmt::Display]) {
        self.logln(Level::Debug, values);
    }
    /// Log at INFO with a format template.
    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Info, args);
    }
    /// Log at INFO, space-separating the given values.
    #[track_caller]
    pub fn infoln(&self, values: &[&dyn fmt::Display]) {
        self.logln(Level::Info, values);
    }
    /// Log at WARN with a format template.
    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Warn, args);
    }
    /// Log at WARN, space-separating the given values.
    #[track_caller]
    pub fn warnln(&self, values: &[&dyn fmt::Display]) {
        self.logln(Level::Warn, values);
    }
    /// Log at ERROR with a format template.
    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Error, args);
    }
    /// Log at ERROR, space-separating the given values.
    #[track_caller]
    pub fn errorln(&self, values: &[&dyn fmt::Display]) {
        self.logln(Level::Error, values);
    }
    /// Log at FATAL with a format template. Purely a severity label; the
    /// process is not terminated.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Fatal, args);
    }
    /// Log at FATAL, space-separating the given values.
    #[track_caller]
    pub fn fatalln(&self, values: &[&dyn fmt::Display]) {
        self.logln(Level::Fatal, values);
    }

    // ===== Dispatch =====

    #[track_caller]
    fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        if level < self.min_level {
            return;
        }
        let site = self.caller_site();
        let prefix = format!("{} {}", level.tag(), self.name);
        let _ = self.output(site, &prefix, &args.to_string());
    }

    #[track_caller]
    fn logln(&self, level: Level, values: &[&dyn fmt::Display]) {
        if level < self.min_level {
            return;
        }
        let site = self.caller_site();
        let prefix = format!("{} {}", level.tag(), self.name);
        let mut body = String::new();
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                body.push(' ');
            }
            let _ = write!(body, "{v}");
        }
        body.push('\n');
        let _ = self.output(site, &prefix, &body);
    }

    // Location is only captured when a file flag asks for it; capture happens
    // before the write lock is taken.
    #[track_caller]
    fn caller_site(&self) -> Option<CallSite> {
        if self.flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
            Some(CallSite::here())
        } else {
            None
        }
    }

    // ===== Output =====

    /// Writes one logging event: header, body, and a trailing newline if the
    /// body does not already end in one, as a single write to the sink.
    ///
    /// `site` is only consulted when a file flag is set; `None` then renders
    /// the `???:0` sentinel. The leveled helpers discard the returned error;
    /// call this directly if write failures matter to you.
    ///
    /// # Errors
    /// Returns the sink's write error, if any.
    /// # Panics
    /// Panics if the write lock is poisoned.
    pub fn output(&self, site: Option<CallSite>, prefix: &str, body: &str) -> io::Result<()> {
        let now = OffsetDateTime::now_utc(); // stamp before waiting on the lock
        let mut inner = self.inner.lock().unwrap();
        let Inner { buf, sink } = &mut *inner;
        buf.clear();
        self.format_header(buf, now, site, prefix);
        buf.extend_from_slice(body.as_bytes());
        if !body.is_empty() && !body.ends_with('\n') {
            buf.push(b'\n');
        }
        sink.write_all(buf)
    }

    #[allow(clippy::cast_sign_loss)]
    fn format_header(
        &self,
        buf: &mut Vec<u8>,
        now: OffsetDateTime,
        site: Option<CallSite>,
        prefix: &str,
    ) {
        buf.extend_from_slice(prefix.as_bytes());
        buf.push(b' ');
        if self
            .flags
            .intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS)
        {
            if self.flags.intersects(Flags::DATE) {
                itoa(buf, now.year() as u64, 4);
                buf.push(b'/');
                itoa(buf, u64::from(u8::from(now.month())), 2);
                buf.push(b'/');
                itoa(buf, u64::from(now.day()), 2);
                buf.push(b' ');
            }
            if self.flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
                itoa(buf, u64::from(now.hour()), 2);
                buf.push(b':');
                itoa(buf, u64::from(now.minute()), 2);
                buf.push(b':');
                itoa(buf, u64::from(now.second()), 2);
                if self.flags.intersects(Flags::MICROSECONDS) {
                    buf.push(b'.');
                    itoa(buf, u64::from(now.microsecond()), 6);
                }
                buf.push(b' ');
            }
        }
        if self.flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
            let (file, line) = match site {
                Some(s) => (s.file, s.line),
                None => ("???", 0),
            };
            let file = if self.flags.intersects(Flags::SHORT_FILE) {
                match file.rfind('/') {
                    Some(i) if i > 0 => &file[i + 1..],
                    _ => file,
                }
            } else {
                file
            };
            buf.extend_from_slice(file.as_bytes());
            buf.push(b':');
            itoa(buf, u64::from(line), -1);
            buf.extend_from_slice(b": ");
        }
    }
}

// ===== Builder =====

/// Builder for [`Logger`].
pub struct LoggerBuilder {
    name: String,
    level: Level,
    flags: Flags,
    target: Target,
    writer: Option<Box<dyn Write + Send>>,
    file_path: Option<PathBuf>,
}

impl LoggerBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: Level::Debug,
            flags: Flags::STANDARD,
            target: Target::Stderr,
            writer: None,
            file_path: None,
        }
    }

    /// Set the minimum level.
    #[inline]
    #[must_use]
    pub const fn level(mut self, l: Level) -> Self {
        self.level = l;
        self
    }
    /// Set the header flags.
    #[inline]
    #[must_use]
    pub const fn flags(mut self, f: Flags) -> Self {
        self.flags = f;
        self
    }
    /// Set the output target.
    #[inline]
    #[must_use]
    pub const fn target(mut self, t: Target) -> Self {
        self.target = t;
        self
    }
    /// Set the output target to stdout.
    #[inline]
    #[must_use]
    pub const fn stdout(mut self) -> Self {
        self.target = Target::Stdout;
        self
    }
    /// Set the output target to stderr.
    #[inline]
    #[must_use]
    pub const fn stderr(mut self) -> Self {
        self.target = Target::Stderr;
        self
    }
    /// Set the output target to a custom writer.
    #[inline]
    #[must_use]
    pub fn writer(mut self, w: Box<dyn Write + Send>) -> Self {
        self.target = Target::Writer;
        self.writer = Some(w);
        self
    }
    /// Set the output target to a file (created if missing, appended to).
    #[inline]
    #[must_use]
    pub fn file(mut self, p: impl AsRef<std::path::Path>) -> Self {
        self.target = Target::Writer;
        self.file_path = Some(p.as_ref().to_owned());
        self
    }

    /// Apply environment overrides: `LINELOG_LEVEL` (a level name) and
    /// `LINELOG_FLAGS` (a comma-separated flag list). Unparseable values
    /// leave the builder untouched.
    #[must_use]
    pub fn env(mut self) -> Self {
        if let Ok(s) = std::env::var("LINELOG_LEVEL") {
            if let Ok(l) = s.parse() {
                self.level = l;
            }
        }
        if let Ok(s) = std::env::var("LINELOG_FLAGS") {
            if let Ok(f) = s.parse() {
                self.flags = f;
            }
        }
        self
    }

    /// Build the logger.
    /// # Errors
    /// Returns an error if a file target cannot be opened for writing.
    pub fn build(self) -> io::Result<Logger> {
        let writer = match (self.target, self.file_path) {
            (Target::Writer, Some(p)) => {
                let f = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(p)?;
                Some(Box::new(f) as Box<dyn Write + Send>)
            }
            _ => self.writer,
        };
        Ok(Logger {
            name: self.name,
            flags: self.flags,
            min_level: self.level,
            inner: StdMutex::new(Inner {
                buf: Vec::new(),
                sink: Sink {
                    target: self.target,
                    writer,
                },
            }),
        })
    }

    /// Build the logger and leak it, for a `&'static Logger`.
    /// # Errors
    /// Returns an error if a file target cannot be opened for writing.
    pub fn build_static(self) -> io::Result<&'static Logger> {
        Ok(Box::leak(Box::new(self.build()?)))
    }
}
