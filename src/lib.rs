#![warn(missing_docs, unsafe_code)]
//! A minimal leveled logging crate.
//!
//! A [`Logger`] carries a name, a set of header [`Flags`] (date, time,
//! microseconds, file:line), and a minimum [`Level`]; it formats each message
//! into a reusable scratch buffer and writes it to its sink in a single call,
//! serialized under one lock. Messages below the minimum level cost nothing
//! beyond the comparison.
//!
//! ```
//! use linelog::{infof, Flags, Level, Logger};
//!
//! let lg = Logger::builder("svc")
//!     .level(Level::Info)
//!     .flags(Flags::STANDARD | Flags::SHORT_FILE)
//!     .build()
//!     .unwrap();
//! infof!(&lg, "listening on {}", 8080);
//! ```

mod level;
mod logger;
mod registry;

pub use level::{Level, ParseLevelError};
pub use logger::{CallSite, Flags, Logger, LoggerBuilder, ParseFlagsError, Target};
pub use registry::Registry;

// ===== Macros (require a logger argument) ====================================
// Internal names re-exported below; import style: `use linelog::infof;
// infof!(&logger, "...");`.

#[macro_export]
/// Log at DEBUG with a format template.
macro_rules! __linelog_debugf { ($lg:expr, $($t:tt)+) => { ($lg).debugf(format_args!($($t)+)) } }
#[macro_export]
/// Log at INFO with a format template.
macro_rules! __linelog_infof { ($lg:expr, $($t:tt)+) => { ($lg).infof(format_args!($($t)+)) } }
#[macro_export]
/// Log at WARN with a format template.
macro_rules! __linelog_warnf { ($lg:expr, $($t:tt)+) => { ($lg).warnf(format_args!($($t)+)) } }
#[macro_export]
/// Log at ERROR with a format template.
macro_rules! __linelog_errorf { ($lg:expr, $($t:tt)+) => { ($lg).errorf(format_args!($($t)+)) } }
#[macro_export]
/// Log at FATAL with a format template.
macro_rules! __linelog_fatalf { ($lg:expr, $($t:tt)+) => { ($lg).fatalf(format_args!($($t)+)) } }

#[macro_export]
/// Log at DEBUG, space-separating the given values.
macro_rules! __linelog_debugln { ($lg:expr $(, $v:expr)* $(,)?) => { ($lg).debugln(&[$(&$v as &dyn core::fmt::Display),*]) } }
#[macro_export]
/// Log at INFO, space-separating the given values.
macro_rules! __linelog_infoln { ($lg:expr $(, $v:expr)* $(,)?) => { ($lg).infoln(&[$(&$v as &dyn core::fmt::Display),*]) } }
#[macro_export]
/// Log at WARN, space-separating the given values.
macro_rules! __linelog_warnln { ($lg:expr $(, $v:expr)* $(,)?) => { ($lg).warnln(&[$(&$v as &dyn core::fmt::Display),*]) } }
#[macro_export]
/// Log at ERROR, space-separating the given values.
macro_rules! __linelog_errorln { ($lg:expr $(, $v:expr)* $(,)?) => { ($lg).errorln(&[$(&$v as &dyn core::fmt::Display),*]) } }
#[macro_export]
/// Log at FATAL, space-separating the given values.
macro_rules! __linelog_fatalln { ($lg:expr $(, $v:expr)* $(,)?) => { ($lg).fatalln(&[$(&$v as &dyn core::fmt::Display),*]) } }

pub use crate::__linelog_debugf as debugf;
pub use crate::__linelog_debugln as debugln;
pub use crate::__linelog_errorf as errorf;
pub use crate::__linelog_errorln as errorln;
pub use crate::__linelog_fatalf as fatalf;
pub use crate::__linelog_fatalln as fatalln;
pub use crate::__linelog_infof as infof;
pub use crate::__linelog_infoln as infoln;
pub use crate::__linelog_warnf as warnf;
pub use crate::__linelog_warnln as warnln;
