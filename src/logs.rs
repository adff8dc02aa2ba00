//! Console progress reporting for the batch run.
//!
//! Plain leveled printing; progress lines are for humans watching the
//! run, not for machines, and are not persisted anywhere.

/// Log level for console display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Print a single log line with its level prefix.
pub fn log(level: LogLevel, message: impl AsRef<str>) {
    let message = message.as_ref();
    match level {
        LogLevel::Info => println!("{message}"),
        LogLevel::Success => println!("✓ {message}"),
        LogLevel::Warning => println!("⚠️  {message}"),
        LogLevel::Error => eprintln!("❌ {message}"),
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl AsRef<str>) {
    log(LogLevel::Info, msg);
}

pub fn log_success(msg: impl AsRef<str>) {
    log(LogLevel::Success, msg);
}

pub fn log_warning(msg: impl AsRef<str>) {
    log(LogLevel::Warning, msg);
}

pub fn log_error(msg: impl AsRef<str>) {
    log(LogLevel::Error, msg);
}
