//! # Console Output and Logging
//!
//! The board's UART/framebuffer console is external; the crate only needs a
//! place to send text. A backend installs a sink with [`set_console`], after
//! which both [`println!`](crate::println) and the `log` facade write to it.
//!
//! ## Usage
//!
//! ```ignore
//! ps2_input::core::console::set_console(uart_putstr);
//! ps2_input::core::console::init_logger(LevelFilter::Info)?;
//!
//! log::info!("keyboard ready");
//! ps2_input::println!("> ");
//! ```
//!
//! The logger never waits for the sink lock: a record emitted from interrupt
//! context while the foreground is mid-write is dropped rather than deadlocking
//! the core.

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

static SINK: Mutex<Option<fn(&str)>> = Mutex::new(None);

static CURRENT_LOG_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Info as usize);

// =============================================================================
// CONSOLE SINK
// =============================================================================

/// Install the function that puts text on the console.
pub fn set_console(sink: fn(&str)) {
    *SINK.lock() = Some(sink);
}

/// Detach the console; later output is discarded.
pub fn clear_console() {
    *SINK.lock() = None;
}

pub fn has_console() -> bool {
    SINK.lock().is_some()
}

/// `fmt::Write` adapter over the installed sink.
pub struct Console;

impl Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let sink = *SINK.lock();
        if let Some(sink) = sink {
            sink(s);
        }
        Ok(())
    }
}

#[doc(hidden)]
pub fn _print(args: fmt::Arguments<'_>) {
    let _ = Console.write_fmt(args);
}

#[macro_export]
macro_rules! println {
    () => {
        $crate::core::console::_print(::core::format_args!("\n"))
    };
    ($($arg:tt)*) => {{
        $crate::core::console::_print(::core::format_args!($($arg)*));
        $crate::core::console::_print(::core::format_args!("\n"));
    }};
}

// =============================================================================
// LOGGER
// =============================================================================

struct ConsoleLogger;

impl ConsoleLogger {
    fn level_prefix(level: Level) -> &'static str {
        match level {
            Level::Error => "[ERROR] ",
            Level::Warn => "[WARN]  ",
            Level::Info => "[INFO]  ",
            Level::Debug => "[DEBUG] ",
            Level::Trace => "[TRACE] ",
        }
    }
}

struct SinkWriter(fn(&str));

impl Write for SinkWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        (self.0)(s);
        Ok(())
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= current_log_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let sink = match SINK.try_lock() {
            Some(guard) => *guard,
            None => return,
        };
        let Some(sink) = sink else {
            return;
        };

        let mut out = SinkWriter(sink);
        let _ = out.write_str(Self::level_prefix(record.level()));
        if let Some(module) = record.module_path() {
            let _ = write!(out, "[{}] ", module);
        }
        let _ = writeln!(out, "{}", record.args());
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route the `log` facade to the console at `level`.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    set_log_level(level);
    Ok(())
}

pub fn set_log_level(level: LevelFilter) {
    CURRENT_LOG_LEVEL.store(level as usize, Ordering::SeqCst);
    log::set_max_level(level);
}

pub fn current_log_level() -> LevelFilter {
    LevelFilter::iter()
        .nth(CURRENT_LOG_LEVEL.load(Ordering::Relaxed))
        .unwrap_or(LevelFilter::Info)
}
