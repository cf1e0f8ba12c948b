// logging.rs

use chrono::Local;
use colored::*;
use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Logger {
    debug_enabled: AtomicBool,
}

impl Logger {
    fn new() -> Self {
        // DEBUG=1 in the environment enables debug output before the config
        // file is even loaded.
        let from_env = std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false);
        Self {
            debug_enabled: AtomicBool::new(from_env),
        }
    }

    fn emit(&self, level: ColoredString, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        println!("[{}] {} {}", timestamp, level, message);
    }
}

lazy_static! {
    static ref LOGGER: Logger = Logger::new();
}

/// Applies the configured debug flag. Overrides the DEBUG env variable.
pub fn init(debug: bool) {
    LOGGER.debug_enabled.store(debug, Ordering::Relaxed);
}

pub fn debug(message: &str) {
    if LOGGER.debug_enabled.load(Ordering::Relaxed) {
        LOGGER.emit("DEBUG".blue(), message);
    }
}

pub fn info(message: &str) {
    LOGGER.emit("INFO".green(), message);
}

pub fn warn(message: &str) {
    LOGGER.emit("WARN".yellow(), message);
}

pub fn error(message: &str) {
    LOGGER.emit("ERROR".red(), message);
}
