//! Log callback hook.
//!
//! The tracker is meant to be embedded in an editor host, so it does not
//! pick a logging framework. Hosts that want visibility into tracker
//! activity (registrations, invalidations, buffer teardown) install a
//! process-wide callback and route messages into their own logs.

use std::sync::{Mutex, OnceLock};

/// Log level for tracker diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    let mut guard = log_callback().lock().expect("log callback lock");
    *guard = Some(Box::new(callback));
}

/// Emit a log message to the registered callback, if any.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_log_callback_receives_messages() {
        // The callback is process-wide and other tests emit too, so collect
        // everything and look for this test's own marker.
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        set_log_callback(move |level, msg| {
            seen_clone
                .lock()
                .expect("seen lock")
                .push((level, msg.to_string()));
        });

        emit_log(LogLevel::Info, "log hook marker 5580");

        let seen = seen.lock().expect("seen lock");
        assert!(
            seen.iter()
                .any(|(level, msg)| *level == LogLevel::Info && msg.contains("marker 5580"))
        );
    }
}
