//! Panic hook that puts the terminal back before the message is printed.

use super::setup::emergency_restore;
use std::panic;

/// Install the hook. Call before creating the `TerminalManager`.
///
/// The panic is also written to the log file, since the message printed to
/// the terminal may be lost when the alternate screen closes.
pub fn setup_panic_hook() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        tracing::error!(%location, "panic: {}", panic_message(info));
        emergency_restore();
        previous(info);
    }));
}

fn panic_message(info: &panic::PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}
