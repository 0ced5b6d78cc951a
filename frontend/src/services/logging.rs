use log::{Level, LevelFilter, Log, Metadata, Record};

/// Console logger for the browser.
///
/// Installed once at startup as the `log` backend, so records emitted by the
/// shared crate end up in the developer console next to the component logs.
pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    pub fn init(level: LevelFilter) {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }

    pub fn debug_with_component(component: &str, message: &str) {
        log::debug!(target: component, "{}", message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{}", message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        log::warn!(target: component, "{}", message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        log::error!(target: component, "{}", message);
    }
}

fn format_line(record: &Record) -> String {
    format!("[{}] {}", record.target(), record.args())
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(record);
        match record.level() {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_includes_component() {
        let line = format_line(
            &Record::builder()
                .args(format_args!("saved {} classes", 4))
                .level(Level::Info)
                .target("attendance-modal")
                .build(),
        );
        assert_eq!(line, "[attendance-modal] saved 4 classes");
    }
}
