pub(crate) struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let location = match (record.file(), record.line()) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            _ => record.target().to_string(),
        };
        eprintln!(
            "{level:<5} {location} > {args}",
            level = record.level(),
            args = record.args(),
        );
    }

    fn flush(&self) {}
}

impl Logger {
    pub(crate) fn init() {
        log::set_logger(&Logger).expect("could not set logger");
        log::set_max_level(log::LevelFilter::Debug);
    }
}
