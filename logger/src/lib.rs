// Copyright(C) Mundis.
use {env_logger::Env, log::LevelFilter, std::io::Write};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the process-wide logger. Safe to call more than once; only the
/// first call takes effect.
pub fn setup() {
    setup_with_default(DEFAULT_FILTER);
}

pub fn setup_with_default(default_filter: &str) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5} {}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter_module("reqwest", LevelFilter::Warn)
        .filter_module("hyper", LevelFilter::Warn)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_twice_is_harmless() {
        setup();
        setup_with_default("debug");
        log::info!("logger initialized");
    }
}
