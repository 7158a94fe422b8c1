use std::{env as stdenv, io::Write, path::Path};

use chrono::Local;
use colored::*;
use env_logger::{Builder, Env};
use log::{info, Level};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn binary_name() -> String {
    Path::new(&stdenv::args().next().unwrap_or_default())
        .file_name()
        .unwrap_or_default()
        .to_str()
        .unwrap_or_default()
        .to_owned()
}

fn colored_level(level: Level) -> ColoredString {
    match level {
        Level::Error => format!("{}", level).red(),
        Level::Warn => format!(" {}", level).yellow(),
        Level::Info => format!(" {}", level).green(),
        Level::Debug => format!("{}", level).blue(),
        Level::Trace => format!("{}", level).purple(),
    }
}

/// Installs the global logger. `RUST_LOG` overrides the `info` default; at
/// `trace` the name/timestamp prefix is dropped in favour of file:line.
pub fn setup_logger() {
    let tracing = matches!(stdenv::var("RUST_LOG"), Ok(val) if val.eq_ignore_ascii_case("trace"));
    let prefix = format!("{}_{}", binary_name(), VERSION);

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(move |buf, record| {
            let level = colored_level(record.level());
            if tracing {
                let file = record.file().unwrap_or("unknown");
                let line = record.line().unwrap_or(0);
                return writeln!(buf, "{}:{} {}: {}", file, line, level, record.args());
            }
            writeln!(
                buf,
                "[{} {}]{}: {}",
                prefix.dimmed(),
                Local::now().format("%Y%m%d %H:%M:%S").to_string().purple(),
                level,
                record.args()
            )
        })
        .init();
    info!("Logger initialized");
}
