use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Writes every log line to a file and to the console.
struct Tee<F, C> {
    file: F,
    console: C,
}

impl<F: Write, C: Write> Write for Tee<F, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        self.console.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.console.flush()
    }
}

/// Install the global logger.
///
/// Lines look like `2025-01-01T10:00:00Z [INFO] message`. The level comes
/// from `RUST_LOG` and defaults to `info`. Lines go to stderr and, with
/// `file` set, are appended there too.
pub fn init(file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}",
            buf.timestamp(),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = file {
        let sink = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(Tee {
            file: sink,
            console: io::stderr(),
        })));
    }

    builder.try_init().context("installing logger")?;
    Ok(())
}
