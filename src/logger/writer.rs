//! Process-wide log sinks
//!
//! Two streams: `out` carries info, debug and access lines, `err` carries
//! warnings and errors. Each goes to a file when configured, else to the
//! matching standard stream.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use super::LogLevel;

static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Out,
    Err,
}

enum Sink {
    Console(Stream),
    File(Mutex<File>),
}

impl Sink {
    fn open(path: Option<&str>, console: Stream) -> io::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::Console(console));
        };
        if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::File(Mutex::new(file)))
    }

    fn write_line(&self, line: &str) {
        match self {
            Self::Console(Stream::Out) => println!("{line}"),
            Self::Console(Stream::Err) => eprintln!("{line}"),
            Self::File(file) => {
                // A poisoned lock or full disk drops the line
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{line}");
                }
            }
        }
    }
}

pub struct LogWriter {
    level: LogLevel,
    out: Sink,
    err: Sink,
}

impl LogWriter {
    fn open(level: LogLevel, out_file: Option<&str>, err_file: Option<&str>) -> io::Result<Self> {
        Ok(Self {
            level,
            out: Sink::open(out_file, Stream::Out)?,
            err: Sink::open(err_file, Stream::Err)?,
        })
    }

    pub const fn level(&self) -> LogLevel {
        self.level
    }

    pub fn write(&self, stream: Stream, line: &str) {
        match stream {
            Stream::Out => self.out.write_line(line),
            Stream::Err => self.err.write_line(line),
        }
    }
}

/// Install the global writer; a second call fails with `AlreadyExists`
pub fn init(level: LogLevel, out_file: Option<&str>, err_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::open(level, out_file, err_file)?;
    LOG_WRITER
        .set(writer)
        .map_err(|_| io::Error::new(io::ErrorKind::AlreadyExists, "logger already initialized"))
}

pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}
