//! Core utilities and shared types
//!
//! This module contains shared utilities used across the application.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Set to any value to print long output directly instead of paging it
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this
/// wrapper adapts it for commands that produce long output.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn into_pager(self) -> Pager {
        self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Destination of command output: the pager on a terminal, stdout otherwise
pub enum Output {
    Pager(PagerWriter),
    Stdout(io::Stdout),
}

impl Output {
    pub fn stdout() -> Self {
        Output::Stdout(io::stdout())
    }

    /// Page the output when stdout is a terminal and `NO_PAGER` is unset
    pub fn paged() -> Self {
        if std::env::var_os(NO_PAGER_ENV).is_none() && io::stdout().is_terminal() {
            Output::Pager(PagerWriter::new(Pager::new()))
        } else {
            Self::stdout()
        }
    }

    /// Flush stdout, or hand the collected text to the pager
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            Output::Pager(writer) => minus::page_all(writer.into_pager())?,
            Output::Stdout(mut stdout) => stdout.flush()?,
        }

        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Pager(writer) => writer.write(buf),
            Output::Stdout(stdout) => stdout.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Pager(writer) => writer.flush(),
            Output::Stdout(stdout) => stdout.flush(),
        }
    }
}
