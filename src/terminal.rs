//! The host keyboard/console, abstracted so the memory bus and CPU loop can
//! be driven by a scripted double in tests instead of a real terminal.

use crate::error::Error;

/// External collaborator the core VM consumes for all console I/O.
///
/// `enable_raw`/`restore` toggle line buffering and local echo; `restore`
/// must be idempotent, since it may run both from the normal shutdown path
/// and from a `Drop` impl or a signal handler.
pub trait TerminalHost {
    fn enable_raw(&mut self) -> Result<(), Error>;
    fn restore(&mut self) -> Result<(), Error>;
    fn key_ready(&mut self) -> bool;
    fn read_byte(&mut self) -> Result<u8, Error>;
    fn write_byte(&mut self, b: u8) -> Result<(), Error>;
    fn flush(&mut self) -> Result<(), Error>;
}

#[cfg(unix)]
mod posix {
    use super::*;
    use nix::sys::select::{select, FdSet};
    use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg, Termios};
    use nix::sys::time::{TimeVal, TimeValLike};
    use std::io::{self, Read, Write};
    use std::os::unix::io::RawFd;

    /// Raw-mode POSIX terminal, grounded on `twe4ked-lc3/src/main.rs`'s
    /// `disable_input_buffering` (via `nix::sys::termios`) and
    /// `twe4ked-lc3/src/state.rs`'s `check_key`/`get_char`.
    pub struct PosixTerminal {
        fd: RawFd,
        original: Option<Termios>,
    }

    impl PosixTerminal {
        pub fn new() -> Self {
            Self {
                fd: libc::STDIN_FILENO,
                original: None,
            }
        }
    }

    impl Default for PosixTerminal {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TerminalHost for PosixTerminal {
        fn enable_raw(&mut self) -> Result<(), Error> {
            let original = tcgetattr(self.fd).map_err(io_err)?;
            let mut raw = original.clone();
            raw.local_flags &= !(LocalFlags::ICANON | LocalFlags::ECHO);
            tcsetattr(self.fd, SetArg::TCSANOW, &raw).map_err(io_err)?;
            self.original = Some(original);
            Ok(())
        }

        fn restore(&mut self) -> Result<(), Error> {
            if let Some(original) = self.original.take() {
                tcsetattr(self.fd, SetArg::TCSANOW, &original).map_err(io_err)?;
            }
            Ok(())
        }

        fn key_ready(&mut self) -> bool {
            let mut readfds = FdSet::new();
            readfds.insert(self.fd);
            matches!(
                select(None, &mut readfds, None, None, &mut TimeVal::zero()),
                Ok(n) if n > 0
            )
        }

        fn read_byte(&mut self) -> Result<u8, Error> {
            let mut buffer = [0u8; 1];
            io::stdin().read_exact(&mut buffer).map_err(Error::HostIo)?;
            Ok(buffer[0])
        }

        fn write_byte(&mut self, b: u8) -> Result<(), Error> {
            io::stdout().write_all(&[b]).map_err(Error::HostIo)
        }

        fn flush(&mut self) -> Result<(), Error> {
            io::stdout().flush().map_err(Error::HostIo)
        }
    }

    impl Drop for PosixTerminal {
        fn drop(&mut self) {
            let _ = self.restore();
        }
    }

    fn io_err(e: nix::Error) -> Error {
        Error::HostIo(io::Error::new(io::ErrorKind::Other, e))
    }
}

#[cfg(unix)]
pub use posix::PosixTerminal;

/// A scripted keyboard for tests: feeds queued bytes and records output,
/// grounded on the design note in spec.md §9 ("inject into the memory bus
/// so tests can substitute a scripted keyboard").
#[derive(Default)]
pub struct ScriptedTerminal {
    pending: std::collections::VecDeque<u8>,
    pub output: Vec<u8>,
    raw: bool,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, b: u8) {
        self.pending.push_back(b);
    }
}

impl TerminalHost for ScriptedTerminal {
    fn enable_raw(&mut self) -> Result<(), Error> {
        self.raw = true;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), Error> {
        self.raw = false;
        Ok(())
    }

    fn key_ready(&mut self) -> bool {
        !self.pending.is_empty()
    }

    fn read_byte(&mut self) -> Result<u8, Error> {
        self.pending
            .pop_front()
            .ok_or_else(|| Error::HostIo(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no scripted key")))
    }

    fn write_byte(&mut self, b: u8) -> Result<(), Error> {
        self.output.push(b);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}
