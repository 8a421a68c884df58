mod bits;
mod config;
mod cpu;
mod error;
mod instruction;
mod loader;
mod memory;
mod opcode;
mod registers;
mod terminal;
mod trap;

pub use crate::config::Config;
pub use crate::cpu::{Cpu, ExecOutcome};
pub use crate::error::Error;
pub use crate::memory::{Memory, KBDR, KBSR};
pub use crate::registers::{Condition, Register, RegisterFile};
#[cfg(unix)]
pub use crate::terminal::PosixTerminal;
pub use crate::loader::load_image;
pub use crate::terminal::{ScriptedTerminal, TerminalHost};

/// Loads every image in `config.images` (in order, later images overwriting
/// earlier ones on overlap) and runs the resulting machine until HALT, an
/// invalid opcode, or `should_continue` returns `false`.
///
/// Grounded on `twe4ked-lc3/src/lib.rs`'s top-level `run(config) ->
/// Result<(), Box<dyn Error>>`, generalized to multiple images and a typed
/// `Error`.
pub fn run(
    config: Config,
    host: &mut dyn TerminalHost,
    should_continue: impl FnMut() -> bool,
) -> Result<(), Error> {
    let mut cpu = Cpu::new();

    for image in &config.images {
        loader::load_image(image, &mut cpu.memory)?;
    }

    cpu.run(host, should_continue)
}
