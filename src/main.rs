use lc3::{Config, Error, PosixTerminal, TerminalHost};
use std::env;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() {
    let config = match Config::from_args(env::args()) {
        Ok(config) => config,
        Err(Error::Usage) => {
            eprintln!("lc3 [image-file1] ...");
            process::exit(2);
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let mut host = PosixTerminal::new();
    if let Err(e) = host.enable_raw() {
        eprintln!("{e}");
        process::exit(1);
    }

    // Grounded on examples/other_examples/.../santiago-MV-LC-3-VM, which
    // pairs the `ctrlc` crate with a termios-based host for the same
    // SIGINT-restores-then-exits contract spec.md §5/§6 asks for.
    let interrupted = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&interrupted);
    let _ = ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
    });

    let result = lc3::run(config, &mut host, || !interrupted.load(Ordering::SeqCst));

    let _ = host.restore();

    if interrupted.load(Ordering::SeqCst) {
        println!();
        // spec.md §6 states exit code -2 literally; on POSIX a shell
        // observes this truncated to 254 (see DESIGN.md).
        process::exit(-2);
    }

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(e.exit_code());
    }
}
