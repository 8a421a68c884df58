use std::path::PathBuf;
use thiserror::Error;

/// Grounded on `examples/other_examples/.../santiago-MV-LC-3-VM`'s `Errors`
/// enum, the one LC-3 implementation in the corpus that models its error
/// kinds with `thiserror` rather than `Box<dyn Error>`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("lc3 [image-file1] ...")]
    Usage,

    #[error("failed to load image: {}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid opcode encountered")]
    InvalidOpcode,

    #[error("terminal I/O error")]
    HostIo(#[source] std::io::Error),
}

impl Error {
    /// Exit code for this error, per spec.md §6/§7.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage => 2,
            Error::ImageLoad { .. } => 1,
            Error::InvalidOpcode => 1,
            Error::HostIo(_) => 1,
        }
    }
}
