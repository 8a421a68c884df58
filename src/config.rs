use crate::error::Error;
use clap::{App, Arg};
use std::path::PathBuf;

/// Parsed command line: one or more image paths, per spec.md §6
/// (`lc3 IMAGE [IMAGE ...]`). Grounded on `twe4ked-lc3/src/main.rs`'s use of
/// `clap::{App, Arg}` and `twe4ked-lc3/src/config.rs`'s `Config` struct,
/// generalized from a single required positional to a `Vec<PathBuf>`.
#[derive(Debug, PartialEq, Eq)]
pub struct Config {
    pub images: Vec<PathBuf>,
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Config, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = App::new("LC-3 VM")
            .arg(
                Arg::with_name("IMAGE")
                    .help("One or more LC-3 object image files to load and run.")
                    .required(false)
                    .multiple(true)
                    .index(1),
            )
            .get_matches_from_safe(args)
            .map_err(|_| Error::Usage)?;

        let images: Vec<PathBuf> = matches
            .values_of("IMAGE")
            .map(|vals| vals.map(PathBuf::from).collect())
            .unwrap_or_default();

        if images.is_empty() {
            return Err(Error::Usage);
        }

        Ok(Config { images })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_image() {
        let config = Config::from_args(["lc3", "program.obj"]).unwrap();
        assert_eq!(config.images, vec![PathBuf::from("program.obj")]);
    }

    #[test]
    fn multiple_images_preserve_order() {
        let config = Config::from_args(["lc3", "a.obj", "b.obj"]).unwrap();
        assert_eq!(
            config.images,
            vec![PathBuf::from("a.obj"), PathBuf::from("b.obj")]
        );
    }

    #[test]
    fn no_images_is_usage_error() {
        assert!(matches!(Config::from_args(["lc3"]), Err(Error::Usage)));
    }
}
