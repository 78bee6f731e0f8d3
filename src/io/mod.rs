pub mod output;
pub mod writers;

pub use output::{create_writer, OutputFormat, OutputWriter};

use crate::errors::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Buffered file at `path`, or stdout when no path is given.
pub fn open_destination(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = fs::File::create(path).map_err(|e| Error::file_system(path, e))?;
            Ok(Box::new(std::io::BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}
