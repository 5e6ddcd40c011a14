// src/output.rs

//! Writing a computed order in the text result format:
//!
//! ```text
//! <node count>
//! <node>
//! ...
//! -1
//! ```
//!
//! The closing `-1` has no trailing newline.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::{Result, TopoError};
use crate::graph::loader::SENTINEL;
use crate::graph::NodeIndex;

/// Serialize `order` into `writer` and flush it.
pub fn write_order(mut writer: impl Write, order: &[NodeIndex]) -> Result<()> {
    writeln!(writer, "{}", order.len())?;
    for node in order {
        writeln!(writer, "{node}")?;
    }
    write!(writer, "{SENTINEL}")?;
    writer.flush()?;
    Ok(())
}

/// Write `order` into an already opened output file.
pub fn write_order_to_file(file: File, path: &Path, order: &[NodeIndex]) -> Result<()> {
    write_order(BufWriter::new(file), order).map_err(|err| match err {
        TopoError::Io(source) => TopoError::file(path, source),
        other => other,
    })
}

/// Create (or truncate) `path` and write `order` into it.
pub fn write_order_to_path(path: impl AsRef<Path>, order: &[NodeIndex]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| TopoError::file(path, e))?;
    write_order_to_file(file, path, order)
}
