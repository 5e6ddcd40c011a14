#![allow(dead_code, unused_imports)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use topodag_test_utils::builders::GraphBuilder;
pub use topodag_test_utils::{assert_topological, init_tracing, with_timeout};

/// Write `contents` to a fresh temporary file.
pub fn input_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp input");
    file.write_all(contents.as_bytes()).expect("write temp input");
    file.flush().expect("flush temp input");
    file
}
