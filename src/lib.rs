//! Meaning core - Rust implementation of the sentence meaning pipeline
//!
//! This crate turns one grammatically tagged sentence into an ordered set of
//! structured Meaning records: weighted noun-phrase categorization, notion
//! extraction and clause splitting over a cursor-driven scan.

pub mod grammar;
pub mod balance;
pub mod config;
pub mod reader;
pub mod notions;
pub mod analyser;

pub use grammar::*;
pub use balance::*;
pub use config::*;
pub use reader::*;
pub use notions::*;
pub use analyser::*;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn meaning_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PySentenceAnalyser>()?;
    m.add_function(wrap_pyfunction!(py_analyse, m)?)?;
    m.add_function(wrap_pyfunction!(py_analyse_json, m)?)?;
    Ok(())
}
