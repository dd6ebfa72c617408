//! Python bindings for meaning core using PyO3

use pyo3::prelude::*;
use pyo3::types::PyDict;
use crate::analyser::analyse;
use crate::config::AnalyserConfig;
use crate::grammar::{GrammarTag, Phrase};
use crate::notions::Meaning;
use serde_json;

fn value_error(message: String) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(message)
}

/// Build the tagged stream from (tag, text) pairs as produced by the
/// tokenizer layer on the Python side.
fn build_stream(segments: &[(String, String)]) -> PyResult<Vec<Phrase>> {
    let mut stream = Vec::with_capacity(segments.len());
    let mut position = 0;
    for (tag_name, text) in segments {
        let tag = GrammarTag::parse(tag_name)
            .ok_or_else(|| value_error(format!("Unknown grammar tag: {}", tag_name)))?;
        let phrase = Phrase::from_text(tag, text, position);
        position += phrase.words.len();
        stream.push(phrase);
    }
    Ok(stream)
}

fn meaning_to_dict<'py>(meaning: &Meaning, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("type", meaning.kind.name())?;
    if let Some(subject) = &meaning.subject {
        dict.set_item("subject", subject.to_string())?;
    }
    if let Some(action) = &meaning.action {
        dict.set_item("action", action.to_string())?;
    }
    if let Some(item) = &meaning.item {
        dict.set_item("item", item.to_string())?;
    }
    if let Some(target) = &meaning.target {
        dict.set_item("target", target.to_string())?;
    }
    if let Some(time) = &meaning.time {
        dict.set_item("time", time.to_string())?;
    }
    if let Some(location) = &meaning.location {
        dict.set_item("location", location.to_string())?;
    }
    if let Some(value) = &meaning.value {
        dict.set_item("value", value.to_string())?;
    }
    // Full record for consumers that want the typed fields
    let json = serde_json::to_string(meaning)
        .map_err(|e| value_error(format!("Failed to serialize meaning: {}", e)))?;
    dict.set_item("json", json)?;
    Ok(dict)
}

/// Analyse a tagged sentence with the builtin weight tables (Python function)
#[pyfunction]
pub fn py_analyse<'py>(
    segments: Vec<(String, String)>,
    py: Python<'py>,
) -> PyResult<Vec<Bound<'py, PyDict>>> {
    let config = AnalyserConfig::builtin();
    let meanings = analyse(build_stream(&segments)?, &config);
    meanings.iter().map(|m| meaning_to_dict(m, py)).collect()
}

/// Analyse a tagged sentence and return the meanings as one JSON array
#[pyfunction]
pub fn py_analyse_json(segments: Vec<(String, String)>) -> PyResult<String> {
    let config = AnalyserConfig::builtin();
    let meanings = analyse(build_stream(&segments)?, &config);
    serde_json::to_string(&meanings)
        .map_err(|e| value_error(format!("Failed to serialize meanings: {}", e)))
}

/// Python wrapper for the sentence analyser
#[pyclass]
pub struct PySentenceAnalyser {
    config: AnalyserConfig,
}

#[pymethods]
impl PySentenceAnalyser {
    /// Create an analyser, optionally from custom weight-table JSON.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => AnalyserConfig::from_json(json)
                .map_err(|e| value_error(format!("Invalid weight config: {}", e)))?,
            None => AnalyserConfig::builtin(),
        };
        Ok(Self { config })
    }

    /// Analyse one tagged sentence into a list of meaning dicts
    fn analyse<'py>(
        &self,
        segments: Vec<(String, String)>,
        py: Python<'py>,
    ) -> PyResult<Vec<Bound<'py, PyDict>>> {
        let meanings = analyse(build_stream(&segments)?, &self.config);
        meanings.iter().map(|m| meaning_to_dict(m, py)).collect()
    }

    /// Human-readable rendering, one block per meaning
    fn render(&self, segments: Vec<(String, String)>) -> PyResult<String> {
        let meanings = analyse(build_stream(&segments)?, &self.config);
        Ok(meanings
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
