//! Logging setup and solver diagnostics.

use lpbridge_highs::highs_version;
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::PyObject;

const TRACE_VAR: &str = "LPBRIDGE_TRACE";
const FORMAT_VAR: &str = "LPBRIDGE_LOG_FORMAT";
const FILE_VAR: &str = "LPBRIDGE_LOG_FILE";

#[derive(Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_env() -> PyResult<Self> {
        match env::var(FORMAT_VAR) {
            Err(_) => Ok(LogFormat::Pretty),
            Ok(value) if value.eq_ignore_ascii_case("pretty") => Ok(LogFormat::Pretty),
            Ok(value) if value.eq_ignore_ascii_case("json") => Ok(LogFormat::Json),
            Ok(value) => Err(PyRuntimeError::new_err(format!(
                "Invalid {FORMAT_VAR} '{value}' (expected 'json' or 'pretty')"
            ))),
        }
    }
}

fn open_log_file(path: &str) -> PyResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| PyRuntimeError::new_err(format!("Failed to open log file: {err}")))
}

fn build_filter(level: Option<String>) -> PyResult<EnvFilter> {
    let level = level
        .or_else(|| env::var(TRACE_VAR).ok())
        .unwrap_or_else(|| "off".to_string());
    if level.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
    }
    EnvFilter::try_new(&level)
        .map_err(|err| PyRuntimeError::new_err(format!("Invalid log filter: {err}")))
}

/// Enable structured logging for lpbridge.
///
/// When `level` is None, `LPBRIDGE_TRACE` is read; unset means `off`.
/// `LPBRIDGE_LOG_FORMAT` picks `pretty` (default) or `json`, and
/// `LPBRIDGE_LOG_FILE` adds a second sink. Returns False if a subscriber
/// is already installed.
#[pyfunction]
#[pyo3(signature = (*, level=None))]
pub fn enable_logging(level: Option<String>) -> PyResult<bool> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = build_filter(level)?;
    let format = LogFormat::from_env()?;
    let file = env::var(FILE_VAR)
        .ok()
        .map(|path| open_log_file(&path))
        .transpose()?;
    let json = format == LogFormat::Json;

    let stderr_json = json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json()
    });
    let stderr_pretty = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .pretty()
    });
    let (file_json, file_pretty) = match file {
        Some(file) if json => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .json(),
            ),
            None,
        ),
        Some(file) => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .pretty(),
            ),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_json)
        .with(stderr_pretty)
        .with(file_json)
        .with(file_pretty)
        .try_init()
        .map_err(|err| PyRuntimeError::new_err(format!("Failed to initialize logging: {err}")))?;

    Ok(true)
}

/// Engine name and version.
#[pyfunction]
pub fn solver_info(py: Python<'_>) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("solver", "HiGHS")?;
    dict.set_item("version", highs_version())?;
    dict.set_item("modes", ["primal", "dual", "barrier"])?;
    Ok(dict.unbind().into())
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(pyo3::wrap_pyfunction!(enable_logging, m)?)?;
    m.add_function(pyo3::wrap_pyfunction!(solver_info, m)?)?;
    Ok(())
}
