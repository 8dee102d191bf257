//! Python bindings for the Streamlit dashboard.
//!
//! Available as the `netra_orb` Python module when built with the `python`
//! feature.
//!
//! ```python
//! import json, netra_orb
//!
//! report = json.loads(netra_orb.run_classification())
//! dash = netra_orb.FleetDashboard()
//! for card in dash.metric_cards(dash.satellites()[0]):
//!     print(card.label, card.value)
//! ```

use pyo3::exceptions::{PyFileNotFoundError, PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::core::error::PipelineError;
use crate::presentation::format::MetricCard;
use crate::presentation::images::{ImageCatalog, ImageRef};
use crate::preprocessing::pipeline::ClassificationPipeline;
use crate::services::fleet_view::FleetView;
use crate::transformations::filtering::ClassFilter;

fn to_py_err(err: PipelineError) -> PyErr {
    match err {
        PipelineError::NotFound { .. } => PyFileNotFoundError::new_err(err.to_string()),
        PipelineError::Schema(_) => PyValueError::new_err(err.to_string()),
        PipelineError::LookupMiss(id) => PyKeyError::new_err(id),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

fn load_config(config_path: Option<&str>) -> PyResult<PipelineConfig> {
    match config_path {
        Some(path) => PipelineConfig::from_file(path),
        None => PipelineConfig::load_or_default(),
    }
    .map_err(to_py_err)
}

/// Run the classification stage.
///
/// Args:
///     config_path: Optional path to a netra.toml; the default locations are
///         searched otherwise
///
/// Returns:
///     str: The run report as JSON
#[pyfunction]
#[pyo3(signature = (config_path=None))]
pub fn run_classification(config_path: Option<&str>) -> PyResult<String> {
    let config = load_config(config_path)?;
    let report = ClassificationPipeline::run_configured(&config).map_err(to_py_err)?;
    report
        .to_json()
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to serialize report: {}", e)))
}

/// One metric tile.
#[pyclass(name = "MetricCard", module = "netra_orb", get_all)]
#[derive(Debug, Clone)]
pub struct PyMetricCard {
    pub column: String,
    pub label: String,
    pub value: String,
    pub help: String,
}

impl From<MetricCard> for PyMetricCard {
    fn from(card: MetricCard) -> Self {
        Self {
            column: card.column,
            label: card.label,
            value: card.value,
            help: card.help,
        }
    }
}

#[pymethods]
impl PyMetricCard {
    fn __repr__(&self) -> String {
        format!("MetricCard({}={})", self.column, self.value)
    }
}

/// A plot file with its caption.
#[pyclass(name = "ImageRef", module = "netra_orb", get_all)]
#[derive(Debug, Clone)]
pub struct PyImageRef {
    pub name: String,
    pub caption: String,
    pub path: String,
    pub available: bool,
}

impl From<ImageRef> for PyImageRef {
    fn from(image: ImageRef) -> Self {
        Self {
            name: image.name,
            caption: image.caption,
            path: image.path.to_string_lossy().into_owned(),
            available: image.available,
        }
    }
}

#[pymethods]
impl PyImageRef {
    fn __repr__(&self) -> String {
        format!("ImageRef({}, available={})", self.name, self.available)
    }
}

/// Read-only access to the classified fleet.
#[pyclass(module = "netra_orb")]
pub struct FleetDashboard {
    view: FleetView,
    images: ImageCatalog,
}

#[pymethods]
impl FleetDashboard {
    /// Open the augmented artifact.
    ///
    /// Args:
    ///     path: Augmented CSV; defaults to the configured output path
    ///     config_path: Optional path to a netra.toml
    #[new]
    #[pyo3(signature = (path=None, config_path=None))]
    pub fn new(path: Option<&str>, config_path: Option<&str>) -> PyResult<Self> {
        let config = load_config(config_path)?;
        let artifact = path.map(PathBuf::from).unwrap_or_else(|| config.output_path());
        let view = FleetView::open(&artifact, config.visibility()).map_err(to_py_err)?;
        Ok(Self {
            view,
            images: ImageCatalog::new(config.image_root()),
        })
    }

    /// Satellite ids, sorted.
    pub fn satellites(&self) -> Vec<String> {
        self.view.satellites().into_iter().map(str::to_string).collect()
    }

    pub fn visible_metric_columns(&self) -> Vec<String> {
        self.view.visible_metric_columns()
    }

    pub fn behavior_class(&self, satellite: &str) -> PyResult<String> {
        self.view
            .behavior_class(satellite)
            .map(|class| class.as_str().to_string())
            .map_err(to_py_err)
    }

    pub fn metric_cards(&self, satellite: &str) -> PyResult<Vec<PyMetricCard>> {
        let cards = self.view.metric_cards(satellite).map_err(to_py_err)?;
        Ok(cards.into_iter().map(PyMetricCard::from).collect())
    }

    /// Satellite ids of one class ("ALL" for every satellite).
    #[pyo3(signature = (class_filter="ALL"))]
    pub fn filter_satellites(&self, class_filter: &str) -> PyResult<Vec<String>> {
        let selector: ClassFilter = class_filter.parse().map_err(PyValueError::new_err)?;
        Ok(self
            .view
            .filter(selector)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Satellite count per class label.
    pub fn class_distribution(&self) -> BTreeMap<String, usize> {
        self.view
            .distribution()
            .counts
            .into_iter()
            .map(|(class, count)| (class.as_str().to_string(), count))
            .collect()
    }

    /// Key result plots followed by the available orbital analysis plots.
    pub fn image_paths(&self, satellite: &str) -> PyResult<Vec<PyImageRef>> {
        self.view.row_for(satellite).map_err(to_py_err)?;
        Ok(self
            .images
            .key_results(satellite)
            .into_iter()
            .chain(self.images.orbital_analysis(satellite))
            .map(PyImageRef::from)
            .collect())
    }

    pub fn fleet_plots(&self) -> Vec<PyImageRef> {
        self.images
            .fleet_plots()
            .into_iter()
            .map(PyImageRef::from)
            .collect()
    }

    fn __len__(&self) -> usize {
        self.view.len()
    }
}

/// Register the module contents.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(run_classification, m)?)?;
    m.add_class::<FleetDashboard>()?;
    m.add_class::<PyMetricCard>()?;
    m.add_class::<PyImageRef>()?;
    Ok(())
}
