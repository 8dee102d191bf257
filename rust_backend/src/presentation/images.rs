//! Resolution of per-satellite and fleet-wide plot images.
//!
//! Images are produced upstream and only located here by naming convention:
//! `<root>/<satellite>/images/<name>.png` for a satellite and
//! `<root>/fleet_plots/images/` for fleet plots. A missing image is logged
//! and reported as unavailable; it never fails the caller.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Headline plots of the single-satellite view, with captions.
pub const KEY_RESULT_IMAGES: [(&str, &str); 5] = [
    ("error_plot.png", "LSTM Prediction Error vs Time"),
    ("anomaly_plot.png", "Detected Anomalies"),
    ("sgp4_error_plot.png", "SGP4 One-step Error"),
    ("sgp4_error_smoothed.png", "Smoothed SGP4 Error Trend"),
    ("error_plot.png", "LSTM Error Overview"),
];

/// Orbital parameter trend plots; captions derive from the file name.
pub const ORBITAL_ANALYSIS_IMAGES: [&str; 15] = [
    "raan_vs_time.png",
    "inclination_vs_time.png",
    "mean_motion_vs_time.png",
    "altitude_vs_time.png",
    "eccentricity_vs_time.png",
    "bstar_vs_time.png",
    "mean_motion_dot_vs_time.png",
    "sgp4_error_vs_time.png",
    "ml_error_vs_time.png",
    "sgp4_error_vs_altitude.png",
    "ml_error_vs_altitude.png",
    "ml_error_vs_sgp4_error.png",
    "mean_motion_vs_altitude.png",
    "bstar_vs_altitude.png",
    "eccentricity_vs_altitude.png",
];

const FLEET_PLOT_DIR: [&str; 2] = ["fleet_plots", "images"];
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// A located image artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub name: String,
    pub caption: String,
    pub path: PathBuf,
    pub available: bool,
}

/// Caption from a file name: extension dropped, underscores to spaces, title case.
///
/// ```
/// use netra_orb::presentation::images::caption_from_file_name;
///
/// assert_eq!(caption_from_file_name("mean_motion_vs_time.png"), "Mean Motion Vs Time");
/// ```
pub fn caption_from_file_name(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);

    stem.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Image locator rooted at the artifact directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCatalog {
    root: PathBuf,
}

impl ImageCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<satellite>/images`
    pub fn satellite_dir(&self, satellite: &str) -> PathBuf {
        self.root.join(satellite).join("images")
    }

    /// Locate one image of a satellite.
    pub fn resolve(&self, satellite: &str, name: &str, caption: &str) -> ImageRef {
        let path = self.satellite_dir(satellite).join(name);
        let available = path.is_file();
        if !available {
            warn!("Missing file: {} for satellite {}", name, satellite);
        }
        ImageRef {
            name: name.to_string(),
            caption: caption.to_string(),
            path,
            available,
        }
    }

    /// The headline plots of a satellite, in display order.
    pub fn key_results(&self, satellite: &str) -> Vec<ImageRef> {
        KEY_RESULT_IMAGES
            .iter()
            .map(|(name, caption)| self.resolve(satellite, name, caption))
            .collect()
    }

    /// The orbital parameter plots of a satellite that exist on disk.
    pub fn orbital_analysis(&self, satellite: &str) -> Vec<ImageRef> {
        ORBITAL_ANALYSIS_IMAGES
            .iter()
            .map(|name| {
                let path = self.satellite_dir(satellite).join(name);
                ImageRef {
                    name: name.to_string(),
                    caption: caption_from_file_name(name),
                    available: path.is_file(),
                    path,
                }
            })
            .filter(|image| image.available)
            .collect()
    }

    /// `<root>/fleet_plots/images`
    pub fn fleet_dir(&self) -> PathBuf {
        FLEET_PLOT_DIR.iter().fold(self.root.clone(), |p, part| p.join(part))
    }

    /// Fleet-wide plots sorted by file name. Empty when the directory is absent.
    pub fn fleet_plots(&self) -> Vec<ImageRef> {
        let dir = self.fleet_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => {
                warn!("{} folder not found", dir.display());
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| {
                Path::new(name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        names.sort();

        names
            .into_iter()
            .map(|name| ImageRef {
                caption: caption_from_file_name(&name),
                path: dir.join(&name),
                available: true,
                name,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_caption_from_file_name() {
        assert_eq!(caption_from_file_name("bstar_vs_altitude.png"), "Bstar Vs Altitude");
        assert_eq!(caption_from_file_name("ML_ERROR.jpeg"), "Ml Error");
        assert_eq!(caption_from_file_name("plain"), "Plain");
    }

    #[test]
    fn test_satellite_paths_follow_convention() {
        let catalog = ImageCatalog::new("/data/netra");
        assert_eq!(
            catalog.satellite_dir("GSAT-30"),
            PathBuf::from("/data/netra/GSAT-30/images")
        );
        assert_eq!(catalog.fleet_dir(), PathBuf::from("/data/netra/fleet_plots/images"));
    }

    #[test]
    fn test_missing_images_are_unavailable_not_errors() {
        let root = TempDir::new().unwrap();
        let images = root.path().join("EOS-04").join("images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("anomaly_plot.png"), b"png").unwrap();
        fs::write(images.join("altitude_vs_time.png"), b"png").unwrap();

        let catalog = ImageCatalog::new(root.path());
        let key = catalog.key_results("EOS-04");
        assert_eq!(key.len(), KEY_RESULT_IMAGES.len());
        assert!(key[1].available);
        assert!(!key[0].available);

        let analysis = catalog.orbital_analysis("EOS-04");
        assert_eq!(analysis.len(), 1);
        assert_eq!(analysis[0].caption, "Altitude Vs Time");

        // Unknown satellite: every key image unavailable
        assert!(catalog.key_results("NOPE").iter().all(|i| !i.available));
    }

    #[test]
    fn test_fleet_plots_sorted_and_filtered() {
        let root = TempDir::new().unwrap();
        let catalog = ImageCatalog::new(root.path());
        assert!(catalog.fleet_plots().is_empty());

        fs::create_dir_all(catalog.fleet_dir()).unwrap();
        for name in ["z_spread.png", "a_counts.JPG", "notes.txt", "m_hist.jpeg"] {
            fs::write(catalog.fleet_dir().join(name), b"x").unwrap();
        }

        let names: Vec<String> = catalog.fleet_plots().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["a_counts.JPG", "m_hist.jpeg", "z_spread.png"]);
    }
}
