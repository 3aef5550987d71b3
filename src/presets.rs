//! The threshold-scan figures of the front-end calibration report.
//!
//! Each figure plots one quantity against the discriminator threshold at 200,
//! 210 and 220 mV for the 1.4 mm gap chamber, with the same three header
//! annotations.

use crate::error::Result;
use crate::plot::{Annotation, AxisSpec, DataPoint, PlotSpec};

/// Horizontal axis shared by all threshold scans.
const THRESHOLD_TITLE: &str = "V_{thrs} (mV)";
const THRESHOLD_RANGE: (f64, f64) = (194.22, 223.71);

/// One figure of the threshold-scan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdScan {
    /// Mean muon cluster size.
    ClusterSize,
    /// Mean muon cluster multiplicity.
    ClusterMultiplicity,
    /// High-voltage working point.
    WorkingPoint,
    /// Noise rate per unit area.
    NoiseRate,
}

impl ThresholdScan {
    /// Every figure, in report order.
    pub const ALL: [Self; 4] = [Self::ClusterSize, Self::ClusterMultiplicity, Self::WorkingPoint, Self::NoiseRate];

    /// Output file name without extension.
    #[must_use]
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::ClusterSize => "thrs_CLS",
            Self::ClusterMultiplicity => "thrs_CMP",
            Self::WorkingPoint => "thrs_WP",
            Self::NoiseRate => "thrs_noiseRate",
        }
    }

    /// Look a figure up by its file stem.
    #[must_use]
    pub fn from_file_stem(stem: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scan| scan.file_stem() == stem)
    }

    /// Vertical axis title and range.
    #[must_use]
    pub fn y_axis(self) -> AxisSpec {
        match self {
            Self::ClusterSize => AxisSpec::new("Muon cluster size", 0.0, 4.0),
            Self::ClusterMultiplicity => AxisSpec::new("Muon cluster multiplicity", 0.0, 2.0),
            Self::WorkingPoint => AxisSpec::new("Working Point (V)", 7335.72, 7612.698),
            Self::NoiseRate => AxisSpec::new("Noise rate (Hz/cm^{2})", 0.0, 1.0),
        }
    }

    /// Measured `(y, y_error)` at each threshold.
    fn measurements(self) -> [(f64, f64); 3] {
        match self {
            Self::ClusterSize => [(2.350164, 0.1501929), (2.51343, 0.1849057), (2.43778, 0.1063492)],
            Self::ClusterMultiplicity => [(0.970297, 0.06930693), (0.9911503, 0.06930693), (1.044469, 0.02970297)],
            Self::WorkingPoint => [(7393.158, 34.35705), (7473.732, 36.66232), (7546.025, 43.59196)],
            // rates are reported without uncertainty
            Self::NoiseRate => [(0.2996758, 0.0), (0.3767202, 0.0), (0.2097646, 0.0)],
        }
    }

    /// Data points of the figure.
    #[must_use]
    pub fn points(self) -> Vec<DataPoint> {
        [200.0, 210.0, 220.0]
            .into_iter()
            .zip(self.measurements())
            .map(|(x, (y, y_error))| DataPoint::new(x, y, y_error))
            .collect()
    }

    /// The complete figure description.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in data; the result type comes from the
    /// validating builder.
    pub fn spec(self) -> Result<PlotSpec> {
        PlotSpec::builder(AxisSpec::new(THRESHOLD_TITLE, THRESHOLD_RANGE.0, THRESHOLD_RANGE.1), self.y_axis())
            .points(self.points())
            .annotations(report_annotations())
            .build()
    }
}

/// Header annotations shared by every report figure.
#[must_use]
pub fn report_annotations() -> Vec<Annotation> {
    vec![
        Annotation::new("#bf{CMS Front-End electronics}", 0.15, 0.9),
        Annotation::new("1.4 mm", 0.15, 0.85),
        Annotation::new("#bf{CMS} 904,#scale[0.75]{ #it{Preliminary}}", 0.12, 0.96),
    ]
}
