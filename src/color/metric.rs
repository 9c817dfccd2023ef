// Distance metric descriptors.
//
// The classifier is parameterized by a metric id and a threshold; these
// records carry the UI-facing threshold range and formatting alongside.

use super::convert::{delta_e, rgb_distance};
use super::value::RgbColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    DeltaE,
    RgbEuclidean,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceMetric {
    pub id: MetricId,
    pub min_threshold: f32,
    pub max_threshold: f32,
    pub default_threshold: f32,
}

static DELTA_E: DistanceMetric = DistanceMetric {
    id: MetricId::DeltaE,
    min_threshold: 0.0,
    max_threshold: 100.0,
    default_threshold: 25.0,
};

static RGB_EUCLIDEAN: DistanceMetric = DistanceMetric {
    id: MetricId::RgbEuclidean,
    min_threshold: 0.0,
    max_threshold: 2.0,
    default_threshold: 0.5,
};

impl DistanceMetric {
    pub fn delta_e() -> &'static DistanceMetric {
        &DELTA_E
    }

    pub fn rgb_euclidean() -> &'static DistanceMetric {
        &RGB_EUCLIDEAN
    }

    pub fn by_id(id: &str) -> Option<&'static DistanceMetric> {
        match id.trim().to_ascii_lowercase().as_str() {
            "deltae" | "delta_e" | "delta-e" => Some(&DELTA_E),
            "rgbeuclidean" | "rgb_euclidean" | "rgb-euclidean" => Some(&RGB_EUCLIDEAN),
            _ => None,
        }
    }

    pub fn for_metric(id: MetricId) -> &'static DistanceMetric {
        match id {
            MetricId::DeltaE => &DELTA_E,
            MetricId::RgbEuclidean => &RGB_EUCLIDEAN,
        }
    }

    pub fn clamp_threshold(&self, threshold: f32) -> f32 {
        threshold.clamp(self.min_threshold, self.max_threshold)
    }

    pub fn threshold_display(&self, threshold: f32) -> String {
        match self.id {
            MetricId::DeltaE => format!("ΔE {}", threshold.round() as i32),
            MetricId::RgbEuclidean => format!("{:.2}", threshold),
        }
    }
}

impl MetricId {
    pub fn distance(self, a: RgbColor, b: RgbColor) -> f32 {
        match self {
            MetricId::DeltaE => delta_e(a, b),
            MetricId::RgbEuclidean => rgb_distance(a, b),
        }
    }
}
