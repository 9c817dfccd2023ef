// Palette classifier.
//
// Maps an RGB sample to the index of the nearest palette entry under the
// selected metric, or NO_MATCH when nothing lies within the threshold. The
// fragment shaders implement the identical scan so that pixel readback and
// on-screen region boundaries agree.

use super::convert::{delta_e_lab, rgb_to_lab};
use super::metric::MetricId;
use super::value::{Palette, RgbColor, NO_MATCH};

pub fn classify(color: RgbColor, palette: &Palette, metric: MetricId, threshold: f32) -> u8 {
    if palette.is_empty() {
        return NO_MATCH;
    }

    let mut best_index = 0usize;
    let mut best_distance = f32::INFINITY;

    match metric {
        MetricId::DeltaE => {
            // Convert the sample once; entries are converted inside the scan.
            let lab = rgb_to_lab(color);
            for (index, entry) in palette.colors().iter().enumerate() {
                let distance = delta_e_lab(lab, rgb_to_lab(entry.rgb));
                if distance < best_distance {
                    best_distance = distance;
                    best_index = index;
                }
            }
        }
        MetricId::RgbEuclidean => {
            for (index, entry) in palette.colors().iter().enumerate() {
                let distance = MetricId::RgbEuclidean.distance(color, entry.rgb);
                if distance < best_distance {
                    best_distance = distance;
                    best_index = index;
                }
            }
        }
    }

    if best_distance > threshold {
        NO_MATCH
    } else {
        best_index as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::value::NamedColor;

    fn primaries() -> Palette {
        Palette::new(vec![
            NamedColor::new("Red", RgbColor::from_bytes(255, 0, 0)),
            NamedColor::new("Green", RgbColor::from_bytes(0, 255, 0)),
            NamedColor::new("Blue", RgbColor::from_bytes(0, 0, 255)),
        ])
        .unwrap()
    }

    #[test]
    fn empty_palette_never_matches() {
        let palette = Palette::empty();
        let c = RgbColor::new(0.5, 0.5, 0.5).unwrap();
        assert_eq!(classify(c, &palette, MetricId::RgbEuclidean, 10.0), NO_MATCH);
        assert_eq!(classify(c, &palette, MetricId::DeltaE, 100.0), NO_MATCH);
    }

    #[test]
    fn palette_entries_classify_to_themselves() {
        let palette = primaries();
        for metric in [MetricId::DeltaE, MetricId::RgbEuclidean] {
            for (i, entry) in palette.colors().iter().enumerate() {
                assert_eq!(
                    classify(entry.rgb, &palette, metric, 0.0),
                    i as u8,
                    "entry {} under {:?}",
                    i,
                    metric
                );
            }
        }
    }

    #[test]
    fn distances_beyond_threshold_return_no_match() {
        let palette = primaries();
        let gray = RgbColor::new(0.5, 0.5, 0.5).unwrap();
        assert_eq!(classify(gray, &palette, MetricId::RgbEuclidean, 0.1), NO_MATCH);
        // A generous threshold always matches something.
        assert!(classify(gray, &palette, MetricId::RgbEuclidean, 2.0) < 3);
    }

    #[test]
    fn ties_resolve_to_the_lowest_index() {
        let color = RgbColor::from_bytes(10, 20, 30);
        let palette = Palette::new(vec![
            NamedColor::new("First", color),
            NamedColor::new("Duplicate", color),
        ])
        .unwrap();
        assert_eq!(classify(color, &palette, MetricId::RgbEuclidean, 1.0), 0);
        assert_eq!(classify(color, &palette, MetricId::DeltaE, 1.0), 0);
    }

    #[test]
    fn nearest_primary_wins_under_both_metrics() {
        let palette = primaries();
        let reddish = RgbColor::from_bytes(240, 30, 10);
        assert_eq!(classify(reddish, &palette, MetricId::RgbEuclidean, 2.0), 0);
        assert_eq!(classify(reddish, &palette, MetricId::DeltaE, 100.0), 0);

        let bluish = RgbColor::from_bytes(20, 10, 230);
        assert_eq!(classify(bluish, &palette, MetricId::RgbEuclidean, 2.0), 2);
        assert_eq!(classify(bluish, &palette, MetricId::DeltaE, 100.0), 2);
    }
}
