// Color space descriptors.
//
// Immutable records describing each supported space, its axes and which
// axis (if any) may be displayed as a polar angle. The UI works in integer
// axis units; the render pipeline works in normalized [0, 1] coordinates.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    pub key: &'static str,
    pub display_name: &'static str,
    pub unit: &'static str,
    pub min: i32,
    pub max: i32,
    pub default: i32,
}

impl Axis {
    // Integer axis value -> normalized coordinate.
    pub fn normalize(&self, value: i32) -> f32 {
        value as f32 / self.max as f32
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceId {
    Rgb,
    Hsv,
    Hsl,
}

impl SpaceId {
    pub fn by_id(id: &str) -> Option<SpaceId> {
        match id.trim().to_ascii_lowercase().as_str() {
            "rgb" => Some(SpaceId::Rgb),
            "hsv" => Some(SpaceId::Hsv),
            "hsl" => Some(SpaceId::Hsl),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpaceId::Rgb => "RGB",
            SpaceId::Hsv => "HSV",
            SpaceId::Hsl => "HSL",
        }
    }

    pub fn space(self) -> &'static ColorSpace {
        match self {
            SpaceId::Rgb => &RGB_SPACE,
            SpaceId::Hsv => &HSV_SPACE,
            SpaceId::Hsl => &HSL_SPACE,
        }
    }
}

impl fmt::Display for SpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpace {
    pub id: SpaceId,
    axes: [Axis; 3],
    default_axis_key: &'static str,
    polar_axis_key: Option<&'static str>,
}

static RGB_SPACE: ColorSpace = ColorSpace {
    id: SpaceId::Rgb,
    axes: [
        Axis {
            key: "r",
            display_name: "Red",
            unit: "",
            min: 0,
            max: 255,
            default: 128,
        },
        Axis {
            key: "g",
            display_name: "Green",
            unit: "",
            min: 0,
            max: 255,
            default: 128,
        },
        Axis {
            key: "b",
            display_name: "Blue",
            unit: "",
            min: 0,
            max: 255,
            default: 128,
        },
    ],
    default_axis_key: "r",
    polar_axis_key: None,
};

static HSV_SPACE: ColorSpace = ColorSpace {
    id: SpaceId::Hsv,
    axes: [
        Axis {
            key: "h",
            display_name: "Hue",
            unit: "°",
            min: 0,
            max: 360,
            default: 0,
        },
        Axis {
            key: "s",
            display_name: "Saturation",
            unit: "%",
            min: 0,
            max: 100,
            default: 100,
        },
        Axis {
            key: "v",
            display_name: "Value",
            unit: "%",
            min: 0,
            max: 100,
            default: 100,
        },
    ],
    default_axis_key: "v",
    polar_axis_key: Some("h"),
};

static HSL_SPACE: ColorSpace = ColorSpace {
    id: SpaceId::Hsl,
    axes: [
        Axis {
            key: "h",
            display_name: "Hue",
            unit: "°",
            min: 0,
            max: 360,
            default: 0,
        },
        Axis {
            key: "s",
            display_name: "Saturation",
            unit: "%",
            min: 0,
            max: 100,
            default: 100,
        },
        Axis {
            key: "l",
            display_name: "Lightness",
            unit: "%",
            min: 0,
            max: 100,
            default: 50,
        },
    ],
    default_axis_key: "l",
    polar_axis_key: Some("h"),
};

static ALL_SPACES: [&ColorSpace; 3] = [&RGB_SPACE, &HSV_SPACE, &HSL_SPACE];

pub fn all_spaces() -> &'static [&'static ColorSpace; 3] {
    &ALL_SPACES
}

impl ColorSpace {
    pub fn axes(&self) -> &[Axis; 3] {
        &self.axes
    }

    pub fn axis(&self, key: &str) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.key == key)
    }

    pub fn axis_index(&self, key: &str) -> Option<usize> {
        self.axes.iter().position(|axis| axis.key == key)
    }

    pub fn default_axis(&self) -> &Axis {
        // default_axis_key always names one of the three axes.
        self.axis(self.default_axis_key)
            .unwrap_or(&self.axes[0])
    }

    // The axis usable as a polar angle while `current_axis` is the fixed 2D
    // axis. Returns None when the space has no angular axis or when the
    // would-be angle is currently fixed (the remap needs two free axes).
    pub fn available_polar_axis(&self, current_axis_key: &str) -> Option<&Axis> {
        let key = self.polar_axis_key?;
        if key == current_axis_key {
            return None;
        }
        self.axis(key)
    }

    pub fn polar_axis(&self) -> Option<&Axis> {
        self.polar_axis_key.and_then(|key| self.axis(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_are_uniquely_keyed_and_defaults_in_range() {
        for space in all_spaces() {
            for (i, axis) in space.axes().iter().enumerate() {
                assert!(axis.min <= axis.default && axis.default <= axis.max);
                for other in &space.axes()[i + 1..] {
                    assert_ne!(axis.key, other.key, "{} axes collide", space.id);
                }
            }
            assert!(space.axis(space.default_axis_key).is_some());
        }
    }

    #[test]
    fn lookup_by_id_is_case_insensitive() {
        assert_eq!(SpaceId::by_id("HSV"), Some(SpaceId::Hsv));
        assert_eq!(SpaceId::by_id(" rgb "), Some(SpaceId::Rgb));
        assert_eq!(SpaceId::by_id("lab"), None);
    }

    #[test]
    fn polar_axis_election_requires_a_free_hue() {
        let hsv = SpaceId::Hsv.space();
        assert_eq!(hsv.available_polar_axis("v").map(|a| a.key), Some("h"));
        assert_eq!(hsv.available_polar_axis("s").map(|a| a.key), Some("h"));
        assert!(hsv.available_polar_axis("h").is_none());
        assert!(SpaceId::Rgb.space().available_polar_axis("r").is_none());
    }

    #[test]
    fn normalize_maps_axis_units_onto_unit_interval() {
        let hue = SpaceId::Hsv.space().axis("h").unwrap();
        assert_eq!(hue.normalize(0), 0.0);
        assert_eq!(hue.normalize(180), 0.5);
        assert_eq!(hue.normalize(360), 1.0);
        assert!(hue.contains(360));
        assert!(!hue.contains(361));
    }

    #[test]
    fn default_axes_match_expected_views() {
        assert_eq!(SpaceId::Rgb.space().default_axis().key, "r");
        assert_eq!(SpaceId::Hsv.space().default_axis().key, "v");
        assert_eq!(SpaceId::Hsl.space().default_axis().key, "l");
    }
}
