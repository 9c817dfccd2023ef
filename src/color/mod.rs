// Color Module
//
// This module contains the color algebra for the visualizer: normalized
// color value types, RGB/HSV/HSL conversions, the CIE L*a*b* pipeline used
// by the delta-E metric, the color space descriptors, and the palette
// classifier shared by the CPU and GPU render paths.

pub mod classify;
pub mod convert;
pub mod metric;
pub mod space;
mod value;

pub use classify::classify;
pub use metric::{DistanceMetric, MetricId};
pub use space::{all_spaces, Axis, ColorSpace, SpaceId};
pub use value::{
    ColorError, HslColor, HsvColor, NamedColor, Palette, PaletteError, RgbColor,
    MAX_PALETTE_COLORS, NO_MATCH, OUTSIDE_COLOR_SPACE,
};
