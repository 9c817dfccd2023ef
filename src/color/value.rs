// Color value types.
//
// All coordinates are normalized to [0, 1]; constructors reject anything
// outside that range so downstream code never has to re-validate.

use std::fmt;

use super::space::SpaceId;

// Upper bound enforced on palettes. The classified framebuffer carries the
// palette index in its alpha byte, so 254 and 255 are reserved sentinels and
// the hard ceiling is 254; the exposed cap stays comfortably below it.
pub const MAX_PALETTE_COLORS: usize = 200;

// Alpha byte meaning "no palette entry within the distance threshold".
pub const NO_MATCH: u8 = 254;

// Alpha byte meaning "this fragment lies outside the visualized space".
pub const OUTSIDE_COLOR_SPACE: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorError {
    InvalidCoordinate { component: usize, value: f32 },
    AxisCountMismatch { expected: usize, actual: usize },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidCoordinate { component, value } => write!(
                f,
                "color coordinate {} is out of [0, 1]: {}",
                component, value
            ),
            ColorError::AxisCountMismatch { expected, actual } => write!(
                f,
                "expected {} color coordinates, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for ColorError {}

fn check_components(components: &[f32; 3]) -> Result<(), ColorError> {
    for (component, &value) in components.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) || value.is_nan() {
            return Err(ColorError::InvalidCoordinate { component, value });
        }
    }
    Ok(())
}

fn format_in_space(f: &mut fmt::Formatter<'_>, space: SpaceId, components: [f32; 3]) -> fmt::Result {
    write!(f, "{}:", space.label())?;
    for (axis, value) in space.space().axes().iter().zip(components) {
        write!(f, " {}{}", (value * axis.max as f32).round() as i32, axis.unit)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub fn new(r: f32, g: f32, b: f32) -> Result<Self, ColorError> {
        check_components(&[r, g, b])?;
        Ok(Self { r, g, b })
    }

    pub fn from_slice(components: &[f32]) -> Result<Self, ColorError> {
        let [r, g, b] = coerce_three(components)?;
        Self::new(r, g, b)
    }

    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    // Internal constructor for conversion results that are mathematically
    // guaranteed in range up to floating-point noise.
    pub(crate) fn clamped(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    pub fn components(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        ]
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_in_space(f, SpaceId::Rgb, self.components())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvColor {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl HsvColor {
    pub fn new(h: f32, s: f32, v: f32) -> Result<Self, ColorError> {
        check_components(&[h, s, v])?;
        Ok(Self { h, s, v })
    }

    pub fn from_slice(components: &[f32]) -> Result<Self, ColorError> {
        let [h, s, v] = coerce_three(components)?;
        Self::new(h, s, v)
    }

    pub fn components(&self) -> [f32; 3] {
        [self.h, self.s, self.v]
    }
}

impl fmt::Display for HsvColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_in_space(f, SpaceId::Hsv, self.components())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl HslColor {
    pub fn new(h: f32, s: f32, l: f32) -> Result<Self, ColorError> {
        check_components(&[h, s, l])?;
        Ok(Self { h, s, l })
    }

    pub fn from_slice(components: &[f32]) -> Result<Self, ColorError> {
        let [h, s, l] = coerce_three(components)?;
        Self::new(h, s, l)
    }

    pub fn components(&self) -> [f32; 3] {
        [self.h, self.s, self.l]
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_in_space(f, SpaceId::Hsl, self.components())
    }
}

fn coerce_three(components: &[f32]) -> Result<[f32; 3], ColorError> {
    match components {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(ColorError::AxisCountMismatch {
            expected: 3,
            actual: components.len(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedColor {
    pub name: String,
    pub rgb: RgbColor,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, rgb: RgbColor) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaletteError {
    TooLarge { len: usize },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::TooLarge { len } => write!(
                f,
                "palette has {} entries, maximum is {}",
                len, MAX_PALETTE_COLORS
            ),
        }
    }
}

impl std::error::Error for PaletteError {}

// Ordered palette. The position of an entry is the palette index written
// into the classified framebuffer and returned by pixel readback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: Vec<NamedColor>,
}

impl Palette {
    pub fn new(colors: Vec<NamedColor>) -> Result<Self, PaletteError> {
        if colors.len() > MAX_PALETTE_COLORS {
            return Err(PaletteError::TooLarge { len: colors.len() });
        }
        Ok(Self { colors })
    }

    pub fn empty() -> Self {
        Self { colors: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NamedColor> {
        self.colors.get(index)
    }

    pub fn colors(&self) -> &[NamedColor] {
        &self.colors
    }

    // Linear lookup used to resolve a highlight color reference back to its
    // palette index. Colors are compared at 8-bit precision, matching what
    // the framebuffer can represent.
    pub fn index_of(&self, rgb: &RgbColor) -> Option<usize> {
        let key = rgb.to_bytes();
        self.colors
            .iter()
            .position(|entry| entry.rgb.to_bytes() == key)
    }
}
