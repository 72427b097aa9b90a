use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// An RGBA colour used to paint lit or unlit pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Unlit pixels
    pub const BACKGROUND: Color = Color::rgba(0, 0, 0, 255);
    /// Lit pixels
    pub const FOREGROUND: Color = Color::rgba(0, 238, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
    #[error("expected 3 or 4 comma separated components, got {0}")]
    ComponentCount(usize),
    #[error("invalid colour component: {0}")]
    Component(#[from] ParseIntError),
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parses `r,g,b` or `r,g,b,a` with each component in 0..=255
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()?;
        match components[..] {
            [r, g, b] => Ok(Color::rgba(r, g, b, 255)),
            [r, g, b, a] => Ok(Color::rgba(r, g, b, a)),
            _ => Err(ParseColorError::ComponentCount(components.len())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}
