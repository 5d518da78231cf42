//! Canvas sizing.
//!
//! The canvas is laid out inside a container (the window's client area).
//! With a fixed aspect ratio the canvas is the largest rectangle of that
//! ratio that fits the container; without one it fills the container.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Target aspect ratio as `width:height`.
///
/// Either component set to zero means "no fixed ratio".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: f32,
    pub height: f32,
}

impl AspectRatio {
    /// Fill the container, whatever its shape.
    pub const FREE: Self = Self { width: 0.0, height: 0.0 };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both components are non-zero.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.width != 0.0 && self.height != 0.0
    }

    /// Ratio as a single number (width / height).
    #[inline]
    pub fn ratio(&self) -> f32 {
        self.width / self.height
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::new(4.0, 3.0)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fixed() {
            write!(f, "{}:{}", self.width, self.height)
        } else {
            write!(f, "free")
        }
    }
}

/// Parses `"16:9"`, `"4:3"` or `"free"`.
impl FromStr for AspectRatio {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("free") {
            return Ok(Self::FREE);
        }

        let (w, h) = s
            .split_once(':')
            .ok_or_else(|| ConfigError::Invalid(format!("aspect ratio '{}' is not W:H", s)))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| ConfigError::Invalid(format!("bad aspect component '{}'", part)))
        };

        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

/// Canvas dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl CanvasSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Compute the canvas size for a container.
///
/// - No fixed ratio: the canvas is exactly the container.
/// - Container relatively wider than the ratio: height-constrained.
/// - Otherwise: width-constrained.
pub fn canvas_size(container_w: f32, container_h: f32, aspect: AspectRatio) -> CanvasSize {
    if !aspect.is_fixed() {
        CanvasSize::new(container_w, container_h)
    } else if container_w / container_h > aspect.ratio() {
        CanvasSize::new(container_h * aspect.width / aspect.height, container_h)
    } else {
        CanvasSize::new(container_w, container_w * aspect.height / aspect.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINERS: &[(f32, f32)] = &[
        (1280.0, 720.0),
        (720.0, 1280.0),
        (800.0, 600.0),
        (333.0, 1000.0),
        (1920.0, 1081.0),
        (1.0, 1.0),
    ];

    #[test]
    fn test_free_ratio_fills_container() {
        for &(w, h) in CONTAINERS {
            assert_eq!(canvas_size(w, h, AspectRatio::FREE), CanvasSize::new(w, h));
            assert_eq!(canvas_size(w, h, AspectRatio::new(0.0, 3.0)), CanvasSize::new(w, h));
            assert_eq!(canvas_size(w, h, AspectRatio::new(4.0, 0.0)), CanvasSize::new(w, h));
        }
    }

    #[test]
    fn test_fixed_ratio_fits_inside_container() {
        let ratios = [
            AspectRatio::new(4.0, 3.0),
            AspectRatio::new(16.0, 9.0),
            AspectRatio::new(1.0, 2.0),
        ];

        for &(w, h) in CONTAINERS {
            for aspect in ratios {
                let size = canvas_size(w, h, aspect);
                assert!(size.width <= w + 1e-3, "{:?} wider than {}", size, w);
                assert!(size.height <= h + 1e-3, "{:?} taller than {}", size, h);
                assert!((size.width / size.height - aspect.ratio()).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_wide_container_is_height_constrained() {
        let size = canvas_size(1280.0, 720.0, AspectRatio::new(4.0, 3.0));
        assert_eq!(size, CanvasSize::new(960.0, 720.0));
    }

    #[test]
    fn test_tall_container_is_width_constrained() {
        let size = canvas_size(600.0, 900.0, AspectRatio::new(4.0, 3.0));
        assert_eq!(size, CanvasSize::new(600.0, 450.0));
    }

    #[test]
    fn test_sizing_is_pure() {
        let aspect = AspectRatio::new(16.0, 9.0);
        assert_eq!(canvas_size(1000.0, 1000.0, aspect), canvas_size(1000.0, 1000.0, aspect));
    }

    #[test]
    fn test_parse_aspect() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::new(16.0, 9.0));
        assert_eq!(" 4 : 3 ".parse::<AspectRatio>().unwrap(), AspectRatio::new(4.0, 3.0));
        assert_eq!("free".parse::<AspectRatio>().unwrap(), AspectRatio::FREE);
        assert!("16x9".parse::<AspectRatio>().is_err());
        assert!("-1:2".parse::<AspectRatio>().is_err());
    }
}
