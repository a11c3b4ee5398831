use std::fmt;
use std::str::FromStr;

/// The interpolant fitted through the hourly nodes of a day.
///
/// All methods pass exactly through the hourly values. `Linear` is continuous only;
/// `Quadratic` and `Cubic` are smoother but may overshoot near extrema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMethod {
    #[default]
    Linear,
    Quadratic,
    Cubic,
}

impl InterpolationMethod {
    pub const ALL: [InterpolationMethod; 3] = [
        InterpolationMethod::Linear,
        InterpolationMethod::Quadratic,
        InterpolationMethod::Cubic,
    ];

    /// Polynomial degree of the spline pieces.
    pub fn degree(&self) -> usize {
        match self {
            InterpolationMethod::Linear => 1,
            InterpolationMethod::Quadratic => 2,
            InterpolationMethod::Cubic => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "linear",
            InterpolationMethod::Quadratic => "quadratic",
            InterpolationMethod::Cubic => "cubic",
        }
    }
}

/// Parses `"linear"`, `"quadratic"` or `"cubic"` (case-insensitive).
///
/// # Examples
///
/// ```
/// use pvgis_tmy::InterpolationMethod;
///
/// let method: InterpolationMethod = "Cubic".parse().unwrap();
/// assert_eq!(method, InterpolationMethod::Cubic);
/// assert!("nearest".parse::<InterpolationMethod>().is_err());
/// ```
impl FromStr for InterpolationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterpolationMethod::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown interpolation method '{}', expected linear, quadratic or cubic",
                    s
                )
            })
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
