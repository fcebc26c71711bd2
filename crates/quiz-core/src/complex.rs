use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A form-conversion exercise. The stored value is in the *source* form;
/// the answer is always the other form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "lowercase")]
pub enum ComplexProblem {
    Polar { modulus: f64, angle: f64 },
    Rectangular { re: f64, im: f64 },
}

impl ComplexProblem {
    /// Polar and rectangular sources are equally likely. Polar values draw
    /// modulus from [1, 10) and angle from [-π, π); rectangular parts each
    /// draw from [-5, 5).
    pub fn generate(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Self::Polar {
                modulus: rng.gen_range(1.0..10.0),
                angle: rng.gen_range(-PI..PI),
            }
        } else {
            Self::Rectangular {
                re: rng.gen_range(-5.0..5.0),
                im: rng.gen_range(-5.0..5.0),
            }
        }
    }

    pub fn prompt(&self) -> String {
        match *self {
            Self::Polar { modulus, angle } => format!(
                "Convert {} to rectangular form",
                fmt_polar(modulus, angle)
            ),
            Self::Rectangular { re, im } => {
                format!("Convert {} to polar form", fmt_rect(re, im))
            }
        }
    }

    pub fn answer(&self) -> String {
        match *self {
            Self::Polar { modulus, angle } => {
                let (re, im) = to_rect(modulus, angle);
                fmt_rect(re, im)
            }
            Self::Rectangular { re, im } => {
                let (modulus, angle) = to_polar(re, im);
                fmt_polar(modulus, angle)
            }
        }
    }
}

pub fn to_rect(modulus: f64, angle: f64) -> (f64, f64) {
    (modulus * angle.cos(), modulus * angle.sin())
}

pub fn to_polar(re: f64, im: f64) -> (f64, f64) {
    ((re * re + im * im).sqrt(), im.atan2(re))
}

fn fmt_polar(modulus: f64, angle: f64) -> String {
    format!("{modulus:.2}*cis({angle:.2})")
}

/// `"3.00 + 4.00i"` / `"3.00 - 4.00i"` — the sign is carried by the
/// connective, never doubled on the component.
fn fmt_rect(re: f64, im: f64) -> String {
    // Fold -0.0 into +0.0 so it takes the `+` branch.
    let im = if im == 0.0 { 0.0 } else { im };
    if im >= 0.0 {
        format!("{re:.2} + {im:.2}i")
    } else {
        format!("{re:.2} - {:.2}i", im.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_to_polar_answer() {
        let problem = ComplexProblem::Rectangular { re: 3.0, im: -4.0 };
        assert_eq!(problem.answer(), "5.00*cis(-0.93)");
    }

    #[test]
    fn test_polar_to_rect_answer_positive_imag() {
        // 5*cis(atan2(4,3)) = 3 + 4i
        let angle = 4f64.atan2(3.0);
        let problem = ComplexProblem::Polar {
            modulus: 5.0,
            angle,
        };
        assert_eq!(problem.answer(), "3.00 + 4.00i");
    }

    #[test]
    fn test_polar_to_rect_answer_negative_imag() {
        let angle = (-4f64).atan2(3.0);
        let problem = ComplexProblem::Polar {
            modulus: 5.0,
            angle,
        };
        assert_eq!(problem.answer(), "3.00 - 4.00i");
    }

    #[test]
    fn test_zero_imag_renders_plus() {
        let problem = ComplexProblem::Polar {
            modulus: 2.0,
            angle: 0.0,
        };
        assert_eq!(problem.answer(), "2.00 + 0.00i");
    }

    #[test]
    fn test_prompt_names_target_form() {
        let polar = ComplexProblem::Polar {
            modulus: 2.5,
            angle: 1.0,
        };
        assert_eq!(polar.prompt(), "Convert 2.50*cis(1.00) to rectangular form");

        let rect = ComplexProblem::Rectangular { re: 1.0, im: -2.0 };
        assert_eq!(rect.prompt(), "Convert 1.00 - 2.00i to polar form");
    }

    #[test]
    fn test_round_trip_within_rounding_tolerance() {
        let values = [(3.0, 4.0), (-2.5, 1.25), (0.5, -4.75), (-4.0, -3.0)];
        for (re, im) in values {
            let (modulus, angle) = to_polar(re, im);
            let (re2, im2) = to_rect(modulus, angle);
            assert!((re - re2).abs() < 0.01, "re drifted: {re} vs {re2}");
            assert!((im - im2).abs() < 0.01, "im drifted: {im} vs {im2}");
        }
    }

    #[test]
    fn test_generated_values_in_domain() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            match ComplexProblem::generate(&mut rng) {
                ComplexProblem::Polar { modulus, angle } => {
                    assert!((1.0..10.0).contains(&modulus));
                    assert!((-PI..PI).contains(&angle));
                }
                ComplexProblem::Rectangular { re, im } => {
                    assert!((-5.0..5.0).contains(&re));
                    assert!((-5.0..5.0).contains(&im));
                }
            }
        }
    }
}
