use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The elementary function families the quiz differentiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Exp,
    Ln,
    Sin,
    Cos,
    Tan,
}

impl Family {
    /// Symbol as it appears in the rendered problem.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Exp => "e^",
            Self::Ln => "ln",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `a·f(x·t)` for a family `f`, scale `a` and argument coefficient `x`,
/// differentiated with respect to `t`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifferentiationProblem {
    pub family: Family,
    pub scale: i64,
    pub coefficient: i64,
}

impl DifferentiationProblem {
    /// Family uniform over the five kinds; scale and coefficient uniform
    /// over [1, 8].
    pub fn generate(rng: &mut impl Rng) -> Self {
        let family = match rng.gen_range(0..5) {
            0 => Family::Exp,
            1 => Family::Ln,
            2 => Family::Sin,
            3 => Family::Cos,
            _ => Family::Tan,
        };
        Self {
            family,
            scale: rng.gen_range(1..=8),
            coefficient: rng.gen_range(1..=8),
        }
    }

    pub fn new(family: Family, scale: i64, coefficient: i64) -> Self {
        Self {
            family,
            scale,
            coefficient,
        }
    }

    /// `"Differentiate 3*sin(2t)"`.
    pub fn prompt(&self) -> String {
        format!(
            "Differentiate {}*{}({}t)",
            self.scale,
            self.family.symbol(),
            self.coefficient
        )
    }

    /// Chain rule on the linear argument: the outer factor is always
    /// `scale × coefficient`.
    pub fn answer(&self) -> String {
        let a = self.scale;
        let x = self.coefficient;
        match self.family {
            Family::Exp => format!("{}*e^({x}t)", a * x),
            Family::Ln => format!("({})/({x}t)", a * x),
            Family::Sin => format!("{}*cos({x}t)", a * x),
            Family::Cos => format!("{}*sin({x}t)", -(a * x)),
            Family::Tan => format!("{}*sec^2({x}t)", a * x),
        }
    }
}
