use serde::{Deserialize, Serialize};
use std::fmt;

/// The four quiz topics. Replaces the string-keyed dispatch the original
/// screens used; every subject maps to exactly one problem kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Surds,
    Complex,
    Polynomials,
    Differentiation,
}

impl Subject {
    pub const ALL: [Subject; 4] = [
        Subject::Surds,
        Subject::Complex,
        Subject::Polynomials,
        Subject::Differentiation,
    ];

    /// Human-readable name for menus and score listings.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Surds => "Surds",
            Self::Complex => "Complex Numbers",
            Self::Polynomials => "Polynomials",
            Self::Differentiation => "Differentiation",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surds => write!(f, "surds"),
            Self::Complex => write!(f, "complex"),
            Self::Polynomials => write!(f, "polynomials"),
            Self::Differentiation => write!(f, "differentiation"),
        }
    }
}

impl std::str::FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "surds" => Ok(Self::Surds),
            "complex" | "complex_numbers" | "complexnumbers" => Ok(Self::Complex),
            "polynomials" => Ok(Self::Polynomials),
            "differentiation" => Ok(Self::Differentiation),
            _ => Err(format!("invalid subject: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_display_parse() {
        for subject in Subject::ALL {
            let parsed: Subject = subject.to_string().parse().unwrap();
            assert_eq!(parsed, subject);
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("geometry".parse::<Subject>().is_err());
    }
}
