use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A JSON leaf the API sends either quoted or bare, e.g. `"312"` or `312`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    /// Whether the value counts as present: non-blank text or a non-zero number.
    pub fn is_present(&self) -> bool {
        match self {
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Number(n) => n.as_f64().map_or(true, |x| x != 0.0),
        }
    }

    /// Numeric value, parsing text the way the API's quoted numbers need.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Number(n) => n.as_f64(),
        }
    }
}

/// Largest integer an f64 holds exactly.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{s}"),
            Scalar::Number(n) if n.is_f64() => match n.as_f64() {
                // `1965.0` is shown as `1965`
                Some(x) if x.is_finite() && x.fract() == 0.0 && x.abs() <= MAX_EXACT_F64 => {
                    write!(f, "{}", x as i64)
                }
                _ => write!(f, "{n}"),
            },
            Scalar::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

/// Picks the first present value out of a list of alternate fields.
pub fn first_present<'a>(candidates: &[Option<&'a Scalar>]) -> Option<&'a Scalar> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|x| x.is_present())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn zero_and_empty_are_absent() {
        assert!(!Scalar::from(0).is_present());
        assert!(!Scalar::from("").is_present());
        assert!(Scalar::from("0").is_present());
        assert!(Scalar::from(17).is_present());
    }

    #[test]
    fn accepts_quoted_and_bare_numbers() {
        let quoted: Scalar = serde_json::from_str(r#""312""#).unwrap();
        let bare: Scalar = serde_json::from_str("312").unwrap();
        assert_eq!(quoted.to_string(), bare.to_string());
    }

    #[test]
    fn whole_floats_display_as_integers() {
        let number = |s: &str| serde_json::from_str::<Scalar>(s).unwrap().to_string();
        assert_eq!(number("1965.0"), "1965");
        assert_eq!(number("412"), "412");
        assert_eq!(number("-3.0"), "-3");
        assert_eq!(number("0.5"), "0.5");
        assert_eq!(number(r#""1965.0""#), "1965.0");
    }

    #[test]
    fn numeric_value_of_text_and_numbers() {
        assert_eq!(Scalar::from("0.8").as_f64(), Some(0.8));
        assert_eq!(Scalar::from(3).as_f64(), Some(3.0));
        assert_eq!(Scalar::from("n/a").as_f64(), None);
    }

    #[test]
    fn first_present_skips_blank_alternates() {
        let blank = Scalar::from("");
        let pages = Scalar::from(200);
        assert_eq!(
            first_present(&[Some(&blank), None, Some(&pages)]),
            Some(&pages)
        );
        assert_eq!(first_present(&[None, Some(&blank)]), None);
    }
}
