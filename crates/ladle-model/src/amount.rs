//! Ingredient amounts.
//!
//! The graph stores an amount as the text users typed ("1tsp", "2 cups",
//! "a pinch"). `Amount` keeps that text while promoting `<number><unit>`
//! forms to a structured variant the API layer can render or convert.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Amount {
    /// A numeric quantity with a unit, e.g. `1.5 dl`.
    Measured { value: f64, unit: String },
    /// Anything that did not parse as a quantity.
    Freeform { text: String },
}

impl Amount {
    /// Parse stored amount text. `<number>` then an optional space then an
    /// alphabetic unit becomes `Measured`; everything else stays `Freeform`.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(trimmed.len());
        let (number, rest) = trimmed.split_at(split);
        let unit = rest.trim_start();
        if let Ok(value) = number.parse::<f64>() {
            if !unit.is_empty() && unit.chars().all(|c| c.is_ascii_alphabetic()) {
                return Amount::Measured {
                    value,
                    unit: unit.to_string(),
                };
            }
        }
        Amount::Freeform {
            text: text.to_string(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Measured { value, unit } => write!(f, "{value} {unit}"),
            Amount::Freeform { text } => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotes_quantity_with_unit() {
        assert_eq!(
            Amount::parse("1tsp"),
            Amount::Measured {
                value: 1.0,
                unit: "tsp".to_string()
            }
        );
        assert_eq!(
            Amount::parse("2 cups"),
            Amount::Measured {
                value: 2.0,
                unit: "cups".to_string()
            }
        );
        assert_eq!(
            Amount::parse("1.5 dl"),
            Amount::Measured {
                value: 1.5,
                unit: "dl".to_string()
            }
        );
    }

    #[test]
    fn keeps_unparseable_text() {
        assert_eq!(
            Amount::parse("a pinch"),
            Amount::Freeform {
                text: "a pinch".to_string()
            }
        );
        // A bare number has no unit to structure.
        assert_eq!(
            Amount::parse("3"),
            Amount::Freeform {
                text: "3".to_string()
            }
        );
        assert_eq!(
            Amount::parse(""),
            Amount::Freeform {
                text: String::new()
            }
        );
    }

    #[test]
    fn parse_display_is_stable() {
        for text in ["1tsp", "2 cups", "a pinch", "1.5 dl"] {
            let amount = Amount::parse(text);
            assert_eq!(Amount::parse(&amount.to_string()), amount);
        }
    }
}
