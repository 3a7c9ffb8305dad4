//! Stable codes identifying each kind of finding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Family of a diagnostic code; selects the letter it is printed with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Hard fabric constraint broken (`E`).
    Legality,
    /// Something the checker could not verify (`W`).
    Advisory,
    /// Netlist and fabric disagree about a cell or site (`X`).
    Contract,
}

impl Category {
    /// Letter printed before the number.
    pub const fn letter(self) -> char {
        match self {
            Category::Legality => 'E',
            Category::Advisory => 'W',
            Category::Contract => 'X',
        }
    }
}

/// A code such as `E301`: category letter plus a three-digit number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// Family of the code.
    pub category: Category,
    /// Number within the family.
    pub number: u16,
}

impl DiagnosticCode {
    /// Builds a code; usable in `const` items.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.letter(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printed_with_letter_and_padding() {
        assert_eq!(DiagnosticCode::new(Category::Legality, 301).to_string(), "E301");
        assert_eq!(DiagnosticCode::new(Category::Advisory, 310).to_string(), "W310");
        assert_eq!(DiagnosticCode::new(Category::Contract, 7).to_string(), "X007");
    }

    #[test]
    fn json_keeps_structure() {
        let json = serde_json::to_value(DiagnosticCode::new(Category::Advisory, 310)).unwrap();
        assert_eq!(json["category"], "Advisory");
        assert_eq!(json["number"], 310);
    }
}
