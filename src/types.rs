//! Clause encoding disciplines.
use std::fmt;
use std::str::FromStr;

/// How gates are turned into clauses.
///
/// - `Plaisted`: one direction only (gate implies its definition). Preserves
///   satisfiability of the root, not equivalence.
/// - `Tseitin`: both directions, so every gate variable is equivalent to its
///   defining formula.
/// - `Pog`: both directions for AND/OR/ITE. The network is meant to be
///   expanded into AND/OR form and written as a POG; ITO gates are not
///   representable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Encoding {
    #[default]
    Plaisted,
    Tseitin,
    Pog,
}

impl Encoding {
    /// Whether the reverse (definition implies gate) clauses are emitted.
    pub fn is_bidirectional(self) -> bool {
        self != Encoding::Plaisted
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Plaisted => "Plaisted",
            Encoding::Tseitin => "Tseitin",
            Encoding::Pog => "POG",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plaisted" => Ok(Encoding::Plaisted),
            "tseitin" => Ok(Encoding::Tseitin),
            "pog" => Ok(Encoding::Pog),
            _ => Err(format!("unknown encoding '{}'", s)),
        }
    }
}
