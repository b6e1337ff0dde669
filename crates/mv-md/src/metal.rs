//! The fixed set of supported metals.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A supported metal, identified upstream by its ISO 4217-style code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
    Palladium,
    Copper,
}

impl Metal {
    /// Every supported metal in display order.
    pub const ALL: [Metal; 5] = [
        Metal::Gold,
        Metal::Silver,
        Metal::Platinum,
        Metal::Palladium,
        Metal::Copper,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Metal::Gold => "XAU",
            Metal::Silver => "XAG",
            Metal::Platinum => "XPT",
            Metal::Palladium => "XPD",
            Metal::Copper => "XCU",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
            Metal::Platinum => "Platinum",
            Metal::Palladium => "Palladium",
            Metal::Copper => "Copper",
        }
    }

    /// Exact (case-sensitive) lookup by code. Callers uppercase first.
    pub fn from_code(code: &str) -> Option<Metal> {
        Metal::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn codes() -> Vec<&'static str> {
        Metal::ALL.iter().map(Metal::code).collect()
    }
}

/// Display name for `symbol`, or the symbol itself when it is not a known metal.
pub fn display_name(symbol: &str) -> String {
    match Metal::from_code(symbol) {
        Some(m) => m.name().to_string(),
        None => symbol.to_string(),
    }
}

/// The metal table serialized as a `{code: name}` JSON object.
///
/// Keys are emitted in [`Metal::ALL`] order rather than sorted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetalTable;

impl MetalTable {
    pub fn len(&self) -> usize {
        Metal::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for MetalTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Metal::ALL.len()))?;
        for m in Metal::ALL {
            map.serialize_entry(m.code(), m.name())?;
        }
        map.end()
    }
}
