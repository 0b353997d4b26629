// ============================================================
// MOVE BATCH TYPES
// ============================================================
// Wire shape of the payload sent to the items-move endpoint

use serde::{Deserialize, Serialize};

/// Headers a merge CSV must carry, in the order they are reported when missing.
pub const REQUIRED_HEADERS: [&str; 3] = ["sku", "skuToReplace", "retainSku"];

/// `retainSku` value meaning "keep the metadata of `sku` itself".
pub const RETAIN_SELF: &str = "sku";

/// One merge instruction: fold `sku_to_replace` into `sku`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub sku: String,
    pub sku_to_replace: String,
    pub retain_sku: String,
}

impl MoveRecord {
    /// Build a record from already-trimmed values.
    ///
    /// A `retain_sku` equal to `sku` (exact, case-sensitive) collapses to
    /// [`RETAIN_SELF`]; anything else is kept verbatim.
    pub fn new(sku: &str, sku_to_replace: &str, retain_sku: &str) -> Self {
        let retain_sku = if retain_sku == sku {
            RETAIN_SELF
        } else {
            retain_sku
        };

        Self {
            sku: sku.to_string(),
            sku_to_replace: sku_to_replace.to_string(),
            retain_sku: retain_sku.to_string(),
        }
    }

    /// Whether this record keeps the metadata of `sku` itself.
    pub fn retains_self(&self) -> bool {
        self.retain_sku == RETAIN_SELF
    }
}

/// Payload for a single items-move request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveBatch {
    /// Passed through untouched; its meaning belongs to the upstream API.
    #[serde(default)]
    pub force: bool,

    /// Moves in CSV row order.
    pub moves: Vec<MoveRecord>,
}

impl MoveBatch {
    pub fn new(force: bool, moves: Vec<MoveRecord>) -> Self {
        Self { force, moves }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
