//! PIM assignment extraction from asset metadata.
//!
//! An asset document is expected to carry its metadata at
//! `jcr:content.metadata`, with the PIM links in two optional
//! comma-separated string fields. Nothing about that shape is
//! guaranteed, so extraction is a best-effort structural lookup that
//! yields empty lists on any mismatch, at any nesting level.

use serde_json::Value;

/// Metadata field holding the comma-separated PIM item numbers.
pub const ITEM_FIELD: &str = "edam:item-to-pim";

/// Metadata field holding the comma-separated PIM product numbers.
pub const PRODUCT_FIELD: &str = "edam:product-to-pim";

/// PIM product and item numbers an asset is assigned to.
///
/// Each list defaults to empty independently of the other. Order,
/// duplicates, and empty pieces are preserved as found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PimAssignments {
    pub products: Vec<String>,
    pub items: Vec<String>,
}

impl PimAssignments {
    /// True when the asset is assigned to no product and no item.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.items.is_empty()
    }

    /// Number of output rows this assignment set expands to.
    pub fn len(&self) -> usize {
        self.products.len() + self.items.len()
    }
}

/// Extract PIM assignments from an asset document.
///
/// Never fails: `None`, a non-object document, a missing
/// `jcr:content.metadata` path, or non-string fields all produce
/// empty lists.
pub fn pim_assignments(asset: Option<&Value>) -> PimAssignments {
    let metadata = asset
        .and_then(|doc| doc.get("jcr:content"))
        .and_then(|content| content.get("metadata"))
        .and_then(Value::as_object);

    let Some(metadata) = metadata else {
        return PimAssignments::default();
    };

    PimAssignments {
        products: split_id_list(metadata.get(PRODUCT_FIELD)),
        items: split_id_list(metadata.get(ITEM_FIELD)),
    }
}

/// Split a comma-separated identifier field, trimming each piece.
///
/// Non-string and absent values count as absent.
fn split_id_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_str)
        .map(|s| s.split(',').map(|piece| piece.trim().to_string()).collect())
        .unwrap_or_default()
}
