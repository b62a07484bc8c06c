//! Inventory ledger parsing and consumption
//!
//! A ledger is a comma-separated, ordered sequence of opaque deliverable
//! items stored in a single text column. Insertion order is delivery order
//! (FIFO). A string that is empty, or contains only commas and whitespace,
//! is logically empty.

/// Outcome of taking items from the front of a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTake {
    /// Items handed out, in ledger order
    pub delivered: Vec<String>,
    /// Items left after the take, in ledger order
    pub remainder: Vec<String>,
}

impl LedgerTake {
    /// Delivered items re-joined as the payload string
    pub fn payload(&self) -> String {
        self.delivered.join(",")
    }

    /// Remainder re-joined for persistence
    pub fn remainder_string(&self) -> String {
        self.remainder.join(",")
    }

    /// Whether the take drained the ledger
    pub fn exhausted(&self) -> bool {
        self.remainder.is_empty()
    }
}

/// Parse a raw ledger string into ordered, trimmed, non-empty items
pub fn parse(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether the raw ledger holds no deliverable items
pub fn is_empty(raw: &str) -> bool {
    raw.split(',').all(|s| s.trim().is_empty())
}

/// Take up to `qty` items off the front; consumed count is `min(qty, len)`
pub fn take(items: Vec<String>, qty: usize) -> LedgerTake {
    let n = qty.min(items.len());
    let mut delivered = items;
    let remainder = delivered.split_off(n);
    LedgerTake {
        delivered,
        remainder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(raw: &str) -> Vec<String> {
        parse(raw)
    }

    #[test]
    fn test_parse_trims_and_drops_empties() {
        assert_eq!(parse("a, b ,,c,"), vec!["a", "b", "c"]);
        assert_eq!(parse("single"), vec!["single"]);
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_empty_ledger_shapes() {
        for raw in ["", ",", " , ", " ,,  , "] {
            assert!(is_empty(raw), "expected {raw:?} to be empty");
            assert!(parse(raw).is_empty());
        }
        assert!(!is_empty(" x ,"));
    }

    #[test]
    fn test_take_consumes_min_of_qty_and_len() {
        let t = take(items("a,b,c"), 2);
        assert_eq!(t.delivered, vec!["a", "b"]);
        assert_eq!(t.remainder, vec!["c"]);
        assert!(!t.exhausted());

        // qty beyond length caps at length
        let t = take(items("a,b,c"), 10);
        assert_eq!(t.delivered, vec!["a", "b", "c"]);
        assert!(t.exhausted());
    }

    #[test]
    fn test_take_preserves_fifo_order() {
        let t = take(items("first,second,third,fourth"), 3);
        assert_eq!(t.payload(), "first,second,third");
        assert_eq!(t.remainder_string(), "fourth");
    }

    #[test]
    fn test_single_item_no_comma_is_consumable() {
        let t = take(items("only-one"), 1);
        assert_eq!(t.payload(), "only-one");
        assert_eq!(t.remainder_string(), "");
        assert!(t.exhausted());
    }
}
