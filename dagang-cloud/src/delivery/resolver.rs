//! Delivery config resolution
//!
//! Picks the single applicable config among a store's active candidates.
//! The lookup strategy is an explicit tagged value derived from caller
//! intent rather than an implicit fallback chain, so a variant-scoped
//! request can never silently land on a product-level config.

use shared::models::delivery::DeliveryConfig;
use uuid::Uuid;

/// Lookup strategy for selecting a delivery config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveBy {
    /// Exact variant config; never falls back to the product level
    Variant(Uuid),
    /// Product-level default (`variant_id IS NULL`), falling back to any
    /// config of the product for legacy data
    ProductDefault(Uuid),
    /// First active config of the store (degraded/legacy mode)
    Any,
}

impl ResolveBy {
    /// Derive the strategy from optional query parameters
    pub fn from_params(product_id: Option<Uuid>, variant_id: Option<Uuid>) -> Self {
        match (variant_id, product_id) {
            (Some(v), _) => Self::Variant(v),
            (None, Some(p)) => Self::ProductDefault(p),
            (None, None) => Self::Any,
        }
    }
}

/// Select one config among the candidates, or `None` for not-configured
///
/// Candidates are expected in storage order; ties resolve to the first
/// match.
pub fn select<'a>(candidates: &'a [DeliveryConfig], by: ResolveBy) -> Option<&'a DeliveryConfig> {
    match by {
        ResolveBy::Variant(v) => candidates.iter().find(|c| c.variant_id == Some(v)),
        ResolveBy::ProductDefault(p) => candidates
            .iter()
            .find(|c| c.product_id == Some(p) && c.variant_id.is_none())
            .or_else(|| candidates.iter().find(|c| c.product_id == Some(p))),
        ResolveBy::Any => candidates.first(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::delivery::{ConfigStatus, DeliveryType};

    fn config(product_id: Option<Uuid>, variant_id: Option<Uuid>) -> DeliveryConfig {
        DeliveryConfig {
            id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            product_id,
            variant_id,
            config_type: DeliveryType::Account.as_db().to_string(),
            status: ConfigStatus::Active.as_db().to_string(),
            account_data: "a,b".to_string(),
            template_id: None,
            use_ai: false,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_variant_match_wins_over_product_default() {
        let p = Uuid::new_v4();
        let v = Uuid::new_v4();
        let candidates = vec![config(Some(p), None), config(Some(p), Some(v))];

        let picked = select(&candidates, ResolveBy::Variant(v)).unwrap();
        assert_eq!(picked.variant_id, Some(v));
    }

    #[test]
    fn test_variant_never_falls_back() {
        let p = Uuid::new_v4();
        let candidates = vec![config(Some(p), None)];

        assert!(select(&candidates, ResolveBy::Variant(Uuid::new_v4())).is_none());
    }

    #[test]
    fn test_product_default_prefers_null_variant() {
        let p = Uuid::new_v4();
        let v = Uuid::new_v4();
        let candidates = vec![config(Some(p), Some(v)), config(Some(p), None)];

        let picked = select(&candidates, ResolveBy::ProductDefault(p)).unwrap();
        assert!(picked.variant_id.is_none());
    }

    #[test]
    fn test_product_default_falls_back_to_any_of_product() {
        let p = Uuid::new_v4();
        let v = Uuid::new_v4();
        let other = config(Some(Uuid::new_v4()), None);
        let candidates = vec![other, config(Some(p), Some(v))];

        let picked = select(&candidates, ResolveBy::ProductDefault(p)).unwrap();
        assert_eq!(picked.product_id, Some(p));
        assert_eq!(picked.variant_id, Some(v));
    }

    #[test]
    fn test_product_default_without_configs_is_none() {
        let candidates = vec![config(Some(Uuid::new_v4()), None)];
        assert!(select(&candidates, ResolveBy::ProductDefault(Uuid::new_v4())).is_none());
    }

    #[test]
    fn test_any_takes_first_in_storage_order() {
        let first = config(Some(Uuid::new_v4()), None);
        let first_id = first.id;
        let candidates = vec![first, config(None, None)];

        assert_eq!(select(&candidates, ResolveBy::Any).unwrap().id, first_id);
        assert!(select(&[], ResolveBy::Any).is_none());
    }

    #[test]
    fn test_strategy_derivation() {
        let p = Uuid::new_v4();
        let v = Uuid::new_v4();
        assert_eq!(ResolveBy::from_params(Some(p), Some(v)), ResolveBy::Variant(v));
        assert_eq!(ResolveBy::from_params(None, Some(v)), ResolveBy::Variant(v));
        assert_eq!(
            ResolveBy::from_params(Some(p), None),
            ResolveBy::ProductDefault(p)
        );
        assert_eq!(ResolveBy::from_params(None, None), ResolveBy::Any);
    }
}
