//! Typed user actions emitted by the view layer.
//!
//! Rendered markup carries `data-action`, `data-product-id` and (for the
//! stepper) `data-delta` attributes. A view layer turns a click into an
//! [`Action`] either directly or by deserializing JSON such as
//! `{"action": "adjust_quantity", "product_id": 3, "delta": -1}`.

use fakestore_cart_core::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `data-action` values used in templates.
pub mod names {
    pub const ADD: &str = "add";
    pub const REMOVE: &str = "remove";
    pub const ADJUST_QUANTITY: &str = "adjust_quantity";
}

/// Error building an action from markup attributes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Action {0} requires a delta")]
    MissingDelta(String),
}

/// A user intent dispatched into the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Add one unit of a product.
    Add { product_id: ProductId },
    /// Remove a product's line entirely.
    Remove { product_id: ProductId },
    /// Change a line's quantity by `delta` (negative to decrease).
    AdjustQuantity { product_id: ProductId, delta: i32 },
}

impl Action {
    /// The product the action targets.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        match self {
            Self::Add { product_id }
            | Self::Remove { product_id }
            | Self::AdjustQuantity { product_id, .. } => *product_id,
        }
    }

    /// Build an action from the `data-*` attributes of a rendered control.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if `name` is unknown or a stepper has no delta.
    pub fn from_attributes(
        name: &str,
        product_id: ProductId,
        delta: Option<i32>,
    ) -> Result<Self, ActionError> {
        match name {
            names::ADD => Ok(Self::Add { product_id }),
            names::REMOVE => Ok(Self::Remove { product_id }),
            names::ADJUST_QUANTITY => delta
                .map(|delta| Self::AdjustQuantity { product_id, delta })
                .ok_or_else(|| ActionError::MissingDelta(name.to_string())),
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_json() {
        let action: Action =
            serde_json::from_str(r#"{"action":"adjust_quantity","product_id":3,"delta":-1}"#)
                .unwrap();
        assert_eq!(
            action,
            Action::AdjustQuantity {
                product_id: ProductId::new(3),
                delta: -1
            }
        );

        let action: Action = serde_json::from_str(r#"{"action":"add","product_id":7}"#).unwrap();
        assert_eq!(action.product_id(), ProductId::new(7));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!(serde_json::from_str::<Action>(r#"{"action":"checkout","product_id":1}"#).is_err());
    }

    #[test]
    fn test_from_attributes() {
        let id = ProductId::new(2);
        assert_eq!(
            Action::from_attributes("remove", id, None).unwrap(),
            Action::Remove { product_id: id }
        );
        assert_eq!(
            Action::from_attributes("adjust_quantity", id, None),
            Err(ActionError::MissingDelta("adjust_quantity".to_string()))
        );
        assert!(matches!(
            Action::from_attributes("buy", id, None),
            Err(ActionError::UnknownAction(_))
        ));
    }
}
