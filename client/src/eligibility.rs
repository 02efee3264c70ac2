//! # Purchase Eligibility
//!
//! Pure decision function for the buy button: given the current user (if
//! any) and a product record, decide whether the purchase is allowed and
//! why not. Re-evaluated whenever either input changes; never cached across
//! a product refresh.

use shared::Product;

/// Why a purchase is (not) allowed. Order of the checks matters: an
/// already-sold product reports `AlreadySold` even to its own seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityReason {
    /// No user is logged in.
    NotAuthenticated,
    /// The product already has a buyer.
    AlreadySold,
    /// The current user is the seller.
    IsOwner,
    /// Purchase allowed.
    Ok,
}

/// Verdict of [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseEligibility {
    pub can_buy: bool,
    pub reason: EligibilityReason,
}

impl PurchaseEligibility {
    /// User-facing explanation for a blocked purchase, `None` when allowed.
    pub fn message(&self) -> Option<&'static str> {
        match self.reason {
            EligibilityReason::NotAuthenticated => Some("You must log in to buy this product"),
            EligibilityReason::AlreadySold => Some("This product has already been sold"),
            EligibilityReason::IsOwner => Some("You cannot buy your own product"),
            EligibilityReason::Ok => None,
        }
    }
}

/// Decide whether `current_user_id` may buy `product`.
///
/// First match wins: not-authenticated, then already-sold, then own-product.
pub fn evaluate(current_user_id: Option<i64>, product: &Product) -> PurchaseEligibility {
    let reason = match current_user_id {
        None => EligibilityReason::NotAuthenticated,
        Some(user_id) => {
            if product.buyer_id.is_some() {
                EligibilityReason::AlreadySold
            } else if product.seller_id == Some(user_id) {
                EligibilityReason::IsOwner
            } else {
                EligibilityReason::Ok
            }
        }
    };

    PurchaseEligibility {
        can_buy: reason == EligibilityReason::Ok,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(seller_id: Option<i64>, buyer_id: Option<i64>) -> Product {
        Product {
            id: 1,
            title: "Lamp".to_string(),
            description: None,
            price: 15.0,
            category: None,
            seller_id,
            buyer_id,
            date: None,
        }
    }

    #[test]
    fn test_anonymous_user_is_always_blocked() {
        for product in [
            product(Some(7), None),
            product(Some(7), Some(3)),
            product(None, None),
        ] {
            let verdict = evaluate(None, &product);
            assert!(!verdict.can_buy);
            assert_eq!(verdict.reason, EligibilityReason::NotAuthenticated);
        }
    }

    #[test]
    fn test_sold_check_precedes_owner_check() {
        // seller looking at their own sold product: sold wins
        let verdict = evaluate(Some(7), &product(Some(7), Some(3)));
        assert_eq!(verdict.reason, EligibilityReason::AlreadySold);

        // owner check only fires when the product is unsold
        let verdict = evaluate(Some(7), &product(Some(7), None));
        assert_eq!(verdict.reason, EligibilityReason::IsOwner);
        assert!(!verdict.can_buy);
    }

    #[test]
    fn test_other_users_may_buy_unsold_products() {
        let verdict = evaluate(Some(4), &product(Some(7), None));
        assert!(verdict.can_buy);
        assert_eq!(verdict.reason, EligibilityReason::Ok);
        assert_eq!(verdict.message(), None);
    }

    #[test]
    fn test_blocked_verdicts_carry_a_message() {
        assert!(evaluate(None, &product(Some(7), None)).message().is_some());
        assert!(evaluate(Some(2), &product(Some(7), Some(3)))
            .message()
            .is_some());
    }
}
