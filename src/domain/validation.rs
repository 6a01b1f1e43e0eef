//! Per-method rules deciding whether a registered payment may be paid.
//!
//! The credit-card rule is global: at most one credit-card payment may be
//! outstanding (`Registered`) system-wide, so every strategy receives the full
//! set of known payments rather than a single record.

use super::payment::{Amount, Payment, PaymentId, PaymentMethod, PaymentState};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;

/// Exclusive upper bound for credit-card amounts.
pub const CREDIT_CARD_LIMIT: Decimal = dec!(10000);
/// Exclusive upper bound for PayPal amounts.
pub const PAYPAL_LIMIT: Decimal = dec!(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStrategy {
    CreditCard,
    PayPal,
}

/// Why a payment attempt was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    AmountLimitExceeded { limit: Decimal },
    OutstandingRegistration { other: PaymentId },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::AmountLimitExceeded { limit } => {
                write!(f, "amount must be lower than {}", limit)
            }
            Rejection::OutstandingRegistration { other } => {
                write!(f, "payment {} is already registered with this method", other)
            }
        }
    }
}

impl ValidationStrategy {
    pub fn for_method(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::CreditCard => ValidationStrategy::CreditCard,
            PaymentMethod::PayPal => ValidationStrategy::PayPal,
        }
    }

    /// Resolves a raw method label. Unknown methods have no strategy.
    pub fn lookup(method: &str) -> Option<Self> {
        method.parse::<PaymentMethod>().ok().map(Self::for_method)
    }

    pub fn validate(&self, payment_id: &PaymentId, amount: Amount, payments: &[Payment]) -> bool {
        self.check(payment_id, amount, payments).is_ok()
    }

    pub fn check(
        &self,
        payment_id: &PaymentId,
        amount: Amount,
        payments: &[Payment],
    ) -> Result<(), Rejection> {
        match self {
            ValidationStrategy::CreditCard => {
                if amount.value() >= CREDIT_CARD_LIMIT {
                    return Err(Rejection::AmountLimitExceeded {
                        limit: CREDIT_CARD_LIMIT,
                    });
                }

                let outstanding = payments.iter().find(|p| {
                    let is_self = p.id() == payment_id;
                    !is_self
                        && p.method() == PaymentMethod::CreditCard
                        && p.state() == PaymentState::Registered
                });

                match outstanding {
                    Some(other) => Err(Rejection::OutstandingRegistration {
                        other: other.id().clone(),
                    }),
                    None => Ok(()),
                }
            }
            ValidationStrategy::PayPal => {
                if amount.value() >= PAYPAL_LIMIT {
                    Err(Rejection::AmountLimitExceeded {
                        limit: PAYPAL_LIMIT,
                    })
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PaymentId {
        PaymentId::new(s).unwrap()
    }

    fn amount(value: Decimal) -> Amount {
        Amount::new(value).unwrap()
    }

    fn registered(s: &str, method: PaymentMethod) -> Payment {
        Payment::new(id(s), amount(dec!(500)), method)
    }

    #[test]
    fn test_paypal_limit() {
        let strategy = ValidationStrategy::PayPal;
        assert!(strategy.validate(&id("new"), amount(dec!(4999.99)), &[]));
        assert!(!strategy.validate(&id("new"), amount(dec!(5000)), &[]));
        assert!(!strategy.validate(&id("new"), amount(dec!(5000.01)), &[]));
    }

    #[test]
    fn test_paypal_ignores_other_payments() {
        let others = vec![
            registered("a", PaymentMethod::PayPal),
            registered("b", PaymentMethod::CreditCard),
        ];
        assert!(ValidationStrategy::PayPal.validate(&id("new"), amount(dec!(4999.99)), &others));
    }

    #[test]
    fn test_credit_card_limit() {
        let strategy = ValidationStrategy::CreditCard;
        assert!(strategy.validate(&id("new"), amount(dec!(9999.99)), &[]));
        assert_eq!(
            strategy.check(&id("new"), amount(dec!(10000)), &[]),
            Err(Rejection::AmountLimitExceeded {
                limit: CREDIT_CARD_LIMIT
            })
        );
        assert!(!strategy.validate(&id("new"), amount(dec!(10000.01)), &[]));
    }

    #[test]
    fn test_credit_card_outstanding_registration() {
        let others = vec![registered("existing", PaymentMethod::CreditCard)];
        assert_eq!(
            ValidationStrategy::CreditCard.check(&id("new"), amount(dec!(100)), &others),
            Err(Rejection::OutstandingRegistration {
                other: id("existing")
            })
        );
    }

    #[test]
    fn test_credit_card_excludes_itself() {
        let all = vec![registered("new", PaymentMethod::CreditCard)];
        assert!(ValidationStrategy::CreditCard.validate(&id("new"), amount(dec!(100)), &all));
    }

    #[test]
    fn test_credit_card_ignores_other_methods_and_states() {
        let mut paid = registered("paid", PaymentMethod::CreditCard);
        paid.succeed();
        let mut failed = registered("failed", PaymentMethod::CreditCard);
        failed.fail();
        let all = vec![registered("pp", PaymentMethod::PayPal), paid, failed];
        assert!(ValidationStrategy::CreditCard.validate(&id("new"), amount(dec!(100)), &all));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(
            ValidationStrategy::lookup("credit-card"),
            Some(ValidationStrategy::CreditCard)
        );
        assert_eq!(
            ValidationStrategy::lookup("paypal"),
            Some(ValidationStrategy::PayPal)
        );
        assert_eq!(ValidationStrategy::lookup("cash"), None);
    }

    #[test]
    fn test_rejection_display() {
        let r = Rejection::AmountLimitExceeded {
            limit: PAYPAL_LIMIT,
        };
        assert_eq!(r.to_string(), "amount must be lower than 5000");
    }
}
