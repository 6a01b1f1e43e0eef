use crate::error::PaymentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Externally assigned, unique identifier of a payment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn new(id: impl Into<String>) -> Result<Self, PaymentError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PaymentError::ValidationError(
                "Payment id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A non-negative monetary amount.
///
/// Values are normalized on construction, so `1000.0` and `1000` compare and
/// serialize the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(PaymentError::ValidationError(
                "Amount must not be negative".to_string(),
            ))
        } else {
            Ok(Self(value.normalize()))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "credit-card")]
    CreditCard,
    #[serde(rename = "paypal")]
    PayPal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit-card",
            PaymentMethod::PayPal => "paypal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "credit-card" => Ok(PaymentMethod::CreditCard),
            "paypal" => Ok(PaymentMethod::PayPal),
            other => Err(PaymentError::NoValidationRule(other.to_string())),
        }
    }
}

/// Lifecycle state of a payment.
///
/// ```text
/// Registered ──fail──► Failed ──revert──► Registered
///      └────succeed──► Paid
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentState {
    #[default]
    Registered,
    Failed,
    Paid,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Registered => "REGISTERED",
            PaymentState::Failed => "FAILED",
            PaymentState::Paid => "PAID",
        }
    }

    /// Paid admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentState::Paid)
    }

    /// Computes the next state and outcome for `trigger`.
    ///
    /// Total over every (state, trigger) pair. Amount and method changes are
    /// carried by the returned `Transition`, never applied here.
    pub fn on(self, trigger: &Trigger) -> Transition {
        use PaymentState::*;

        let (next, outcome, update) = match (self, trigger) {
            (Registered, Trigger::Fail) => (Failed, Outcome::Failed, None),
            (Registered, Trigger::Succeed) => (Paid, Outcome::Succeeded, None),
            (Registered, Trigger::Revert) => (Registered, Outcome::AlreadyRegistered, None),
            (Registered, Trigger::Update { amount, method }) => {
                (Registered, Outcome::Updated, Some((*amount, *method)))
            }
            (Failed, Trigger::Fail | Trigger::Succeed) => (Failed, Outcome::AlreadyFailed, None),
            (Failed, Trigger::Revert) => (Registered, Outcome::Reverted, None),
            (Failed, Trigger::Update { .. }) => (Failed, Outcome::CannotUpdateFailed, None),
            (Paid, Trigger::Update { .. }) => (Paid, Outcome::CannotUpdatePaid, None),
            (Paid, _) => (Paid, Outcome::AlreadyPaid, None),
        };

        Transition {
            next,
            outcome,
            update,
        }
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four actions a payment reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Fail,
    Succeed,
    Revert,
    Update {
        amount: Amount,
        method: PaymentMethod,
    },
}

/// Result of feeding a trigger to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: PaymentState,
    pub outcome: Outcome,
    pub update: Option<(Amount, PaymentMethod)>,
}

/// Human-readable result of a trigger. Soft rejections are outcomes too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Registered,
    Failed,
    Succeeded,
    Updated,
    Reverted,
    AlreadyRegistered,
    AlreadyFailed,
    AlreadyPaid,
    CannotUpdateFailed,
    CannotUpdatePaid,
}

impl Outcome {
    /// Whether the trigger mutated the payment.
    pub fn changed(&self) -> bool {
        matches!(
            self,
            Outcome::Registered
                | Outcome::Failed
                | Outcome::Succeeded
                | Outcome::Updated
                | Outcome::Reverted
        )
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Registered => "registered",
            Outcome::Failed => "failed",
            Outcome::Succeeded => "success",
            Outcome::Updated => "updated",
            Outcome::Reverted => "reverted",
            Outcome::AlreadyRegistered => "already registered",
            Outcome::AlreadyFailed => "already failed",
            Outcome::AlreadyPaid => "already paid",
            Outcome::CannotUpdateFailed => "cannot update a failed payment",
            Outcome::CannotUpdatePaid => "cannot update a paid payment",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A payment and its current lifecycle state.
///
/// Fields are private: after construction the record only changes through
/// [`Payment::apply`] or the trigger shorthands. The serialized `status`
/// label is the state itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    payment_id: PaymentId,
    amount: Amount,
    payment_method: PaymentMethod,
    #[serde(rename = "status")]
    state: PaymentState,
}

impl Payment {
    /// Creates a payment in the `Registered` state.
    pub fn new(payment_id: PaymentId, amount: Amount, payment_method: PaymentMethod) -> Self {
        Self {
            payment_id,
            amount,
            payment_method,
            state: PaymentState::Registered,
        }
    }

    /// Rebuilds a payment from its persisted record.
    pub fn from_record(payment_id: PaymentId, record: PaymentRecord) -> Self {
        Self {
            payment_id,
            amount: record.amount,
            payment_method: record.payment_method,
            state: record.status,
        }
    }

    pub fn id(&self) -> &PaymentId {
        &self.payment_id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn state(&self) -> PaymentState {
        self.state
    }

    /// Applies `trigger`, returning the resulting payment and outcome.
    pub fn apply(mut self, trigger: Trigger) -> (Self, Outcome) {
        let outcome = self.handle(trigger);
        (self, outcome)
    }

    pub fn fail(&mut self) -> Outcome {
        self.handle(Trigger::Fail)
    }

    pub fn succeed(&mut self) -> Outcome {
        self.handle(Trigger::Succeed)
    }

    pub fn revert(&mut self) -> Outcome {
        self.handle(Trigger::Revert)
    }

    pub fn update(&mut self, amount: Amount, method: PaymentMethod) -> Outcome {
        self.handle(Trigger::Update { amount, method })
    }

    fn handle(&mut self, trigger: Trigger) -> Outcome {
        let transition = self.state.on(&trigger);

        if let Some((amount, method)) = transition.update {
            self.amount = amount;
            self.payment_method = method;
        }

        if transition.next != self.state {
            tracing::debug!(
                payment_id = %self.payment_id,
                from = %self.state,
                to = %transition.next,
                "payment transition"
            );
            self.state = transition.next;
        }

        transition.outcome
    }
}

/// Flat persisted view of a payment, keyed externally by its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub amount: Amount,
    pub payment_method: PaymentMethod,
    pub status: PaymentState,
}

impl From<&Payment> for PaymentRecord {
    fn from(payment: &Payment) -> Self {
        Self {
            amount: payment.amount,
            payment_method: payment.payment_method,
            status: payment.state,
        }
    }
}
