use crate::domain::command::{Command, CommandType};
use crate::domain::payment::{Amount, Outcome, Payment, PaymentId, PaymentMethod, PaymentState};
use crate::domain::ports::PaymentStoreBox;
use crate::domain::validation::{Rejection, ValidationStrategy};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::fmt;
use tokio::sync::Mutex;

/// What happened when a payment was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayOutcome {
    /// Validation passed and the payment moved to `Paid`.
    Paid(Outcome),
    /// Validation refused the attempt and the payment moved to `Failed`.
    Rejected { reason: Rejection, outcome: Outcome },
    /// The payment was not `Registered`; nothing changed.
    NotPayable(PaymentState),
}

impl fmt::Display for PayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayOutcome::Paid(outcome) => write!(f, "{}", outcome),
            PayOutcome::Rejected { reason, outcome } => write!(f, "{}: {}", outcome, reason),
            PayOutcome::NotPayable(state) => write!(f, "payment is in state {}", state),
        }
    }
}

/// The orchestrator sitting between callers and the payment core.
///
/// `PaymentService` owns the storage backend. Every read-validate-transition-persist
/// sequence runs under one service-wide lock, so two concurrent attempts cannot both
/// observe "no outstanding credit-card registration".
pub struct PaymentService {
    store: PaymentStoreBox,
    guard: Mutex<()>,
}

impl PaymentService {
    /// Creates a new `PaymentService` over the given store.
    pub fn new(store: PaymentStoreBox) -> Self {
        Self {
            store,
            guard: Mutex::new(()),
        }
    }

    /// Records a new payment in the `Registered` state.
    pub async fn register(&self, payment_id: &str, amount: Decimal, method: &str) -> Result<Outcome> {
        let payment_id = PaymentId::new(payment_id)?;
        let method = resolve_method(method)?;
        let amount = Amount::new(amount)?;

        let _guard = self.guard.lock().await;
        if self.store.get(&payment_id).await?.is_some() {
            return Err(PaymentError::AlreadyExists(payment_id.to_string()));
        }

        self.store
            .put(Payment::new(payment_id, amount, method))
            .await?;
        Ok(Outcome::Registered)
    }

    /// Validates a registered payment against its method's rule and settles it.
    pub async fn pay(&self, payment_id: &str) -> Result<PayOutcome> {
        let payment_id = PaymentId::new(payment_id)?;

        let _guard = self.guard.lock().await;
        let mut payment = self.load(&payment_id).await?;
        if payment.state() != PaymentState::Registered {
            tracing::warn!(%payment_id, state = %payment.state(), "payment is not payable");
            return Ok(PayOutcome::NotPayable(payment.state()));
        }

        let all = self.store.list_all().await?;
        let strategy = ValidationStrategy::for_method(payment.method());

        let result = match strategy.check(&payment_id, payment.amount(), &all) {
            Ok(()) => PayOutcome::Paid(payment.succeed()),
            Err(reason) => {
                tracing::warn!(%payment_id, %reason, "payment rejected");
                let outcome = payment.fail();
                PayOutcome::Rejected { reason, outcome }
            }
        };

        self.store.put(payment).await?;
        Ok(result)
    }

    /// Overwrites amount and method of a registered payment.
    pub async fn update(&self, payment_id: &str, amount: Decimal, method: &str) -> Result<Outcome> {
        let payment_id = PaymentId::new(payment_id)?;
        let method = resolve_method(method)?;
        let amount = Amount::new(amount)?;

        let _guard = self.guard.lock().await;
        let mut payment = self.load(&payment_id).await?;
        let outcome = payment.update(amount, method);
        if outcome.changed() {
            self.store.put(payment).await?;
        }
        Ok(outcome)
    }

    /// Moves a failed payment back to `Registered`.
    pub async fn revert(&self, payment_id: &str) -> Result<Outcome> {
        let payment_id = PaymentId::new(payment_id)?;

        let _guard = self.guard.lock().await;
        let mut payment = self.load(&payment_id).await?;
        let outcome = payment.revert();
        if outcome.changed() {
            self.store.put(payment).await?;
        }
        Ok(outcome)
    }

    pub async fn get(&self, payment_id: &str) -> Result<Option<Payment>> {
        let payment_id = PaymentId::new(payment_id)?;
        self.store.get(&payment_id).await
    }

    /// All known payments, sorted by id.
    pub async fn list(&self) -> Result<Vec<Payment>> {
        let mut payments = self.store.list_all().await?;
        payments.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(payments)
    }

    /// Dispatches a command and returns its outcome text.
    pub async fn process_command(&self, cmd: Command) -> Result<String> {
        let message = match cmd.r#type {
            CommandType::Register => {
                let (amount, method) = required_fields(&cmd)?;
                self.register(&cmd.payment_id, amount, method).await?.to_string()
            }
            CommandType::Pay => self.pay(&cmd.payment_id).await?.to_string(),
            CommandType::Update => {
                let (amount, method) = required_fields(&cmd)?;
                self.update(&cmd.payment_id, amount, method).await?.to_string()
            }
            CommandType::Revert => self.revert(&cmd.payment_id).await?.to_string(),
        };

        tracing::info!(
            payment_id = %cmd.payment_id,
            command = ?cmd.r#type,
            outcome = %message,
            "command processed"
        );
        Ok(message)
    }

    /// Consumes the service and returns the final state of all payments.
    pub async fn into_results(self) -> Result<Vec<Payment>> {
        self.list().await
    }

    async fn load(&self, payment_id: &PaymentId) -> Result<Payment> {
        self.store
            .get(payment_id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))
    }
}

fn resolve_method(method: &str) -> Result<PaymentMethod> {
    ValidationStrategy::lookup(method)
        .ok_or_else(|| PaymentError::NoValidationRule(method.to_string()))?;
    method.parse()
}

fn required_fields(cmd: &Command) -> Result<(Decimal, &str)> {
    let amount = cmd.amount.ok_or_else(|| {
        PaymentError::InvalidCommand(format!("{:?} requires an amount", cmd.r#type))
    })?;
    let method = cmd.payment_method.as_deref().ok_or_else(|| {
        PaymentError::InvalidCommand(format!("{:?} requires a payment method", cmd.r#type))
    })?;
    Ok((amount, method))
}
