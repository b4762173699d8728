//! Invoice taxation strategy trait.
//!
//! A strategy encapsulates one complete tax computation (invoice, address
//! and rules) independent of any provider instance. Providers delegate to a
//! strategy through [`crate::TaxationGatewayProvider::calculate_tax_with_strategy`].

use async_trait::async_trait;

use crate::attempt::Attempt;
use crate::error::TaxationError;
use crate::models::InvoiceTaxResult;

/// Pluggable tax calculation unit.
///
/// Implementations may use static rate tables, remote tax services or
/// composite rules. They report failure through [`Attempt::Failed`] and never
/// return a partial result alongside a cause.
#[async_trait]
pub trait InvoiceTaxationStrategy: Send + Sync {
    /// Run the calculation.
    async fn calculate_taxes_for_invoice(&self) -> Attempt<InvoiceTaxResult>;
}

/// Runs a strategy and unwraps its attempt.
///
/// # Errors
///
/// Returns [`TaxationError::CalculationFailure`] carrying the strategy's cause
/// when the attempt failed. No zero or default result is substituted.
pub async fn run_strategy(
    strategy: &dyn InvoiceTaxationStrategy,
) -> Result<InvoiceTaxResult, TaxationError> {
    strategy
        .calculate_taxes_for_invoice()
        .await
        .into_result()
        .map_err(|cause| {
            tracing::warn!(error = %cause, "invoice taxation strategy failed");
            TaxationError::calculation_failure(cause)
        })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tracing_test::traced_test;
    use uuid::Uuid;

    struct FixedAttemptStrategy {
        fail_with: Option<&'static str>,
        result: InvoiceTaxResult,
    }

    #[async_trait]
    impl InvoiceTaxationStrategy for FixedAttemptStrategy {
        async fn calculate_taxes_for_invoice(&self) -> Attempt<InvoiceTaxResult> {
            match self.fail_with {
                Some(cause) => Attempt::fail(cause),
                None => Attempt::succeed(self.result.clone()),
            }
        }
    }

    fn result() -> InvoiceTaxResult {
        InvoiceTaxResult {
            invoice_key: Uuid::new_v4(),
            tax_method_key: Some(Uuid::new_v4()),
            taxable_amount: Decimal::new(10_000, 2),
            tax_rate: Decimal::new(7, 2),
            tax_amount: Decimal::new(700, 2),
        }
    }

    #[tokio::test]
    async fn success_returns_result_unchanged() {
        let expected = result();
        let strategy = FixedAttemptStrategy {
            fail_with: None,
            result: expected.clone(),
        };

        let actual = run_strategy(&strategy).await.unwrap();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    #[traced_test]
    async fn failure_is_converted_and_logged() {
        let strategy = FixedAttemptStrategy {
            fail_with: Some("address incomplete"),
            result: result(),
        };

        let err = run_strategy(&strategy).await.unwrap_err();
        assert!(matches!(err, TaxationError::CalculationFailure { .. }));
        assert!(err.to_string().contains("address incomplete"));
        assert!(logs_contain("invoice taxation strategy failed"));
    }
}
