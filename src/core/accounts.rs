use crate::config::toml_config::FundingConfig;
use crate::domain::model::{AccountApplication, ApplicationOverrides, JournalEntry};
use crate::domain::ports::BrokerageProvider;
use crate::utils::error::{Result, ServiceError};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

/// Builds the application for a request body: object bodies may replace
/// whole sections of the sandbox applicant, anything else is ignored.
pub fn build_application(body: &Value, signed_at: &str) -> Result<AccountApplication> {
    let application = AccountApplication::sandbox_applicant(signed_at);

    let Value::Object(_) = body else {
        return Ok(application);
    };

    let overrides: ApplicationOverrides =
        serde_json::from_value(body.clone()).map_err(|e| ServiceError::ValidationError {
            message: format!("Invalid account application: {}", e),
        })?;

    if overrides.is_empty() {
        tracing::debug!("No application sections in request body, using sandbox applicant");
    }
    Ok(overrides.apply(application))
}

pub struct AccountService {
    brokerage: Arc<dyn BrokerageProvider>,
    funding: Option<FundingConfig>,
}

impl AccountService {
    pub fn new(brokerage: Arc<dyn BrokerageProvider>, funding: Option<FundingConfig>) -> Self {
        Self { brokerage, funding }
    }

    /// 建立帳戶並原樣回傳券商的 JSON（包含錯誤內容）
    pub async fn open_account(&self, body: &Value) -> Result<Value> {
        let signed_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let application = build_application(body, &signed_at)?;

        tracing::info!("🏦 Submitting account application");
        let response = self.brokerage.create_account(&application).await?;

        if let Some(funding) = &self.funding {
            self.fund_account(funding, &response).await;
        }

        Ok(response)
    }

    /// 入金失敗只記錄，不影響開戶結果
    async fn fund_account(&self, funding: &FundingConfig, account: &Value) {
        let Some(account_id) = account.get("id").and_then(Value::as_str) else {
            tracing::warn!("⚠️ Account response has no id, skipping funding journal");
            return;
        };

        let journal = JournalEntry::cash(&funding.firm_account_id, account_id, &funding.amount);
        match self.brokerage.create_journal(&journal).await {
            Ok(result) => {
                let status = result.get("status").and_then(Value::as_str).unwrap_or("unknown");
                tracing::info!(
                    "💵 Journal {} of {} into {}: {}",
                    journal.entry_type,
                    journal.amount,
                    account_id,
                    status
                );
            }
            Err(e) => tracing::warn!("⚠️ Funding journal for {} failed: {}", account_id, e),
        }
    }
}
