use serde_json::Value;

use crate::client::{decode_one, take_field, ObpClient};
use crate::error::ObpResult;
use crate::models::{
    Account, AccountListParams, Balance, Transaction, TransactionList, TransactionParams,
};
use crate::request::{api_path, ApiRequest};

impl ObpClient {
    /// `GET /accounts`
    pub async fn list_accounts(&self, params: &AccountListParams) -> ObpResult<Vec<Account>> {
        let request = ApiRequest::get("/accounts").with_query(params)?;
        self.fetch_list(request, "accounts").await
    }

    /// `GET /accounts/{id}`
    pub async fn get_account(&self, account_id: &str) -> ObpResult<Option<Account>> {
        let request = ApiRequest::get(api_path(&["accounts", account_id]));
        let data = self.execute(request).await?;
        decode_one(unwrap_envelope(data, "account"))
    }

    /// `GET /accounts/{id}/balances`
    pub async fn get_account_balances(&self, account_id: &str) -> ObpResult<Vec<Balance>> {
        let request = ApiRequest::get(api_path(&["accounts", account_id, "balances"]));
        self.fetch_list(request, "balances").await
    }

    /// `GET /accounts/{id}/transactions`
    ///
    /// Accepts a flat `transactions` array or a `{ booked, pending }` report;
    /// the latter comes back booked entries first.
    pub async fn list_account_transactions(
        &self,
        account_id: &str,
        params: &TransactionParams,
    ) -> ObpResult<Vec<Transaction>> {
        let request = ApiRequest::get(api_path(&["accounts", account_id, "transactions"]))
            .with_query(params)?;
        let data = self.execute(request).await?;
        match take_field(data, "transactions") {
            None => Ok(Vec::new()),
            Some(list) => Ok(serde_json::from_value::<TransactionList>(list)?.into_vec()),
        }
    }

    /// `GET /accounts/{id}/transactions/{transactionId}`
    pub async fn get_transaction(
        &self,
        account_id: &str,
        transaction_id: &str,
    ) -> ObpResult<Option<Transaction>> {
        let request = ApiRequest::get(api_path(&[
            "accounts",
            account_id,
            "transactions",
            transaction_id,
        ]));
        let data = self.execute(request).await?;
        decode_one(unwrap_envelope(data, "transactionsDetails"))
    }
}

/// Some banks wrap a single resource in `{ "<key>": {...} }`
fn unwrap_envelope(data: Option<Value>, key: &str) -> Option<Value> {
    match data {
        Some(Value::Object(mut map))
            if map.len() == 1 && map.get(key).map_or(false, Value::is_object) =>
        {
            map.remove(key)
        }
        other => other,
    }
}
