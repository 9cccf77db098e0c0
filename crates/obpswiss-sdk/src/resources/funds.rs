use crate::client::ObpClient;
use crate::error::ObpResult;
use crate::models::{FundsConfirmation, FundsConfirmationRequest};
use crate::request::ApiRequest;

impl ObpClient {
    /// `POST /funds-confirmations`
    pub async fn confirm_funds(
        &self,
        confirmation: &FundsConfirmationRequest,
    ) -> ObpResult<Option<FundsConfirmation>> {
        let request = ApiRequest::post("/funds-confirmations").with_body(confirmation)?;
        self.fetch_one(request).await
    }
}
