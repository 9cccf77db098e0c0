use crate::client::ObpClient;
use crate::error::ObpResult;
use crate::models::{Consent, ConsentRequest, ConsentStatusResponse};
use crate::request::{api_path, ApiRequest};

impl ObpClient {
    /// `POST /consents`
    ///
    /// A new consent starts out `received`; the bank expects an authorisation
    /// before it becomes `valid`.
    pub async fn create_consent(&self, consent: &ConsentRequest) -> ObpResult<Option<Consent>> {
        let request = ApiRequest::post("/consents").with_body(consent)?;
        self.fetch_one(request).await
    }

    /// `GET /consents/{id}`
    pub async fn get_consent(&self, consent_id: &str) -> ObpResult<Option<Consent>> {
        self.fetch_one(ApiRequest::get(api_path(&["consents", consent_id])))
            .await
    }

    /// `GET /consents/{id}/status`
    pub async fn get_consent_status(
        &self,
        consent_id: &str,
    ) -> ObpResult<Option<ConsentStatusResponse>> {
        self.fetch_one(ApiRequest::get(api_path(&["consents", consent_id, "status"])))
            .await
    }

    /// `DELETE /consents/{id}`
    ///
    /// Returns `true` on any 2xx; the body, if any, is ignored.
    pub async fn delete_consent(&self, consent_id: &str) -> ObpResult<bool> {
        self.execute(ApiRequest::delete(api_path(&["consents", consent_id])))
            .await?;
        Ok(true)
    }
}
