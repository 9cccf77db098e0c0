use crate::client::ObpClient;
use crate::error::ObpResult;
use crate::models::{Authorisation, AuthorisationUpdate};
use crate::request::{api_path, ApiRequest};

impl ObpClient {
    /// `POST /consents/{id}/authorisations`
    ///
    /// Starts an SCA attempt. An empty update is sent as `{}`.
    pub async fn create_authorisation(
        &self,
        consent_id: &str,
        update: &AuthorisationUpdate,
    ) -> ObpResult<Option<Authorisation>> {
        let request = ApiRequest::post(api_path(&["consents", consent_id, "authorisations"]))
            .with_body(update)?;
        self.fetch_one(request).await
    }

    /// `GET /consents/{id}/authorisations`: ids of every SCA attempt
    pub async fn list_authorisations(&self, consent_id: &str) -> ObpResult<Vec<String>> {
        let request = ApiRequest::get(api_path(&["consents", consent_id, "authorisations"]));
        self.fetch_list(request, "authorisationIds").await
    }

    /// `GET /consents/{id}/authorisations/{authId}`
    pub async fn get_authorisation(
        &self,
        consent_id: &str,
        authorisation_id: &str,
    ) -> ObpResult<Option<Authorisation>> {
        let request = ApiRequest::get(api_path(&[
            "consents",
            consent_id,
            "authorisations",
            authorisation_id,
        ]));
        self.fetch_one(request).await
    }

    /// `PUT /consents/{id}/authorisations/{authId}`
    ///
    /// Submits password, method choice or OTP. Legality of the resulting SCA
    /// transition is the bank's call.
    pub async fn update_authorisation(
        &self,
        consent_id: &str,
        authorisation_id: &str,
        update: &AuthorisationUpdate,
    ) -> ObpResult<Option<Authorisation>> {
        let request = ApiRequest::put(api_path(&[
            "consents",
            consent_id,
            "authorisations",
            authorisation_id,
        ]))
        .with_body(update)?;
        self.fetch_one(request).await
    }
}
