use crate::client::ObpClient;
use crate::error::ObpResult;
use crate::models::{SigningBasket, SigningBasketRequest};
use crate::request::{api_path, ApiRequest};

impl ObpClient {
    /// `POST /signing-baskets`
    pub async fn create_signing_basket(
        &self,
        basket: &SigningBasketRequest,
    ) -> ObpResult<Option<SigningBasket>> {
        let request = ApiRequest::post("/signing-baskets").with_body(basket)?;
        self.fetch_one(request).await
    }

    /// `GET /signing-baskets/{id}`
    pub async fn get_signing_basket(&self, basket_id: &str) -> ObpResult<Option<SigningBasket>> {
        self.fetch_one(ApiRequest::get(api_path(&["signing-baskets", basket_id])))
            .await
    }
}
