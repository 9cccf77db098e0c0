use crate::client::ObpClient;
use crate::error::ObpResult;
use crate::models::{
    PaymentInitiation, PaymentInitiationResponse, PaymentService, PaymentStatusResponse,
};
use crate::request::{api_path, ApiRequest};

impl ObpClient {
    /// `POST /{service}/{product}`
    pub async fn initiate_payment(
        &self,
        service: PaymentService,
        product: &str,
        payment: &PaymentInitiation,
    ) -> ObpResult<Option<PaymentInitiationResponse>> {
        let request =
            ApiRequest::post(api_path(&[service.as_str(), product])).with_body(payment)?;
        self.fetch_one(request).await
    }

    /// `GET /{service}/{product}/{paymentId}/status`
    pub async fn get_payment_status(
        &self,
        service: PaymentService,
        product: &str,
        payment_id: &str,
    ) -> ObpResult<Option<PaymentStatusResponse>> {
        let request =
            ApiRequest::get(api_path(&[service.as_str(), product, payment_id, "status"]));
        self.fetch_one(request).await
    }
}
