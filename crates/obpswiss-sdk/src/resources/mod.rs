//! Resource operations
//!
//! Thin methods on [`ObpClient`](crate::ObpClient), one per endpoint. Each
//! builds an [`ApiRequest`](crate::ApiRequest), runs it through the request
//! core and unwraps the body:
//!
//! - list endpoints return the named array field, empty when missing
//! - single-resource endpoints return `None` when the bank sent no body
//! - deletes return `true` once the call succeeded
//!
//! Errors are never caught here.

mod accounts;
mod authorisations;
mod consents;
mod funds;
mod payments;
mod signing_baskets;
