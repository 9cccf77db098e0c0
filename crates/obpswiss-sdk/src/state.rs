//! Consent, SCA and payment status model
//!
//! The bank is authoritative for every transition. These types let callers
//! inspect a status before using a consent and sanity-check what they
//! observe; the client never blocks a call on its own.
//!
//! ```text
//! Consent:        received ──► partiallyAuthorised ──► valid ──► expired
//!                    │                  │                 └────► revokedByPsu / revoked
//!                    └──────────────────┴──► rejected
//!                 (any non-terminal) ──► terminatedByTpp   (client delete)
//!
//! Authorisation:  received/started ──► psuIdentified ──► psuAuthenticated
//!                 ──► scaMethodSelected ──► unconfirmed ──► finalised
//!                 (any non-terminal) ──► failed
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A status change the protocol does not allow
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal {resource} status transition: {from} -> {to}")]
pub struct TransitionError {
    pub resource: &'static str,
    pub from: String,
    pub to: String,
}

// ============================================================================
// Consent status
// ============================================================================

/// Lifecycle state of a consent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConsentStatus {
    /// Created, not yet authorised
    Received,
    /// Some but not all required authorisations completed
    PartiallyAuthorised,
    /// Granted; the only state usable for data access
    Valid,
    Rejected,
    Expired,
    /// Withdrawn by the account holder
    RevokedByPsu,
    /// Withdrawn, as reported by banks using the short name
    Revoked,
    /// Deleted by the client
    TerminatedByTpp,
    /// Status string this client does not know
    Other(String),
}

impl ConsentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Received => "received",
            Self::PartiallyAuthorised => "partiallyAuthorised",
            Self::Valid => "valid",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
            Self::RevokedByPsu => "revokedByPsu",
            Self::Revoked => "revoked",
            Self::TerminatedByTpp => "terminatedByTpp",
            Self::Other(s) => s,
        }
    }

    /// Usable for account and payment data operations
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected
                | Self::Expired
                | Self::RevokedByPsu
                | Self::Revoked
                | Self::TerminatedByTpp
        )
    }

    /// Still waiting on authorisation
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Received | Self::PartiallyAuthorised)
    }

    /// Whether the protocol allows moving from `self` to `next`
    ///
    /// Unknown statuses are accepted on either side unless `self` is terminal.
    pub fn can_transition_to(&self, next: &ConsentStatus) -> bool {
        use ConsentStatus::*;

        if self.is_terminal() || self == next {
            return false;
        }
        match (self, next) {
            (Other(_), _) | (_, Other(_)) => true,
            (_, TerminatedByTpp) => true,
            (Received, Valid | Rejected | PartiallyAuthorised) => true,
            (PartiallyAuthorised, Valid | Rejected) => true,
            (Valid, Expired | RevokedByPsu | Revoked) => true,
            _ => false,
        }
    }

    /// Accept an observed status change; an unchanged status is fine
    pub fn check_transition(&self, next: &ConsentStatus) -> Result<(), TransitionError> {
        if self == next || self.can_transition_to(next) {
            Ok(())
        } else {
            Err(TransitionError {
                resource: "consent",
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl FromStr for ConsentStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "received" => Self::Received,
            "partiallyAuthorised" => Self::PartiallyAuthorised,
            "valid" => Self::Valid,
            "rejected" => Self::Rejected,
            "expired" => Self::Expired,
            "revokedByPsu" => Self::RevokedByPsu,
            "revoked" => Self::Revoked,
            "terminatedByTpp" => Self::TerminatedByTpp,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for ConsentStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<ConsentStatus> for String {
    fn from(status: ConsentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SCA status
// ============================================================================

/// Progress of one authorisation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScaStatus {
    Received,
    Started,
    PsuIdentified,
    PsuAuthenticated,
    ScaMethodSelected,
    Unconfirmed,
    Finalised,
    /// `finalised` in US spelling, kept as sent
    Finalized,
    Failed,
    /// SCA not required by the bank
    Exempted,
    Other(String),
}

impl ScaStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Received => "received",
            Self::Started => "started",
            Self::PsuIdentified => "psuIdentified",
            Self::PsuAuthenticated => "psuAuthenticated",
            Self::ScaMethodSelected => "scaMethodSelected",
            Self::Unconfirmed => "unconfirmed",
            Self::Finalised => "finalised",
            Self::Finalized => "finalized",
            Self::Failed => "failed",
            Self::Exempted => "exempted",
            Self::Other(s) => s,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Finalised | Self::Finalized | Self::Failed | Self::Exempted
        )
    }

    /// Terminal and successful
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Finalised | Self::Finalized | Self::Exempted)
    }

    /// Position in the forward flow; `None` for terminal and unknown
    fn stage(&self) -> Option<u8> {
        match self {
            Self::Received => Some(0),
            Self::Started => Some(1),
            Self::PsuIdentified => Some(2),
            Self::PsuAuthenticated => Some(3),
            Self::ScaMethodSelected => Some(4),
            Self::Unconfirmed => Some(5),
            _ => None,
        }
    }

    /// Non-terminal statuses move forward or end; terminal ones never move
    pub fn can_transition_to(&self, next: &ScaStatus) -> bool {
        if self.is_terminal() || self == next {
            return false;
        }
        if next.is_terminal() {
            return true;
        }
        match (self.stage(), next.stage()) {
            (Some(from), Some(to)) => to > from,
            _ => true,
        }
    }

    pub fn check_transition(&self, next: &ScaStatus) -> Result<(), TransitionError> {
        if self == next || self.can_transition_to(next) {
            Ok(())
        } else {
            Err(TransitionError {
                resource: "authorisation",
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl FromStr for ScaStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "received" => Self::Received,
            "started" => Self::Started,
            "psuIdentified" => Self::PsuIdentified,
            "psuAuthenticated" => Self::PsuAuthenticated,
            "scaMethodSelected" => Self::ScaMethodSelected,
            "unconfirmed" => Self::Unconfirmed,
            "finalised" => Self::Finalised,
            "finalized" => Self::Finalized,
            "failed" => Self::Failed,
            "exempted" => Self::Exempted,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for ScaStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<ScaStatus> for String {
    fn from(status: ScaStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ScaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True iff at least one authorisation exists and all of them succeeded
pub fn authorisations_complete<'a, I>(statuses: I) -> bool
where
    I: IntoIterator<Item = &'a ScaStatus>,
{
    let mut any = false;
    for status in statuses {
        if !status.is_success() {
            return false;
        }
        any = true;
    }
    any
}

// ============================================================================
// Payment transaction status (ISO 20022)
// ============================================================================

/// Payment status code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    /// RCVD
    Received,
    /// PDNG
    Pending,
    /// PATC: partially accepted, more authorisations needed
    PartiallyAcceptedTechnical,
    /// ACTC
    AcceptedTechnical,
    /// ACFC
    AcceptedFundsChecked,
    /// ACSP
    AcceptedSettlementInProcess,
    /// ACWC
    AcceptedWithChange,
    /// ACWP
    AcceptedWithoutPosting,
    /// ACSC
    AcceptedSettlementCompleted,
    /// ACCC
    AcceptedCreditSettlementCompleted,
    /// PART
    PartiallyAccepted,
    /// RJCT
    Rejected,
    /// CANC
    Cancelled,
    Other(String),
}

impl TransactionStatus {
    pub fn code(&self) -> &str {
        match self {
            Self::Received => "RCVD",
            Self::Pending => "PDNG",
            Self::PartiallyAcceptedTechnical => "PATC",
            Self::AcceptedTechnical => "ACTC",
            Self::AcceptedFundsChecked => "ACFC",
            Self::AcceptedSettlementInProcess => "ACSP",
            Self::AcceptedWithChange => "ACWC",
            Self::AcceptedWithoutPosting => "ACWP",
            Self::AcceptedSettlementCompleted => "ACSC",
            Self::AcceptedCreditSettlementCompleted => "ACCC",
            Self::PartiallyAccepted => "PART",
            Self::Rejected => "RJCT",
            Self::Cancelled => "CANC",
            Self::Other(s) => s,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Received => "Received",
            Self::Pending => "Pending",
            Self::PartiallyAcceptedTechnical => "Partially accepted (awaiting authorisation)",
            Self::AcceptedTechnical => "Accepted (technical validation)",
            Self::AcceptedFundsChecked => "Accepted (funds checked)",
            Self::AcceptedSettlementInProcess => "Accepted (settlement in process)",
            Self::AcceptedWithChange => "Accepted with change",
            Self::AcceptedWithoutPosting => "Accepted without posting",
            Self::AcceptedSettlementCompleted => "Settlement completed",
            Self::AcceptedCreditSettlementCompleted => "Credit settlement completed",
            Self::PartiallyAccepted => "Partially accepted",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
            Self::Other(s) => s,
        }
    }

    /// Finalized by the bank
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::AcceptedSettlementCompleted
                | Self::AcceptedCreditSettlementCompleted
                | Self::Rejected
                | Self::Cancelled
        )
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            Self::AcceptedTechnical
                | Self::AcceptedFundsChecked
                | Self::AcceptedSettlementInProcess
                | Self::AcceptedWithChange
                | Self::AcceptedWithoutPosting
                | Self::AcceptedSettlementCompleted
                | Self::AcceptedCreditSettlementCompleted
        )
    }
}

impl FromStr for TransactionStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "RCVD" => Self::Received,
            "PDNG" => Self::Pending,
            "PATC" => Self::PartiallyAcceptedTechnical,
            "ACTC" => Self::AcceptedTechnical,
            "ACFC" => Self::AcceptedFundsChecked,
            "ACSP" => Self::AcceptedSettlementInProcess,
            "ACWC" => Self::AcceptedWithChange,
            "ACWP" => Self::AcceptedWithoutPosting,
            "ACSC" => Self::AcceptedSettlementCompleted,
            "ACCC" => Self::AcceptedCreditSettlementCompleted,
            "PART" => Self::PartiallyAccepted,
            "RJCT" => Self::Rejected,
            "CANC" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for TransactionStatus {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.code().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_status_parsing() {
        assert_eq!("valid".parse::<ConsentStatus>().unwrap(), ConsentStatus::Valid);
        assert_eq!("revoked".parse::<ConsentStatus>().unwrap(), ConsentStatus::Revoked);
        assert_eq!(
            "somethingNew".parse::<ConsentStatus>().unwrap(),
            ConsentStatus::Other("somethingNew".to_string())
        );
    }

    #[test]
    fn test_consent_status_serde() {
        let status: ConsentStatus = serde_json::from_str("\"received\"").unwrap();
        assert_eq!(status, ConsentStatus::Received);
        assert_eq!(serde_json::to_string(&ConsentStatus::RevokedByPsu).unwrap(), "\"revokedByPsu\"");

        let unknown: ConsentStatus = serde_json::from_str("\"frozen\"").unwrap();
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"frozen\"");
    }

    #[test]
    fn test_status_spellings_round_trip_as_sent() {
        for raw in ["\"revoked\"", "\"revokedByPsu\""] {
            let status: ConsentStatus = serde_json::from_str(raw).unwrap();
            assert!(status.is_terminal());
            assert_eq!(serde_json::to_string(&status).unwrap(), raw);
        }
        for raw in ["\"finalised\"", "\"finalized\""] {
            let status: ScaStatus = serde_json::from_str(raw).unwrap();
            assert!(status.is_success());
            assert_eq!(serde_json::to_string(&status).unwrap(), raw);
        }
    }

    #[test]
    fn test_only_valid_is_usable() {
        let all = [
            ConsentStatus::Received,
            ConsentStatus::PartiallyAuthorised,
            ConsentStatus::Valid,
            ConsentStatus::Rejected,
            ConsentStatus::Expired,
            ConsentStatus::RevokedByPsu,
            ConsentStatus::Revoked,
            ConsentStatus::TerminatedByTpp,
            ConsentStatus::Other("x".into()),
        ];
        let usable: Vec<_> = all.iter().filter(|s| s.is_usable()).collect();
        assert_eq!(usable, vec![&ConsentStatus::Valid]);
    }

    #[test]
    fn test_consent_transitions() {
        use ConsentStatus::*;

        assert!(Received.can_transition_to(&Valid));
        assert!(Received.can_transition_to(&Rejected));
        assert!(Received.can_transition_to(&PartiallyAuthorised));
        assert!(PartiallyAuthorised.can_transition_to(&Valid));
        assert!(Valid.can_transition_to(&Expired));
        assert!(Valid.can_transition_to(&RevokedByPsu));
        assert!(Valid.can_transition_to(&Revoked));
        assert!(Valid.can_transition_to(&TerminatedByTpp));

        assert!(!Received.can_transition_to(&Expired));
        assert!(!Valid.can_transition_to(&Received));
        assert!(!Valid.can_transition_to(&Rejected));
    }

    #[test]
    fn test_terminal_consents_never_move() {
        use ConsentStatus::*;

        for terminal in [Rejected, Expired, RevokedByPsu, Revoked, TerminatedByTpp] {
            assert!(terminal.is_terminal());
            for next in [Received, Valid, Expired, TerminatedByTpp, Other("x".into())] {
                assert!(!terminal.can_transition_to(&next));
            }
        }
    }

    #[test]
    fn test_consent_check_transition() {
        assert!(ConsentStatus::Valid.check_transition(&ConsentStatus::Valid).is_ok());
        let err = ConsentStatus::Expired
            .check_transition(&ConsentStatus::Valid)
            .unwrap_err();
        assert_eq!(err.to_string(), "illegal consent status transition: expired -> valid");
    }

    #[test]
    fn test_sca_flow() {
        use ScaStatus::*;

        assert!(Started.can_transition_to(&PsuIdentified));
        assert!(PsuIdentified.can_transition_to(&ScaMethodSelected));
        assert!(ScaMethodSelected.can_transition_to(&Finalised));
        assert!(Started.can_transition_to(&Failed));
        assert!(PsuAuthenticated.can_transition_to(&Failed));

        assert!(!ScaMethodSelected.can_transition_to(&Started));
        assert!(!Finalised.can_transition_to(&Failed));
        assert!(!Finalized.can_transition_to(&Started));
        assert!(!Failed.can_transition_to(&Started));

        assert!(Finalised.is_success());
        assert!(Exempted.is_success());
        assert!(!Failed.is_success());
        assert!(Failed.is_terminal());
    }

    #[test]
    fn test_sca_check_transition_error() {
        let err = ScaStatus::Failed
            .check_transition(&ScaStatus::Finalised)
            .unwrap_err();
        assert_eq!(err.resource, "authorisation");
        assert_eq!(err.from, "failed");
        assert_eq!(err.to, "finalised");
    }

    #[test]
    fn test_authorisations_complete() {
        assert!(!authorisations_complete(&Vec::<ScaStatus>::new()));
        assert!(authorisations_complete(&[ScaStatus::Finalised]));
        assert!(authorisations_complete(&[ScaStatus::Finalised, ScaStatus::Exempted]));
        assert!(authorisations_complete(&[ScaStatus::Finalized]));
        assert!(!authorisations_complete(&[ScaStatus::Finalised, ScaStatus::Started]));
        assert!(!authorisations_complete(&[ScaStatus::Failed]));
    }

    #[test]
    fn test_transaction_status_codes() {
        let status: TransactionStatus = serde_json::from_str("\"ACSC\"").unwrap();
        assert_eq!(status, TransactionStatus::AcceptedSettlementCompleted);
        assert!(status.is_terminal());
        assert!(status.is_accepted());

        let rcvd: TransactionStatus = "RCVD".parse().unwrap();
        assert!(!rcvd.is_terminal());
        assert!(TransactionStatus::Rejected.is_rejected());
        assert_eq!(serde_json::to_string(&TransactionStatus::Pending).unwrap(), "\"PDNG\"");
    }
}
