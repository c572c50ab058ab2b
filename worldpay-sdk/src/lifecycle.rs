//! Order lifecycle.
//!
//! The gateway owns order state; this module only describes which operation is
//! valid in which [`OrderStatus`] and where it leads, so callers can check a
//! snapshot before issuing a call.
//!
//! ```text
//! create ──┬─► PRE_AUTHORIZED ──authorize3Ds──► SUCCESS ──refund──► (gateway-defined)
//!          ├─► AUTHORIZED ──capture──► SUCCESS
//!          │        └──────cancel───► CANCELLED
//!          └─► SUCCESS
//! ```
//!
//! The order services never consult this table: a snapshot can be stale, and the
//! gateway's state-conflict error is the authoritative answer.

use std::fmt;

use crate::{
    error::{Result, WorldpayError},
    model::{OrderRequest, OrderStatus},
};

/// Operation on an existing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Complete a 3-D Secure order.
    Authorize3Ds,
    /// Capture an authorized amount, fully or partially.
    Capture,
    /// Release an authorization.
    Cancel,
    /// Refund a paid order, fully or partially.
    Refund,
}

impl Operation {
    /// All operations.
    pub const ALL: [Self; 4] = [Self::Authorize3Ds, Self::Capture, Self::Cancel, Self::Refund];

    /// Status an order must be in for this operation.
    #[must_use]
    pub fn required_status(self) -> OrderStatus {
        match self {
            Self::Authorize3Ds => OrderStatus::PreAuthorized,
            Self::Capture | Self::Cancel => OrderStatus::Authorized,
            Self::Refund => OrderStatus::Success,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Authorize3Ds => "authorize3Ds",
            Self::Capture => "capture",
            Self::Cancel => "cancel",
            Self::Refund => "refund",
        })
    }
}

impl OrderStatus {
    /// Status a newly created order starts in.
    #[must_use]
    pub fn initial(request: &OrderRequest) -> Self {
        if request.is_3ds_order {
            Self::PreAuthorized
        } else if request.authorize_only {
            Self::Authorized
        } else {
            Self::Success
        }
    }

    /// Returns true if `operation` is valid in this status.
    #[must_use]
    pub fn permits(self, operation: Operation) -> bool {
        operation.required_status() == self
    }

    /// Status after a successful `operation`.
    ///
    /// `None` if the operation is not permitted here, or if the resulting status is
    /// up to the gateway (refunds).
    #[must_use]
    pub fn after(self, operation: Operation) -> Option<Self> {
        if !self.permits(operation) {
            return None;
        }
        match operation {
            Operation::Authorize3Ds | Operation::Capture => Some(Self::Success),
            Operation::Cancel => Some(Self::Cancelled),
            Operation::Refund => None,
        }
    }

    /// Returns true if no operation is valid in this status.
    #[must_use]
    pub fn is_final(self) -> bool {
        !Operation::ALL.iter().any(|op| self.permits(*op))
    }

    /// Checks a snapshot before issuing `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldpayError::Validation`] if the operation is not valid in this status.
    ///
    /// # Examples
    ///
    /// ```
    /// use worldpay_sdk::{lifecycle::Operation, model::OrderStatus};
    ///
    /// assert!(OrderStatus::Authorized.ensure_permits(Operation::Capture).is_ok());
    /// assert!(OrderStatus::Success.ensure_permits(Operation::Cancel).is_err());
    /// ```
    pub fn ensure_permits(self, operation: Operation) -> Result<()> {
        if self.permits(operation) {
            Ok(())
        } else {
            Err(WorldpayError::Validation(format!(
                "cannot {operation} an order in status {self}; requires {}",
                operation.required_status()
            )))
        }
    }
}
