//! Service Request Model (客房服务)

use serde::{Deserialize, Serialize};

/// Service category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    RoomService,
    Laundry,
    Spa,
    Transport,
    Other,
}

/// Service request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceRequestStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceRequestStatus::Pending => "PENDING",
            ServiceRequestStatus::InProgress => "IN_PROGRESS",
            ServiceRequestStatus::Completed => "COMPLETED",
            ServiceRequestStatus::Cancelled => "CANCELLED",
        }
    }

    /// Terminal requests cannot be re-opened
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ServiceRequestStatus::Completed | ServiceRequestStatus::Cancelled
        )
    }
}

/// An ad hoc, priced service ordered during a stay, billed at check-out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ServiceRequest {
    pub id: String,
    pub booking_id: String,
    pub service_type: ServiceType,
    pub description: String,
    /// Amount owed for this service (cancelled requests bill zero)
    pub price: f64,
    pub status: ServiceRequestStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create service request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequestCreate {
    pub booking_id: String,
    pub service_type: ServiceType,
    pub description: String,
    pub price: f64,
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequestStatusUpdate {
    pub status: ServiceRequestStatus,
}
