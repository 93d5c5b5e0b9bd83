//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::CategoryNotFound
            | Self::MenuItemNotFound
            | Self::OrderNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::CategorySlugExists
            | Self::CategoryHasMenuItems
            | Self::MenuItemInUse
            | Self::UsernameExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleRequired
            | Self::AdminRequired
            | Self::NotOrderOwner
            | Self::NotAssignedCrew => StatusCode::FORBIDDEN,

            // 500 Internal Server Error
            Self::Unknown
            | Self::OrderPlacementFailed
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation / business rules, including the
            // menu item title uniqueness check)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::MenuItemTitleExists
            | Self::InvalidPrice
            | Self::CartEmpty
            | Self::InvalidQuantity
            | Self::OrderIdRequired
            | Self::EmptyOrderUpdate
            | Self::NotGroupMember
            | Self::NotDeliveryCrew => StatusCode::BAD_REQUEST,
        }
    }
}
