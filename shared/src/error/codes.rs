//! Unified error codes for the Little Lemon backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Catalog errors (categories, menu items)
//! - 4xxx: Cart errors
//! - 5xxx: Order errors
//! - 6xxx: User / group errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Serialized as a plain `u16` so clients can switch on the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Caller lacks the required role
    RoleRequired = 2002,
    /// Admin privileges required
    AdminRequired = 2003,
    /// Order belongs to another customer
    NotOrderOwner = 2004,
    /// Order is not assigned to this delivery crew member
    NotAssignedCrew = 2005,

    // ==================== 3xxx: Catalog ====================
    /// Category not found
    CategoryNotFound = 3001,
    /// Category slug already taken
    CategorySlugExists = 3002,
    /// Category still referenced by menu items
    CategoryHasMenuItems = 3003,
    /// Menu item not found
    MenuItemNotFound = 3101,
    /// Menu item title already taken
    MenuItemTitleExists = 3102,
    /// Price is not a positive decimal with 2 places
    InvalidPrice = 3103,
    /// Menu item is referenced by placed orders
    MenuItemInUse = 3104,

    // ==================== 4xxx: Cart ====================
    /// Cart has no lines
    CartEmpty = 4001,
    /// Quantity must be at least 1
    InvalidQuantity = 4002,

    // ==================== 5xxx: Order ====================
    /// Order not found
    OrderNotFound = 5001,
    /// An order id is required for this operation
    OrderIdRequired = 5002,
    /// Order placement failed and was rolled back
    OrderPlacementFailed = 5003,
    /// Nothing to update
    EmptyOrderUpdate = 5004,

    // ==================== 6xxx: User / Group ====================
    /// User not found
    UserNotFound = 6001,
    /// Username already taken
    UsernameExists = 6002,
    /// User is not a member of the group
    NotGroupMember = 6003,
    /// Target user is not delivery crew
    NotDeliveryCrew = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication credentials were not provided",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Token has expired",
            ErrorCode::TokenInvalid => "Token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "You do not have permission to perform this action",
            ErrorCode::RoleRequired => "Required role is missing",
            ErrorCode::AdminRequired => "Admin privileges required",
            ErrorCode::NotOrderOwner => "This order belongs to another customer",
            ErrorCode::NotAssignedCrew => "This order is not assigned to you",

            // Catalog
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategorySlugExists => "Category slug already exists",
            ErrorCode::CategoryHasMenuItems => "Category still has menu items",
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemTitleExists => "Menu item with this title already exists",
            ErrorCode::InvalidPrice => "Price must be a positive amount with at most 2 decimals",
            ErrorCode::MenuItemInUse => "Menu item is referenced by existing orders",

            // Cart
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::InvalidQuantity => "Quantity must be at least 1",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderIdRequired => "You must specify an order",
            ErrorCode::OrderPlacementFailed => "Order could not be placed",
            ErrorCode::EmptyOrderUpdate => "No updatable order field supplied",

            // User / Group
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UsernameExists => "Username already exists",
            ErrorCode::NotGroupMember => "User does not belong to this group",
            ErrorCode::NotDeliveryCrew => "User is not a delivery crew member",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::NotOrderOwner),
            2005 => Ok(ErrorCode::NotAssignedCrew),

            // Catalog
            3001 => Ok(ErrorCode::CategoryNotFound),
            3002 => Ok(ErrorCode::CategorySlugExists),
            3003 => Ok(ErrorCode::CategoryHasMenuItems),
            3101 => Ok(ErrorCode::MenuItemNotFound),
            3102 => Ok(ErrorCode::MenuItemTitleExists),
            3103 => Ok(ErrorCode::InvalidPrice),
            3104 => Ok(ErrorCode::MenuItemInUse),

            // Cart
            4001 => Ok(ErrorCode::CartEmpty),
            4002 => Ok(ErrorCode::InvalidQuantity),

            // Order
            5001 => Ok(ErrorCode::OrderNotFound),
            5002 => Ok(ErrorCode::OrderIdRequired),
            5003 => Ok(ErrorCode::OrderPlacementFailed),
            5004 => Ok(ErrorCode::EmptyOrderUpdate),

            // User / Group
            6001 => Ok(ErrorCode::UserNotFound),
            6002 => Ok(ErrorCode::UsernameExists),
            6003 => Ok(ErrorCode::NotGroupMember),
            6004 => Ok(ErrorCode::NotDeliveryCrew),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::NotOrderOwner.code(), 2004);
        assert_eq!(ErrorCode::MenuItemNotFound.code(), 3101);
        assert_eq!(ErrorCode::CartEmpty.code(), 4001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 5001);
        assert_eq!(ErrorCode::NotGroupMember.code(), 6003);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::RequiredField,
            ErrorCode::ValueOutOfRange,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::PermissionDenied,
            ErrorCode::RoleRequired,
            ErrorCode::AdminRequired,
            ErrorCode::NotOrderOwner,
            ErrorCode::NotAssignedCrew,
            ErrorCode::CategoryNotFound,
            ErrorCode::CategorySlugExists,
            ErrorCode::CategoryHasMenuItems,
            ErrorCode::MenuItemNotFound,
            ErrorCode::MenuItemTitleExists,
            ErrorCode::InvalidPrice,
            ErrorCode::MenuItemInUse,
            ErrorCode::CartEmpty,
            ErrorCode::InvalidQuantity,
            ErrorCode::OrderNotFound,
            ErrorCode::OrderIdRequired,
            ErrorCode::OrderPlacementFailed,
            ErrorCode::EmptyOrderUpdate,
            ErrorCode::UserNotFound,
            ErrorCode::UsernameExists,
            ErrorCode::NotGroupMember,
            ErrorCode::NotDeliveryCrew,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::ConfigError,
        ];

        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "5001");

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::CartEmpty);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::OrderIdRequired.message(), "You must specify an order");
        assert_eq!(ErrorCode::CartEmpty.message(), "Cart is empty");
    }
}
