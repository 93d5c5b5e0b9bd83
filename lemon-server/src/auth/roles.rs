//! Role predicates
//!
//! Roles are group memberships. Every predicate is a pure function of the
//! caller's identity; an anonymous caller fails all of them.
//!
//! | Predicate | Holds when |
//! |-----------|------------|
//! | [`is_customer`] | authenticated |
//! | [`is_manager`] | member of "Manager" |
//! | [`is_delivery_crew`] | member of "Delivery Crew" |
//! | [`is_admin`] | user record has the admin flag |
//! | [`can_manage`] | manager or admin |

use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::UserInfo;

use crate::security_log;

/// The three roles and their backing groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Customer,
    Manager,
    DeliveryCrew,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Customer, Role::Manager, Role::DeliveryCrew];

    pub fn group_name(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Manager => "Manager",
            Self::DeliveryCrew => "Delivery Crew",
        }
    }
}

/// Authenticated caller with memberships loaded for this request
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub groups: Vec<String>,
}

impl From<UserInfo> for CurrentUser {
    fn from(info: UserInfo) -> Self {
        Self {
            id: info.id,
            username: info.username,
            email: info.email,
            is_admin: info.is_admin,
            groups: info.groups,
        }
    }
}

impl From<CurrentUser> for UserInfo {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            groups: user.groups,
        }
    }
}

impl CurrentUser {
    pub fn in_group(&self, role: Role) -> bool {
        self.groups.iter().any(|g| g == role.group_name())
    }

    pub fn is_manager(&self) -> bool {
        self.in_group(Role::Manager)
    }

    pub fn is_delivery_crew(&self) -> bool {
        self.in_group(Role::DeliveryCrew)
    }

    pub fn can_manage(&self) -> bool {
        self.is_admin || self.is_manager()
    }

    pub fn role_view(&self) -> RoleView {
        RoleView::of(self)
    }
}

/// Caller identity as seen by the predicates
#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Anonymous,
    Authenticated(CurrentUser),
}

impl Identity {
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}

pub fn is_customer(identity: &Identity) -> bool {
    identity.user().is_some()
}

pub fn is_manager(identity: &Identity) -> bool {
    identity.user().is_some_and(CurrentUser::is_manager)
}

pub fn is_delivery_crew(identity: &Identity) -> bool {
    identity.user().is_some_and(CurrentUser::is_delivery_crew)
}

pub fn is_admin(identity: &Identity) -> bool {
    identity.user().is_some_and(|u| u.is_admin)
}

pub fn can_manage(identity: &Identity) -> bool {
    identity.user().is_some_and(CurrentUser::can_manage)
}

/// Holds if the identity has any of the listed roles
pub fn is_any_of(identity: &Identity, roles: &[Role]) -> bool {
    roles.iter().any(|role| match role {
        Role::Customer => is_customer(identity),
        Role::Manager => is_manager(identity),
        Role::DeliveryCrew => is_delivery_crew(identity),
    })
}

/// Role-dependent view of a caller, checked in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleView {
    /// Manager or admin
    Manager,
    DeliveryCrew(i64),
    Customer(i64),
}

impl RoleView {
    pub fn of(user: &CurrentUser) -> Self {
        if user.can_manage() {
            Self::Manager
        } else if user.is_delivery_crew() {
            Self::DeliveryCrew(user.id)
        } else {
            Self::Customer(user.id)
        }
    }
}

// ==================== Guards ====================

fn denied(user: &CurrentUser, required: &'static str, code: ErrorCode) -> AppError {
    security_log!(
        "WARN",
        "permission_denied",
        user_id = user.id,
        username = user.username.as_str(),
        required = required
    );
    AppError::new(code)
}

/// Any authenticated caller; hands back the user
pub fn require_customer(identity: Identity) -> Result<CurrentUser, AppError> {
    match identity {
        Identity::Authenticated(user) => Ok(user),
        Identity::Anonymous => {
            security_log!("WARN", "auth_missing", required = "customer");
            Err(AppError::not_authenticated())
        }
    }
}

/// Manager group or admin
pub fn require_manage(user: &CurrentUser) -> Result<(), AppError> {
    if can_manage(&Identity::Authenticated(user.clone())) {
        Ok(())
    } else {
        Err(denied(user, "manager", ErrorCode::RoleRequired))
    }
}

pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if is_admin(&Identity::Authenticated(user.clone())) {
        Ok(())
    } else {
        Err(denied(user, "admin", ErrorCode::AdminRequired))
    }
}
