// User entity

use serde::{Deserialize, Serialize};

use crate::value_objects::CompanyId;

/// Row as stored in the `app_users` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredentials {
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub company_id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    pub role: String,
    pub company_id: CompanyId,
}

impl From<&UserCredentials> for UserProfile {
    fn from(user: &UserCredentials) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            company_id: user.company_id,
        }
    }
}
