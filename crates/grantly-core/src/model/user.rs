//! Directory users. Read-only: the provider exposes them as data sources.

use crate::error::Result;
use crate::reference::normalize_email;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

pub fn map_user(response: &UserResponse) -> Result<UserModel> {
    Ok(UserModel {
        id: response.id,
        email: normalize_email(&response.email),
        first_name: response.first_name.clone(),
        last_name: response.last_name.clone(),
        role: response.role.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_user_normalizes_email() {
        let response: UserResponse = serde_json::from_value(json!({
            "id": "d52a5f84-1f65-4a42-a7ff-78e4a2431f42",
            "email": "Jane.Doe@Corp.io",
            "first_name": "Jane",
            "role": "admin"
        }))
        .unwrap();
        let model = map_user(&response).unwrap();
        assert_eq!(model.email, "jane.doe@corp.io");
        assert_eq!(model.role.as_deref(), Some("admin"));
    }
}
