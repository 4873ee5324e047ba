use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub pic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

/// Body of a successful `POST /session`.
/// `identifier` is the value sent back as the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub identifier: String,
    pub username: String,
    #[serde(default)]
    pub pic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login_response() {
        let json = r#"{"identifier":"12","username":"maria","pic":"data:image/png;base64,AAAA"}"#;
        let resp: LoginResponse = serde_json::from_str(json).expect("Failed to parse login test JSON");
        assert_eq!(resp.identifier, "12");
        assert_eq!(resp.username, "maria");
    }

    #[test]
    fn test_parse_user_without_pic() {
        let user: User = serde_json::from_str(r#"{"id":3,"username":"luca"}"#).unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.pic, "");
    }
}
