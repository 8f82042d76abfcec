use serde::{Deserialize, Serialize};

/// Profile returned to the authenticated user.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub nickname: String,
    pub profile_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct NicknameQuery {
    pub nickname: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// Confirmation returned after account soft-deletion.
#[derive(Debug, Serialize)]
pub struct DeletedUserResponse {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_null_url() {
        let profile = ProfileResponse {
            nickname: "tester".into(),
            profile_url: None,
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"profile_url\":null"));
    }

    #[test]
    fn availability_serialization() {
        let json = serde_json::to_string(&AvailabilityResponse { available: true }).unwrap();
        assert_eq!(json, "{\"available\":true}");
    }
}
