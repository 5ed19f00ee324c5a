//! Wire types for the answer service.
//!
//! The request body field names are fixed by the remote service; the
//! response carries no envelope at all — the raw body bytes, concatenated,
//! are the answer text.

use serde::Serialize;

/// JSON request payload for one exchange.
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub user_input: &'a str,
    pub unique_session_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_the_service_field_names() {
        let request = AskRequest {
            user_input: "hi",
            unique_session_id: "abc-123",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["user_input"], "hi");
        assert_eq!(json["unique_session_id"], "abc-123");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
