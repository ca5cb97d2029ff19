use serde::Deserialize;

/// `/api/toggle_watchlist` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FavoriteAck {
    /// Required: a body without it is malformed.
    pub success: bool,
    /// Server-confirmed membership, when the server reports it.
    #[serde(default, alias = "in_watchlist")]
    pub favorite: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_flag_is_required() {
        assert!(serde_json::from_str::<FavoriteAck>(r#"{"error": "x"}"#).is_err());

        let ack: FavoriteAck = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ack.success);
        assert_eq!(ack.favorite, None);

        let ack: FavoriteAck =
            serde_json::from_str(r#"{"success": true, "in_watchlist": false}"#).unwrap();
        assert_eq!(ack.favorite, Some(false));
    }
}
