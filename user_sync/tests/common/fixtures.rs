use user_sync::{Principal, StaticSession};

/// Principal fixtures for sync flows
pub struct TestPrincipals;

impl TestPrincipals {
    /// A principal with a full profile and no username
    pub fn jane() -> Principal {
        Principal {
            id: "user_2jane".to_string(),
            email_addresses: vec!["jane@example.com".to_string()],
            username: None,
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            image_url: Some("https://img.example.com/jane.png".to_string()),
        }
    }

    /// A principal with a username and a plus-addressed email
    pub fn bob() -> Principal {
        Principal {
            id: "user_2bob".to_string(),
            email_addresses: vec![
                "bob+cms@example.com".to_string(),
                "bob@work.example.com".to_string(),
            ],
            username: Some("bobby".to_string()),
            first_name: None,
            last_name: None,
            image_url: None,
        }
    }
}

pub fn free_session(principal: Principal) -> StaticSession {
    StaticSession::signed_in(principal)
}

pub fn pro_session(principal: Principal) -> StaticSession {
    StaticSession::signed_in(principal).with_plans(["pro"])
}
