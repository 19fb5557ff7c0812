#[cfg(not(target_arch = "wasm32"))]
pub mod ssr;

pub mod helpers {
    use crate::api::UserRecord;
    use crate::state::auth::AuthState;
    use leptos::*;

    pub fn sample_user() -> UserRecord {
        UserRecord {
            id: "u1".into(),
            full_name: "Alice Example".into(),
            email: "alice@example.com".into(),
            username: "alice".into(),
            avatar: None,
            cover_image: None,
        }
    }

    pub fn provide_auth(user: Option<UserRecord>, loading: bool) {
        let (auth, set_auth) = create_signal(AuthState { user, loading });
        provide_context((auth, set_auth));
    }
}
