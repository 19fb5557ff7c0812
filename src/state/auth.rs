use std::cell::RefCell;

use leptos::*;

use crate::api::{ApiClient, ApiError, LoginRequest, SignupForm, UserRecord};
use crate::session;

pub type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Single source of truth for "is the current user signed in", consumed by
/// views and the route guard.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserRecord>,
    pub loading: bool,
}

impl AuthState {
    /// Authenticated exactly when a user record is present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

thread_local! {
    static BROADCAST: RefCell<Option<WriteSignal<AuthState>>> = const { RefCell::new(None) };
}

/// Publishes a refresh outcome into the live provider, if any. The refresh
/// coordinator runs below the component tree and cannot reach the context.
pub(crate) fn broadcast_signed_in(user: UserRecord) {
    if let Some(writer) = BROADCAST.with(|slot| *slot.borrow()) {
        let _ = writer.try_update(|state| state.user = Some(user));
    }
}

pub(crate) fn broadcast_signed_out() {
    if let Some(writer) = BROADCAST.with(|slot| *slot.borrow()) {
        let _ = writer.try_update(|state| {
            state.user = None;
            state.loading = false;
        });
    }
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState {
        user: None,
        loading: true,
    });
    BROADCAST.with(|slot| *slot.borrow_mut() = Some(set_auth_state));

    let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    spawn_local(async move {
        initialize_session(&api_client, set_auth_state).await;
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// Startup check. With no stored access token the state settles
/// unauthenticated without touching the network; otherwise the current-user
/// endpoint decides, with the client wrapper transparently refreshing once
/// on 401. `loading` turns false only after this settles.
pub async fn initialize_session(api: &ApiClient, set_auth: WriteSignal<AuthState>) {
    let stored = session::load_session();
    if stored.access_token.is_none() {
        settle(set_auth, None);
        return;
    }
    match api.current_user().await {
        Ok(user) => {
            if let Err(err) = session::store_user(&user) {
                log::warn!("failed to cache user record: {err}");
            }
            settle(set_auth, Some(user));
        }
        Err(err) => {
            log::warn!("startup session check failed: {err}");
            session::clear_session();
            settle(set_auth, None);
        }
    }
}

fn settle(set_auth: WriteSignal<AuthState>, user: Option<UserRecord>) {
    let _ = set_auth.try_update(|state| {
        state.user = user;
        state.loading = false;
    });
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_auth: WriteSignal<AuthState>,
) -> Result<UserRecord, ApiError> {
    let _ = set_auth.try_update(|state| state.loading = true);
    match api.login(&request).await {
        Ok(user) => {
            settle(set_auth, Some(user.clone()));
            Ok(user)
        }
        Err(error) => {
            let _ = set_auth.try_update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Signup is informational: the created account signs in explicitly
/// afterwards, so the session state is left untouched.
pub async fn signup_request(form: SignupForm, api: &ApiClient) -> Result<UserRecord, ApiError> {
    api.register(form).await
}

/// Never fails from the caller's perspective: the backend call is
/// best-effort and local state is cleared regardless.
pub async fn logout_request(api: &ApiClient, set_auth: WriteSignal<AuthState>) {
    api.logout().await;
    settle(set_auth, None);
}

pub async fn forgot_password_request(email: String, api: &ApiClient) -> Result<(), ApiError> {
    api.forgot_password(&email).await
}

pub fn use_login_action() -> Action<LoginRequest, Result<UserRecord, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

pub fn use_signup_action() -> Action<SignupForm, Result<UserRecord, ApiError>> {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |form: &SignupForm| {
        let form = form.clone();
        let api = api.clone();
        async move { signup_request(form, &api).await }
    })
}

pub fn use_logout_action() -> Action<(), ()> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |_: &()| {
        let api = api.clone();
        async move { logout_request(&api, set_auth).await }
    })
}

pub fn use_forgot_password_action() -> Action<String, Result<(), ApiError>> {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    create_action(move |email: &String| {
        let email = email.clone();
        let api = api.clone();
        async move { forgot_password_request(email, &api).await }
    })
}
