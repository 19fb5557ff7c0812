use crate::{
    api::{ApiError, LoginRequest},
    components::layout::ErrorMessage,
    state::auth,
    utils::nav,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (identity, set_identity) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let login_action = auth::use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    set_error.set(None);
                    nav::navigate("/dashboard");
                }
                Err(err) => set_error.set(Some(login_error_message(&err))),
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let identity_value = identity.get_untracked();
        let password_value = password.get_untracked();
        match build_login_request(&identity_value, &password_value) {
            Ok(request) => {
                set_error.set(None);
                login_action.dispatch(request);
            }
            Err(msg) => set_error.set(Some(msg)),
        }
    };

    view! {
        <div class="min-h-screen bg-surface flex items-center justify-center py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="text-center text-3xl font-extrabold text-fg">"Sign in to VidTweet"</h2>
                {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}
                <form class="mt-8 space-y-6" on:submit=handle_submit>
                    <div>
                        <label for="identity" class="block text-sm font-medium text-fg-muted">
                            "Email or username"
                        </label>
                        <input
                            id="identity"
                            type="text"
                            class="mt-1 block w-full px-3 py-2 border border-border rounded-md bg-surface-elevated text-fg"
                            prop:value=identity
                            on:input=move |ev| set_identity.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label for="password" class="block text-sm font-medium text-fg-muted">
                            "Password"
                        </label>
                        <input
                            id="password"
                            type="password"
                            class="mt-1 block w-full px-3 py-2 border border-border rounded-md bg-surface-elevated text-fg"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <button
                        type="submit"
                        class="w-full flex justify-center py-2 px-4 border border-transparent rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <div class="flex justify-between text-sm">
                    <a href="/forgot-password" class="text-fg-muted hover:text-fg">
                        "Forgot password?"
                    </a>
                    <a href="/signup" class="text-fg-muted hover:text-fg">
                        "Create an account"
                    </a>
                </div>
            </div>
        </div>
    }
}

/// An identity containing `@` is sent as the email credential, anything else
/// as the username.
fn build_login_request(identity: &str, password: &str) -> Result<LoginRequest, String> {
    let identity = identity.trim();
    if identity.is_empty() {
        return Err("Enter your email or username".into());
    }
    if password.is_empty() {
        return Err("Enter your password".into());
    }
    if identity.contains('@') {
        Ok(LoginRequest::with_email(identity, password))
    } else {
        Ok(LoginRequest::with_username(identity, password))
    }
}

fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::InvalidCredentials(_) => "Invalid email, username, or password".into(),
        ApiError::Network(_) => "Could not reach the server. Check your connection.".into(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_with_at_sign_becomes_the_email_credential() {
        let request = build_login_request("a@b.com", "secret").unwrap();
        assert_eq!(request.email.as_deref(), Some("a@b.com"));
        assert!(request.username.is_none());
    }

    #[test]
    fn plain_identity_becomes_the_username_credential() {
        let request = build_login_request("alice", "secret").unwrap();
        assert_eq!(request.username.as_deref(), Some("alice"));
        assert!(request.email.is_none());
    }

    #[test]
    fn empty_fields_are_rejected_before_any_request() {
        assert!(build_login_request("", "secret").is_err());
        assert!(build_login_request("alice", "").is_err());
        assert!(build_login_request("   ", "secret").is_err());
    }

    #[test]
    fn credential_errors_render_a_friendly_message() {
        let message = login_error_message(&ApiError::InvalidCredentials("nope".into()));
        assert!(message.contains("Invalid"));
    }
}
