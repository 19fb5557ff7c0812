use crate::{
    api::{ApiError, FileUpload, SignupForm},
    components::layout::ErrorMessage,
    state::auth,
    utils::nav,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn SignupPage() -> impl IntoView {
    let (full_name, set_full_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let signup_action = auth::use_signup_action();
    let pending = signup_action.pending();

    create_effect(move |_| {
        if let Some(result) = signup_action.value().get() {
            match result {
                Ok(_) => {
                    set_error.set(None);
                    nav::navigate("/login");
                }
                Err(err) => set_error.set(Some(signup_error_message(&err))),
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let form = SignupForm {
            full_name: full_name.get_untracked(),
            email: email.get_untracked(),
            username: username.get_untracked(),
            password: password.get_untracked(),
            avatar: None,
            cover_image: None,
        };
        if let Err(msg) = validate_signup(&form) {
            set_error.set(Some(msg));
            return;
        }
        set_error.set(None);
        spawn_local(async move {
            let mut form = form;
            form.avatar = read_file_input("signup-avatar").await;
            form.cover_image = read_file_input("signup-cover").await;
            signup_action.dispatch(form);
        });
    };

    view! {
        <div class="min-h-screen bg-surface flex items-center justify-center py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="text-center text-3xl font-extrabold text-fg">"Create your account"</h2>
                {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}
                <form class="mt-8 space-y-6" on:submit=handle_submit>
                    <div>
                        <label for="signup-full-name" class="block text-sm font-medium text-fg-muted">
                            "Full name"
                        </label>
                        <input
                            id="signup-full-name"
                            type="text"
                            class="mt-1 block w-full px-3 py-2 border border-border rounded-md bg-surface-elevated text-fg"
                            prop:value=full_name
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label for="signup-email" class="block text-sm font-medium text-fg-muted">
                            "Email"
                        </label>
                        <input
                            id="signup-email"
                            type="email"
                            class="mt-1 block w-full px-3 py-2 border border-border rounded-md bg-surface-elevated text-fg"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label for="signup-username" class="block text-sm font-medium text-fg-muted">
                            "Username"
                        </label>
                        <input
                            id="signup-username"
                            type="text"
                            class="mt-1 block w-full px-3 py-2 border border-border rounded-md bg-surface-elevated text-fg"
                            prop:value=username
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label for="signup-password" class="block text-sm font-medium text-fg-muted">
                            "Password"
                        </label>
                        <input
                            id="signup-password"
                            type="password"
                            class="mt-1 block w-full px-3 py-2 border border-border rounded-md bg-surface-elevated text-fg"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label for="signup-avatar" class="block text-sm font-medium text-fg-muted">
                            "Avatar (optional)"
                        </label>
                        <input id="signup-avatar" type="file" accept="image/*" class="mt-1 block w-full text-sm text-fg-muted" />
                    </div>
                    <div>
                        <label for="signup-cover" class="block text-sm font-medium text-fg-muted">
                            "Cover image (optional)"
                        </label>
                        <input id="signup-cover" type="file" accept="image/*" class="mt-1 block w-full text-sm text-fg-muted" />
                    </div>
                    <button
                        type="submit"
                        class="w-full flex justify-center py-2 px-4 border border-transparent rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Creating account..." } else { "Sign up" }}
                    </button>
                </form>
                <p class="text-center text-sm text-fg-muted">
                    "Already have an account? "
                    <a href="/login" class="text-fg hover:underline">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}

fn validate_signup(form: &SignupForm) -> Result<(), String> {
    if form.full_name.trim().is_empty() {
        return Err("Enter your full name".into());
    }
    if form.email.trim().is_empty() || !form.email.contains('@') {
        return Err("Enter a valid email address".into());
    }
    if form.username.trim().is_empty() {
        return Err("Choose a username".into());
    }
    if form.password.len() < 8 {
        return Err("Password must be at least 8 characters".into());
    }
    Ok(())
}

fn signup_error_message(error: &ApiError) -> String {
    match error {
        ApiError::InvalidCredentials(message) => message.clone(),
        ApiError::Network(_) => "Could not reach the server. Check your connection.".into(),
        other => other.to_string(),
    }
}

/// Reads the first selected file of a file input into an upload payload.
#[cfg(target_arch = "wasm32")]
async fn read_file_input(input_id: &str) -> Option<FileUpload> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()?.document()?;
    let input = document
        .get_element_by_id(input_id)?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    let file = input.files()?.get(0)?;
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .ok()?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Some(FileUpload {
        file_name: file.name(),
        mime_type: file.type_(),
        bytes,
    })
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_file_input(_input_id: &str) -> Option<FileUpload> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            full_name: "Alice Example".into(),
            email: "alice@example.com".into(),
            username: "alice".into(),
            password: "secret123".into(),
            ..SignupForm::default()
        }
    }

    #[test]
    fn accepts_a_complete_form() {
        assert!(validate_signup(&valid_form()).is_ok());
    }

    #[test]
    fn rejects_missing_or_malformed_fields() {
        let mut form = valid_form();
        form.full_name = "  ".into();
        assert!(validate_signup(&form).is_err());

        let mut form = valid_form();
        form.email = "not-an-email".into();
        assert!(validate_signup(&form).is_err());

        let mut form = valid_form();
        form.password = "short".into();
        assert!(validate_signup(&form).is_err());
    }
}
