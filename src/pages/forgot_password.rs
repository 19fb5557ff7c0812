use crate::{
    components::layout::{ErrorMessage, SuccessMessage},
    state::auth,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (sent, set_sent) = create_signal(false);

    let forgot_action = auth::use_forgot_password_action();
    let pending = forgot_action.pending();

    create_effect(move |_| {
        if let Some(result) = forgot_action.value().get() {
            match result {
                Ok(()) => {
                    set_error.set(None);
                    set_sent.set(true);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let address = email.get_untracked();
        if let Err(msg) = validate_email(&address) {
            set_error.set(Some(msg));
            return;
        }
        set_error.set(None);
        set_sent.set(false);
        forgot_action.dispatch(address);
    };

    view! {
        <div class="min-h-screen bg-surface flex items-center justify-center py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="text-center text-3xl font-extrabold text-fg">"Reset your password"</h2>
                {move || error.get().map(|message| view! { <ErrorMessage message=message/> })}
                <Show when=move || sent.get()>
                    <SuccessMessage message="If that address has an account, a reset link is on its way.".into() />
                </Show>
                <form class="mt-8 space-y-6" on:submit=handle_submit>
                    <div>
                        <label for="reset-email" class="block text-sm font-medium text-fg-muted">
                            "Email"
                        </label>
                        <input
                            id="reset-email"
                            type="email"
                            class="mt-1 block w-full px-3 py-2 border border-border rounded-md bg-surface-elevated text-fg"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <button
                        type="submit"
                        class="w-full flex justify-center py-2 px-4 border border-transparent rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Sending..." } else { "Send reset link" }}
                    </button>
                </form>
                <p class="text-center text-sm">
                    <a href="/login" class="text-fg-muted hover:text-fg">"Back to sign in"</a>
                </p>
            </div>
        </div>
    }
}

fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("Enter a valid email address".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_email;

    #[test]
    fn rejects_blank_and_malformed_addresses() {
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b.com").is_ok());
    }
}
