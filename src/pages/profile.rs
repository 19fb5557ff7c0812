use crate::{components::layout::Layout, state::auth::use_auth};
use leptos::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let (auth, _) = use_auth();
    let user = create_memo(move |_| auth.get().user);

    view! {
        <Layout>
            <div class="max-w-2xl mx-auto px-4 sm:px-0">
                <h2 class="text-xl font-semibold text-fg mb-4">"Your profile"</h2>
                {move || match user.get() {
                    None => view! { <p class="text-sm text-fg-muted">"Not signed in."</p> }.into_view(),
                    Some(user) => view! {
                        <div class="bg-surface-elevated rounded-lg shadow overflow-hidden">
                            {user.cover_image.clone().map(|src| view! {
                                <img src=src alt="cover" class="w-full h-32 object-cover"/>
                            })}
                            <div class="p-6">
                                <div class="flex items-center space-x-4">
                                    {user.avatar.clone().map(|src| view! {
                                        <img src=src alt="avatar" class="h-16 w-16 rounded-full object-cover"/>
                                    })}
                                    <div>
                                        <p class="text-lg font-semibold text-fg">{user.full_name.clone()}</p>
                                        <p class="text-sm text-fg-muted">{format!("@{}", user.username)}</p>
                                    </div>
                                </div>
                                <dl class="mt-6 space-y-2 text-sm">
                                    <div class="flex justify-between">
                                        <dt class="text-fg-muted">"Email"</dt>
                                        <dd class="text-fg">{user.email.clone()}</dd>
                                    </div>
                                    <div class="flex justify-between">
                                        <dt class="text-fg-muted">"Member id"</dt>
                                        <dd class="text-fg">{user.id.clone()}</dd>
                                    </div>
                                </dl>
                            </div>
                        </div>
                    }.into_view(),
                }}
            </div>
        </Layout>
    }
}
