use leptos::*;
use leptos_router::*;

mod api;
mod components;
pub mod config;
mod pages;
mod session;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

use components::guard::RequireAuth;
use pages::{
    channel::ChannelPage, dashboard::DashboardPage, feed::FeedPage,
    forgot_password::ForgotPasswordPage, home::HomePage, login::LoginPage,
    playlists::PlaylistsPage, profile::ProfilePage, signup::SignupPage, video::VideoPage,
};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("starting VidTweet frontend");

    // Kick off runtime config load from ./config.json (non-blocking).
    // If window.__VIDTWEET_ENV is present, it takes precedence.
    leptos::spawn_local(async move {
        config::init().await;
        log::info!("runtime config initialized");
    });

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <state::auth::AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/signup" view=SignupPage/>
                    <Route path="/forgot-password" view=ForgotPasswordPage/>
                    <Route path="/dashboard" view=ProtectedDashboard/>
                    <Route path="/video/:id" view=ProtectedVideo/>
                    <Route path="/feed" view=ProtectedFeed/>
                    <Route path="/playlists" view=ProtectedPlaylists/>
                    <Route path="/channel" view=ProtectedChannel/>
                    <Route path="/profile" view=ProtectedProfile/>
                </Routes>
            </Router>
        </state::auth::AuthProvider>
    }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage/></RequireAuth> }
}

#[component]
fn ProtectedVideo() -> impl IntoView {
    view! { <RequireAuth><VideoPage/></RequireAuth> }
}

#[component]
fn ProtectedFeed() -> impl IntoView {
    view! { <RequireAuth><FeedPage/></RequireAuth> }
}

#[component]
fn ProtectedPlaylists() -> impl IntoView {
    view! { <RequireAuth><PlaylistsPage/></RequireAuth> }
}

#[component]
fn ProtectedChannel() -> impl IntoView {
    view! { <RequireAuth><ChannelPage/></RequireAuth> }
}

#[component]
fn ProtectedProfile() -> impl IntoView {
    view! { <RequireAuth><ProfilePage/></RequireAuth> }
}
