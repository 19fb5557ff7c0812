use crate::{
    components::layout::Layout,
    pages::dashboard::sample_videos,
    state::auth::use_auth,
    utils::format::format_count,
};
use leptos::*;

#[component]
pub fn ChannelPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let channel_name = create_memo(move |_| {
        auth.get()
            .user
            .map(|u| {
                if u.full_name.is_empty() {
                    u.username
                } else {
                    u.full_name
                }
            })
            .unwrap_or_default()
    });
    let videos = sample_videos();
    let total_views: u64 = videos.iter().map(|v| v.views).sum();

    view! {
        <Layout>
            <div class="max-w-4xl mx-auto px-4 sm:px-0">
                <div class="bg-surface-elevated rounded-lg shadow p-6 mb-6">
                    <h2 class="text-xl font-semibold text-fg">{move || channel_name.get()}</h2>
                    <p class="mt-1 text-sm text-fg-muted">
                        {format!(
                            "{} uploads · {} total views",
                            videos.len(),
                            format_count(total_views),
                        )}
                    </p>
                </div>
                <h3 class="text-sm font-semibold text-fg mb-3">"Uploads"</h3>
                {videos
                    .into_iter()
                    .map(|video| {
                        let href = format!("/video/{}", video.id);
                        view! {
                            <a href=href class="flex justify-between items-center bg-surface-elevated rounded-lg shadow px-4 py-3 mb-2 hover:bg-action-ghost-bg-hover">
                                <p class="text-sm font-medium text-fg">{video.title.clone()}</p>
                                <p class="text-xs text-fg-muted">
                                    {format!("{} views", format_count(video.views))}
                                </p>
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_auth, sample_user};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn renders_channel_summary_and_uploads() {
        let html = render_to_string(|| {
            provide_auth(Some(sample_user()), false);
            view! { <ChannelPage /> }
        });
        assert!(html.contains("Alice Example"));
        assert!(html.contains("Uploads"));
        assert!(html.contains("Building a home studio"));
    }
}
