use crate::{
    api::{UserRecord, Video},
    components::layout::Layout,
    utils::format::format_count,
};
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Trending,
    Recent,
    Subscriptions,
}

impl DashboardTab {
    fn label(self) -> &'static str {
        match self {
            DashboardTab::Trending => "Trending",
            DashboardTab::Recent => "Recent",
            DashboardTab::Subscriptions => "Subscriptions",
        }
    }
}

const TABS: [DashboardTab; 3] = [
    DashboardTab::Trending,
    DashboardTab::Recent,
    DashboardTab::Subscriptions,
];

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (active_tab, set_active_tab) = create_signal(DashboardTab::Trending);
    let videos = create_memo(move |_| videos_for_tab(active_tab.get(), &sample_videos()));

    view! {
        <Layout>
            <div class="px-4 sm:px-0">
                <div class="border-b border-border mb-6">
                    <nav class="flex space-x-4">
                        {TABS
                            .into_iter()
                            .map(|tab| {
                                view! {
                                    <button
                                        class="px-3 py-2 text-sm font-medium rounded-t-md"
                                        class=("text-fg", move || active_tab.get() == tab)
                                        class=("text-fg-muted", move || active_tab.get() != tab)
                                        class=("border-b-2", move || active_tab.get() == tab)
                                        on:click=move |_| set_active_tab.set(tab)
                                    >
                                        {tab.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </nav>
                </div>
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6">
                    <For
                        each=move || videos.get()
                        key=|video| video.id.clone()
                        children=move |video| view! { <VideoCard video=video/> }
                    />
                </div>
            </div>
        </Layout>
    }
}

#[component]
fn VideoCard(video: Video) -> impl IntoView {
    let href = format!("/video/{}", video.id);
    let owner = video
        .owner
        .as_ref()
        .map(|o| o.username.clone())
        .unwrap_or_default();
    view! {
        <a href=href class="block bg-surface-elevated rounded-lg overflow-hidden shadow hover:shadow-md">
            <div class="aspect-video bg-surface flex items-center justify-center text-fg-muted">
                {video.thumbnail.clone().map(|src| view! { <img src=src alt=video.title.clone() class="w-full h-full object-cover"/> })}
            </div>
            <div class="p-4">
                <h3 class="text-sm font-semibold text-fg truncate">{video.title.clone()}</h3>
                <p class="mt-1 text-xs text-fg-muted">{owner}</p>
                <p class="mt-1 text-xs text-fg-muted">
                    {format!("{} views", format_count(video.views))}
                </p>
            </div>
        </a>
    }
}

/// Tab filter over the grid. Trending ranks by views, Recent by upload time,
/// Subscriptions keeps only videos with a known owner.
pub fn videos_for_tab(tab: DashboardTab, videos: &[Video]) -> Vec<Video> {
    let mut selected: Vec<Video> = match tab {
        DashboardTab::Subscriptions => videos
            .iter()
            .filter(|v| v.owner.is_some())
            .cloned()
            .collect(),
        _ => videos.to_vec(),
    };
    match tab {
        DashboardTab::Trending => selected.sort_by(|a, b| b.views.cmp(&a.views)),
        DashboardTab::Recent => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        DashboardTab::Subscriptions => {}
    }
    selected
}

/// Placeholder grid content until the listing endpoints land server-side.
pub fn sample_videos() -> Vec<Video> {
    let owner = |name: &str| {
        Some(UserRecord {
            id: format!("owner-{name}"),
            full_name: String::new(),
            email: String::new(),
            username: name.into(),
            avatar: None,
            cover_image: None,
        })
    };
    vec![
        Video {
            id: "v1".into(),
            title: "Building a home studio".into(),
            description: None,
            thumbnail: None,
            video_file: None,
            views: 1_250_000,
            likes: 34_000,
            owner: owner("studiocraft"),
            created_at: chrono::DateTime::parse_from_rfc3339("2026-08-01T10:00:00Z")
                .ok()
                .map(|dt| dt.with_timezone(&chrono::Utc)),
        },
        Video {
            id: "v2".into(),
            title: "City cycling essentials".into(),
            description: None,
            thumbnail: None,
            video_file: None,
            views: 48_200,
            likes: 2_100,
            owner: None,
            created_at: chrono::DateTime::parse_from_rfc3339("2026-08-20T18:30:00Z")
                .ok()
                .map(|dt| dt.with_timezone(&chrono::Utc)),
        },
        Video {
            id: "v3".into(),
            title: "Sourdough from scratch".into(),
            description: None,
            thumbnail: None,
            video_file: None,
            views: 310_000,
            likes: 12_500,
            owner: owner("breadlab"),
            created_at: chrono::DateTime::parse_from_rfc3339("2026-08-15T08:15:00Z")
                .ok()
                .map(|dt| dt.with_timezone(&chrono::Utc)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trending_ranks_by_views_descending() {
        let videos = videos_for_tab(DashboardTab::Trending, &sample_videos());
        let views: Vec<u64> = videos.iter().map(|v| v.views).collect();
        assert_eq!(views, vec![1_250_000, 310_000, 48_200]);
    }

    #[test]
    fn recent_ranks_by_upload_time_descending() {
        let videos = videos_for_tab(DashboardTab::Recent, &sample_videos());
        let ids: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v2", "v3", "v1"]);
    }

    #[test]
    fn subscriptions_keeps_only_owned_videos() {
        let videos = videos_for_tab(DashboardTab::Subscriptions, &sample_videos());
        assert!(videos.iter().all(|v| v.owner.is_some()));
        assert_eq!(videos.len(), 2);
    }
}
