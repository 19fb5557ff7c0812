use crate::components::layout::Layout;
use leptos::{ev::SubmitEvent, *};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub video_count: usize,
}

/// Appends a playlist with a locally unique id; blank names are rejected.
pub fn add_playlist(playlists: &mut Vec<Playlist>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    if playlists.iter().any(|p| p.name == name) {
        return false;
    }
    playlists.push(Playlist {
        id: format!("local-{}", playlists.len() + 1),
        name: name.to_string(),
        video_count: 0,
    });
    true
}

pub fn remove_playlist(playlists: &mut Vec<Playlist>, id: &str) {
    playlists.retain(|p| p.id != id);
}

pub fn sample_playlists() -> Vec<Playlist> {
    vec![
        Playlist {
            id: "p1".into(),
            name: "Watch later".into(),
            video_count: 4,
        },
        Playlist {
            id: "p2".into(),
            name: "Workout mixes".into(),
            video_count: 12,
        },
    ]
}

#[component]
pub fn PlaylistsPage() -> impl IntoView {
    let (playlists, set_playlists) = create_signal(sample_playlists());
    let (draft, set_draft) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let handle_create = move |ev: SubmitEvent| {
        ev.prevent_default();
        let name = draft.get_untracked();
        let mut created = false;
        set_playlists.update(|list| created = add_playlist(list, &name));
        if created {
            set_draft.set(String::new());
            set_error.set(None);
        } else {
            set_error.set(Some("Enter a new, unique playlist name".into()));
        }
    };

    view! {
        <Layout>
            <div class="max-w-2xl mx-auto px-4 sm:px-0">
                <h2 class="text-xl font-semibold text-fg mb-4">"Your playlists"</h2>
                <form class="flex space-x-2 mb-2" on:submit=handle_create>
                    <input
                        type="text"
                        placeholder="New playlist name"
                        class="flex-1 px-3 py-2 border border-border rounded-md bg-surface-elevated text-fg text-sm"
                        prop:value=draft
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button
                        type="submit"
                        class="px-4 py-2 rounded-md text-sm text-action-primary-text bg-action-primary-bg"
                    >
                        "Create"
                    </button>
                </form>
                {move || error.get().map(|msg| view! { <p class="text-sm text-status-error-text mb-2">{msg}</p> })}
                <For
                    each=move || playlists.get()
                    key=|playlist| playlist.id.clone()
                    children=move |playlist| {
                        let id = playlist.id.clone();
                        view! {
                            <div class="flex justify-between items-center bg-surface-elevated rounded-lg shadow px-4 py-3 mb-2">
                                <div>
                                    <p class="text-sm font-medium text-fg">{playlist.name.clone()}</p>
                                    <p class="text-xs text-fg-muted">
                                        {format!("{} videos", playlist.video_count)}
                                    </p>
                                </div>
                                <button
                                    class="text-xs text-fg-muted hover:text-fg"
                                    on:click=move |_| {
                                        let id = id.clone();
                                        set_playlists.update(|list| remove_playlist(list, &id));
                                    }
                                >
                                    "Delete"
                                </button>
                            </div>
                        }
                    }
                />
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
    fn renders_existing_playlists() {
        let html = render_to_string(|| {
            provide_auth(Some(sample_user()), false);
            view! { <PlaylistsPage /> }
        });
        assert!(html.contains("Watch later"));
        assert!(html.contains("12 videos"));
    }
}
