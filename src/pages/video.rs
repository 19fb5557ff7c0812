use crate::{
    api::{ApiClient, ApiError, Comment, Video},
    components::layout::{ErrorMessage, Layout, LoadingSpinner},
    utils::format::format_count,
};
use leptos::{ev::SubmitEvent, *};
use leptos_router::use_params_map;

/// Optimistic reaction state for the action bar. Toggles apply locally and
/// are not persisted; the backend has no reaction endpoints yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reactions {
    pub likes: u64,
    pub liked: bool,
    pub bookmarked: bool,
}

impl Reactions {
    pub fn from_video(video: &Video) -> Self {
        Self {
            likes: video.likes,
            liked: false,
            bookmarked: false,
        }
    }
}

pub fn toggle_like(reactions: Reactions) -> Reactions {
    let likes = if reactions.liked {
        reactions.likes.saturating_sub(1)
    } else {
        reactions.likes + 1
    };
    Reactions {
        likes,
        liked: !reactions.liked,
        ..reactions
    }
}

pub fn toggle_bookmark(reactions: Reactions) -> Reactions {
    Reactions {
        bookmarked: !reactions.bookmarked,
        ..reactions
    }
}

#[component]
pub fn VideoPage() -> impl IntoView {
    let params = use_params_map();
    let video_id = create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);

    let video = create_local_resource(move || video_id.get(), {
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            async move { api.get_video(&id).await }
        }
    });
    let comments = create_local_resource(move || video_id.get(), {
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            async move { api.get_comments(&id).await }
        }
    });
    let related = create_local_resource(move || video_id.get(), {
        let api = api.clone();
        move |id: String| {
            let api = api.clone();
            async move { api.get_related_videos(&id).await }
        }
    });

    let post_comment = create_action({
        let api = api.clone();
        move |content: &String| {
            let api = api.clone();
            let id = video_id.get_untracked();
            let content = content.clone();
            async move { api.post_comment(&id, &content).await }
        }
    });
    create_effect(move |_| {
        if matches!(post_comment.value().get(), Some(Ok(_))) {
            comments.refetch();
        }
    });

    view! {
        <Layout>
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-8 px-4 sm:px-0">
                <div class="lg:col-span-2 space-y-6">
                    {move || match video.get() {
                        None => view! { <LoadingSpinner /> }.into_view(),
                        Some(Err(err)) => {
                            view! { <ErrorMessage message=err.to_string()/> }.into_view()
                        }
                        Some(Ok(video)) => view! { <VideoPlayer video=video/> }.into_view(),
                    }}
                    <CommentSection comments=comments post_comment=post_comment/>
                </div>
                <aside>
                    <h3 class="text-sm font-semibold text-fg mb-3">"Related videos"</h3>
                    {move || match related.get() {
                        None => view! { <LoadingSpinner /> }.into_view(),
                        Some(Err(_)) => ().into_view(),
                        Some(Ok(videos)) => videos
                            .into_iter()
                            .map(|video| view! { <RelatedVideoRow video=video/> })
                            .collect_view(),
                    }}
                </aside>
            </div>
        </Layout>
    }
}

#[component]
fn VideoPlayer(video: Video) -> impl IntoView {
    let (reactions, set_reactions) = create_signal(Reactions::from_video(&video));
    let owner = video
        .owner
        .as_ref()
        .map(|o| o.username.clone())
        .unwrap_or_default();
    view! {
        <div class="bg-surface-elevated rounded-lg overflow-hidden shadow">
            <div class="aspect-video bg-black">
                {video.video_file.clone().map(|src| view! {
                    <video controls class="w-full h-full" src=src></video>
                })}
            </div>
            <div class="p-4">
                <h1 class="text-lg font-semibold text-fg">{video.title.clone()}</h1>
                <p class="mt-1 text-sm text-fg-muted">
                    {format!("{} views", format_count(video.views))}
                    {if owner.is_empty() { String::new() } else { format!(" · {owner}") }}
                </p>
                <div class="mt-3 flex space-x-3">
                    <button
                        class="px-3 py-1 rounded-md text-sm border border-border"
                        class=("bg-action-primary-bg", move || reactions.get().liked)
                        on:click=move |_| set_reactions.update(|r| *r = toggle_like(*r))
                    >
                        {move || format!("Like ({})", format_count(reactions.get().likes))}
                    </button>
                    <button
                        class="px-3 py-1 rounded-md text-sm border border-border"
                        class=("bg-action-primary-bg", move || reactions.get().bookmarked)
                        on:click=move |_| set_reactions.update(|r| *r = toggle_bookmark(*r))
                    >
                        {move || if reactions.get().bookmarked { "Bookmarked" } else { "Bookmark" }}
                    </button>
                </div>
                {video.description.clone().map(|text| view! {
                    <p class="mt-4 text-sm text-fg-muted whitespace-pre-line">{text}</p>
                })}
            </div>
        </div>
    }
}

#[component]
fn CommentSection(
    comments: Resource<String, Result<Vec<Comment>, ApiError>>,
    post_comment: Action<String, Result<Comment, ApiError>>,
) -> impl IntoView {
    let (draft, set_draft) = create_signal(String::new());
    let pending = post_comment.pending();

    create_effect(move |_| {
        if matches!(post_comment.value().get(), Some(Ok(_))) {
            set_draft.set(String::new());
        }
    });

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let content = draft.get_untracked();
        if content.trim().is_empty() || pending.get_untracked() {
            return;
        }
        post_comment.dispatch(content);
    };

    view! {
        <section class="bg-surface-elevated rounded-lg shadow p-4">
            <h3 class="text-sm font-semibold text-fg mb-3">"Comments"</h3>
            <form class="flex space-x-2 mb-4" on:submit=handle_submit>
                <input
                    type="text"
                    placeholder="Add a comment..."
                    class="flex-1 px-3 py-2 border border-border rounded-md bg-surface text-fg text-sm"
                    prop:value=draft
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class="px-4 py-2 rounded-md text-sm text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    "Post"
                </button>
            </form>
            {move || match comments.get() {
                None => view! { <LoadingSpinner /> }.into_view(),
                Some(Err(err)) => view! { <ErrorMessage message=err.to_string()/> }.into_view(),
                Some(Ok(comments)) => comments
                    .into_iter()
                    .map(|comment| {
                        view! {
                            <div class="py-2 border-t border-border">
                                <p class="text-xs font-medium text-fg">{comment.user.username.clone()}</p>
                                <p class="text-sm text-fg-muted">{comment.content.clone()}</p>
                            </div>
                        }
                    })
                    .collect_view(),
            }}
        </section>
    }
}

#[component]
fn RelatedVideoRow(video: Video) -> impl IntoView {
    let href = format!("/video/{}", video.id);
    view! {
        <a href=href class="flex space-x-3 mb-3 hover:bg-action-ghost-bg-hover rounded-md p-2">
            <div class="w-24 aspect-video bg-surface rounded flex-shrink-0">
                {video.thumbnail.clone().map(|src| view! {
                    <img src=src alt=video.title.clone() class="w-full h-full object-cover rounded"/>
                })}
            </div>
            <div>
                <p class="text-sm font-medium text-fg line-clamp-2">{video.title.clone()}</p>
                <p class="text-xs text-fg-muted">{format!("{} views", format_count(video.views))}</p>
            </div>
        </a>
    }
}
