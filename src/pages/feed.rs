use crate::{components::layout::Layout, state::auth::use_auth, utils::format::format_count};
use leptos::{ev::SubmitEvent, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedTab {
    ForYou,
    Following,
}

impl FeedTab {
    fn label(self) -> &'static str {
        match self {
            FeedTab::ForYou => "For you",
            FeedTab::Following => "Following",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub id: String,
    pub author: String,
    pub content: String,
    pub likes: u64,
    pub liked: bool,
    pub bookmarked: bool,
    pub following: bool,
}

pub fn toggle_tweet_like(tweets: &mut [Tweet], id: &str) {
    if let Some(tweet) = tweets.iter_mut().find(|t| t.id == id) {
        if tweet.liked {
            tweet.likes = tweet.likes.saturating_sub(1);
        } else {
            tweet.likes += 1;
        }
        tweet.liked = !tweet.liked;
    }
}

pub fn toggle_tweet_bookmark(tweets: &mut [Tweet], id: &str) {
    if let Some(tweet) = tweets.iter_mut().find(|t| t.id == id) {
        tweet.bookmarked = !tweet.bookmarked;
    }
}

/// Prepends the drafted tweet; blank drafts are rejected.
pub fn compose_tweet(tweets: &mut Vec<Tweet>, author: &str, content: &str) -> bool {
    let content = content.trim();
    if content.is_empty() {
        return false;
    }
    tweets.insert(
        0,
        Tweet {
            id: format!("local-{}", tweets.len() + 1),
            author: author.to_string(),
            content: content.to_string(),
            likes: 0,
            liked: false,
            bookmarked: false,
            following: true,
        },
    );
    true
}

pub fn tweets_for_tab(tab: FeedTab, tweets: &[Tweet]) -> Vec<Tweet> {
    match tab {
        FeedTab::ForYou => tweets.to_vec(),
        FeedTab::Following => tweets.iter().filter(|t| t.following).cloned().collect(),
    }
}

pub fn sample_tweets() -> Vec<Tweet> {
    vec![
        Tweet {
            id: "t1".into(),
            author: "studiocraft".into(),
            content: "New studio tour video drops tomorrow.".into(),
            likes: 1_800,
            liked: false,
            bookmarked: false,
            following: true,
        },
        Tweet {
            id: "t2".into(),
            author: "breadlab".into(),
            content: "Sourdough series part 3 is live!".into(),
            likes: 92,
            liked: false,
            bookmarked: false,
            following: false,
        },
    ]
}

#[component]
pub fn FeedPage() -> impl IntoView {
    let (auth, _) = use_auth();
    let (active_tab, set_active_tab) = create_signal(FeedTab::ForYou);
    let (tweets, set_tweets) = create_signal(sample_tweets());
    let (draft, set_draft) = create_signal(String::new());
    let visible = create_memo(move |_| tweets_for_tab(active_tab.get(), &tweets.get()));

    let handle_compose = move |ev: SubmitEvent| {
        ev.prevent_default();
        let author = auth
            .get_untracked()
            .user
            .map(|u| u.username)
            .unwrap_or_else(|| "you".into());
        let content = draft.get_untracked();
        let mut posted = false;
        set_tweets.update(|list| posted = compose_tweet(list, &author, &content));
        if posted {
            set_draft.set(String::new());
        }
    };

    view! {
        <Layout>
            <div class="max-w-2xl mx-auto px-4 sm:px-0">
                <form class="bg-surface-elevated rounded-lg shadow p-4 mb-6" on:submit=handle_compose>
                    <textarea
                        placeholder="Share an update"
                        class="w-full px-3 py-2 border border-border rounded-md bg-surface text-fg text-sm"
                        prop:value=draft
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    ></textarea>
                    <div class="mt-2 flex justify-end">
                        <button
                            type="submit"
                            class="px-4 py-2 rounded-md text-sm text-action-primary-text bg-action-primary-bg"
                        >
                            "Post"
                        </button>
                    </div>
                </form>
                <div class="border-b border-border mb-4">
                    <nav class="flex space-x-4">
                        {[FeedTab::ForYou, FeedTab::Following]
                            .into_iter()
                            .map(|tab| {
                                view! {
                                    <button
                                        class="px-3 py-2 text-sm font-medium"
                                        class=("text-fg", move || active_tab.get() == tab)
                                        class=("text-fg-muted", move || active_tab.get() != tab)
                                        on:click=move |_| set_active_tab.set(tab)
                                    >
                                        {tab.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </nav>
                </div>
                <For
                    each=move || visible.get()
                    key=|tweet| (tweet.id.clone(), tweet.likes, tweet.liked, tweet.bookmarked)
                    children=move |tweet| {
                        let like_id = tweet.id.clone();
                        let bookmark_id = tweet.id.clone();
                        view! {
                            <article class="bg-surface-elevated rounded-lg shadow p-4 mb-3">
                                <p class="text-xs font-medium text-fg">{tweet.author.clone()}</p>
                                <p class="mt-1 text-sm text-fg-muted">{tweet.content.clone()}</p>
                                <div class="mt-2 flex space-x-3 text-xs">
                                    <button
                                        class="text-fg-muted hover:text-fg"
                                        on:click=move |_| {
                                            let id = like_id.clone();
                                            set_tweets.update(|list| toggle_tweet_like(list, &id));
                                        }
                                    >
                                        {format!(
                                            "{} {}",
                                            if tweet.liked { "Unlike" } else { "Like" },
                                            format_count(tweet.likes),
                                        )}
                                    </button>
                                    <button
                                        class="text-fg-muted hover:text-fg"
                                        on:click=move |_| {
                                            let id = bookmark_id.clone();
                                            set_tweets.update(|list| toggle_tweet_bookmark(list, &id));
                                        }
                                    >
                                        {if tweet.bookmarked { "Bookmarked" } else { "Bookmark" }}
                                    </button>
                                </div>
                            </article>
                        }
                    }
                />
            </div>
        </Layout>
    }
}
