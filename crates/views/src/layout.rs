//! Shared page layout.

use std::collections::HashSet;

use crate::{Flash, html_escape};
use coaster_db::entities::user;

/// Per-request data every page needs.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// The signed-in user, if any.
    pub user: Option<user::Model>,
    /// Message left by the previous request.
    pub flash: Option<Flash>,
    /// IDs of the reviews on this page the signed-in user has liked.
    pub liked: HashSet<String>,
}

impl PageContext {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new(user: Option<user::Model>, flash: Option<Flash>) -> Self {
        Self {
            user,
            flash,
            liked: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_liked(mut self, liked: HashSet<String>) -> Self {
        self.liked = liked;
        self
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn has_liked(&self, review_id: &str) -> bool {
        self.liked.contains(review_id)
    }
}

/// Wrap `body` in the site layout.
#[must_use]
pub fn render(ctx: &PageContext, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Coaster Reviews</title>
<link rel="stylesheet" href="/assets/style.css">
</head>
<body>
{nav}
<main class="container">
{flash}
{body}
</main>
<script>
{script}
</script>
</body>
</html>
"#,
        title = html_escape(title),
        nav = nav(ctx),
        flash = flash(ctx.flash),
        script = LIKE_SCRIPT,
    )
}

fn nav(ctx: &PageContext) -> String {
    let account = match &ctx.user {
        Some(user) => format!(
            r#"<a href="/add_review">Write a review</a>
<a href="/profile">{name}</a>
<form action="/logout" method="post" class="inline"><button type="submit" class="link">Log out</button></form>"#,
            name = html_escape(&user.name),
        ),
        None => r#"<a href="/login">Log in</a>
<a href="/signup">Sign up</a>"#
            .to_string(),
    };

    format!(
        r#"<nav class="navbar">
<a href="/" class="brand">Coaster Reviews</a>
<a href="/rollercoasters">Rollercoasters</a>
<a href="/users">Users</a>
<span class="spacer"></span>
{account}
</nav>"#
    )
}

fn flash(flash: Option<Flash>) -> String {
    flash.map_or_else(String::new, |f| {
        format!(
            r#"<div class="alert {class}" role="alert">{message}</div>"#,
            class = f.class(),
            message = html_escape(f.message()),
        )
    })
}

/// Like button for one review.
///
/// Signed-out visitors get a link to the login page instead.
#[must_use]
pub fn like_button(ctx: &PageContext, review_id: &str, likes: i32) -> String {
    if !ctx.is_signed_in() {
        return format!(
            r#"<a class="like-btn" href="/login" title="Log in to like reviews">&#9825; <span class="like-count">{likes}</span></a>"#
        );
    }

    let liked = ctx.has_liked(review_id);
    format!(
        r#"<button type="button" class="like-btn{active}" data-review-id="{id}" data-liked="{liked}">{heart} <span class="like-count">{likes}</span></button>"#,
        active = if liked { " liked" } else { "" },
        id = html_escape(review_id),
        heart = if liked { "&#9829;" } else { "&#9825;" },
    )
}

/// Toggles a like through `/add_like` or `/remove_like` and updates the counter.
const LIKE_SCRIPT: &str = r#"
document.querySelectorAll('button.like-btn').forEach(function (btn) {
  btn.addEventListener('click', function () {
    var liked = btn.dataset.liked === 'true';
    fetch(liked ? '/remove_like' : '/add_like', {
      method: 'POST',
      credentials: 'same-origin',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ review_id: btn.dataset.reviewId })
    }).then(function (res) {
      if (res.status === 401) { window.location = '/login'; return null; }
      return res.json();
    }).then(function (data) {
      if (!data || data.status !== 'success') { return; }
      liked = !liked;
      btn.dataset.liked = liked ? 'true' : 'false';
      btn.classList.toggle('liked', liked);
      btn.innerHTML = (liked ? '&#9829;' : '&#9825;') +
        ' <span class="like-count">' + data.likes + '</span>';
    });
  });
});
"#;
