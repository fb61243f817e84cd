use super::{RollercoasterModel, UserModel, format_date, rollercoaster_link, user_link};
use crate::{PageContext, html_escape, layout};
use coaster_core::ReviewDetail;
use coaster_db::entities::review;

/// Review text is cut to this many characters in lists.
const EXCERPT_CHARS: usize = 140;

/// One review in a list.
///
/// `author` and `rollercoaster` are shown when given; a list of one coaster's
/// reviews passes `None` for the coaster.
pub(super) fn review_card(
    ctx: &PageContext,
    review: &review::Model,
    author: Option<&UserModel>,
    rollercoaster: Option<&RollercoasterModel>,
) -> String {
    let mut byline = String::new();
    if let Some(author) = author {
        byline.push_str(&format!("by {}", user_link(author)));
    }
    if let Some(rollercoaster) = rollercoaster {
        if !byline.is_empty() {
            byline.push_str(" on ");
        }
        byline.push_str(&rollercoaster_link(rollercoaster));
    }

    format!(
        r#"<article class="review-card">
<header><span class="rating">{rating:.2} / 10</span> {byline}</header>
<p>{text}</p>
<footer><a href="/review/{id}">{date}</a> {like}</footer>
</article>"#,
        rating = review.rating,
        text = html_escape(&excerpt(&review.review_text)),
        id = html_escape(&review.id),
        date = format_date(&review.created_at),
        like = layout::like_button(ctx, &review.id, review.likes),
    )
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS).collect();
    format!("{}…", cut.trim_end())
}

/// Single review page.
#[must_use]
pub fn review(ctx: &PageContext, detail: &ReviewDetail) -> String {
    let body = format!(
        r#"<section class="review">
<h1>{coaster}</h1>
<p class="byline">Reviewed by {author} on {date}</p>
<p class="rating big">{rating:.2} / 10</p>
<blockquote>{text}</blockquote>
<p>{like}</p>
</section>"#,
        coaster = rollercoaster_link(&detail.rollercoaster),
        author = user_link(&detail.author),
        date = format_date(&detail.review.created_at),
        rating = detail.review.rating,
        text = html_escape(&detail.review.review_text),
        like = layout::like_button(ctx, &detail.review.id, detail.review.likes),
    );

    layout::render(
        ctx,
        &format!("{} review", detail.rollercoaster.name),
        &body,
    )
}

/// Review form.
///
/// `rollercoasters` fills the select box. `error` is shown above the form
/// after a rejected submission.
#[must_use]
pub fn write_review(ctx: &PageContext, rollercoasters: &[String], error: Option<&str>) -> String {
    let options: String = rollercoasters
        .iter()
        .map(|name| {
            let name = html_escape(name);
            format!(r#"<option value="{name}">{name}</option>"#)
        })
        .collect();

    let error = error.map_or_else(String::new, |e| {
        format!(r#"<div class="alert alert-danger">{}</div>"#, html_escape(e))
    });

    let body = format!(
        r#"<h1>Write a review</h1>
{error}
<form action="/add_review" method="post" class="review-form">
<label for="rollercoaster">Rollercoaster</label>
<select id="rollercoaster" name="rollercoaster" required>{options}</select>
<label for="rating">Rating (0-10)</label>
<input id="rating" name="rating" type="number" min="0" max="10" step="0.01" required>
<label for="content">Review</label>
<textarea id="content" name="content" maxlength="400" rows="6" required></textarea>
<button type="submit">Post review</button>
</form>"#
    );

    layout::render(ctx, "Write a review", &body)
}
