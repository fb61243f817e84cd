use super::{UserModel, empty_state, format_date, format_score, user_link};
use crate::{PageContext, html_escape, layout, pages::reviews::review_card};
use coaster_core::UserProfile;
use coaster_db::entities::review;

/// Every user.
#[must_use]
pub fn users(ctx: &PageContext, users: &[UserModel]) -> String {
    let list = if users.is_empty() {
        empty_state("Nobody has signed up yet.")
    } else {
        let items: String = users
            .iter()
            .map(|u| {
                format!(
                    "<li>{} <span class=\"muted\">joined {}</span></li>",
                    user_link(u),
                    format_date(&u.created_at),
                )
            })
            .collect();
        format!("<ul class=\"users\">{items}</ul>")
    };

    layout::render(ctx, "Users", &format!("<h1>Users</h1>\n{list}"))
}

/// A user's profile: statistics and reviews.
#[must_use]
pub fn profile(ctx: &PageContext, profile: &UserProfile) -> String {
    let stats = &profile.stats;
    let is_own = ctx.user.as_ref().is_some_and(|u| u.id == profile.user.id);

    let reviews_html = if profile.reviews.is_empty() {
        if is_own {
            r#"<p class="empty">You have not written any reviews yet. <a href="/add_review">Write one!</a></p>"#
                .to_string()
        } else {
            empty_state("No reviews yet.")
        }
    } else {
        profile
            .reviews
            .iter()
            .map(|r| review_card(ctx, &r.review, None, Some(&r.rollercoaster)))
            .collect()
    };

    let body = format!(
        r#"<section class="profile">
<h1>{name}</h1>
<p class="muted">Member since {joined}</p>
<dl class="stats">
<dt>Reviews</dt><dd>{total_reviews}</dd>
<dt>Likes received</dt><dd>{total_likes}</dd>
<dt>Average rating</dt><dd>{average}</dd>
<dt>Highest rating</dt><dd>{highest}</dd>
<dt>Lowest rating</dt><dd>{lowest}</dd>
</dl>
</section>
<section class="reviews">
<h2>Reviews</h2>
{reviews_html}
</section>"#,
        name = html_escape(&profile.user.name),
        joined = format_date(&profile.user.created_at),
        total_reviews = stats.total_reviews,
        total_likes = stats.total_likes,
        average = format_score(stats.average),
        highest = rating_link(stats.highest.as_ref()),
        lowest = rating_link(stats.lowest.as_ref()),
    );

    layout::render(ctx, &profile.user.name, &body)
}

fn rating_link(review: Option<&review::Model>) -> String {
    review.map_or_else(
        || "-".to_string(),
        |r| {
            format!(
                r#"<a href="/review/{}">{:.2} / 10</a>"#,
                html_escape(&r.id),
                r.rating
            )
        },
    )
}
