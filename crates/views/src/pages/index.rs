use super::{empty_state, rollercoaster_link, user_link};
use crate::{PageContext, layout, pages::reviews::review_card};
use coaster_core::IndexRankings;

/// Home page with the four rankings.
#[must_use]
pub fn index(ctx: &PageContext, rankings: &IndexRankings) -> String {
    let trending_rollercoasters = if rankings.trending_rollercoasters.is_empty() {
        empty_state("Nothing has been reviewed in the last day and a half.")
    } else {
        let items: String = rankings
            .trending_rollercoasters
            .iter()
            .map(|t| {
                format!(
                    "<li>{} <span class=\"count\">{} new review{}</span></li>",
                    rollercoaster_link(&t.rollercoaster),
                    t.review_count,
                    plural(t.review_count),
                )
            })
            .collect();
        format!("<ol>{items}</ol>")
    };

    let trending_reviews = if rankings.trending_reviews.is_empty() {
        empty_state("No review has been liked recently.")
    } else {
        rankings
            .trending_reviews
            .iter()
            .map(|t| review_card(ctx, &t.review, Some(&t.author), Some(&t.rollercoaster)))
            .collect()
    };

    let highest_rated = if rankings.highest_rated.is_empty() {
        empty_state("No ratings yet.")
    } else {
        let items: String = rankings
            .highest_rated
            .iter()
            .map(|r| {
                format!(
                    "<li>{} <span class=\"rating\">{:.2} / 10</span> <span class=\"count\">({} review{})</span></li>",
                    rollercoaster_link(&r.rollercoaster),
                    r.average_score,
                    r.review_count,
                    plural(r.review_count),
                )
            })
            .collect();
        format!("<ol>{items}</ol>")
    };

    let most_liked_users = if rankings.most_liked_users.is_empty() {
        empty_state("No likes yet.")
    } else {
        let items: String = rankings
            .most_liked_users
            .iter()
            .map(|u| {
                format!(
                    "<li>{} <span class=\"count\">{} like{}</span></li>",
                    user_link(&u.user),
                    u.total_likes,
                    plural(u.total_likes),
                )
            })
            .collect();
        format!("<ol>{items}</ol>")
    };

    let body = format!(
        r#"<div class="grid">
<section><h2>Trending rollercoasters</h2>{trending_rollercoasters}</section>
<section><h2>Highest rated</h2>{highest_rated}</section>
<section><h2>Most liked reviewers</h2>{most_liked_users}</section>
</div>
<section><h2>Trending reviews</h2>{trending_reviews}</section>"#
    );

    layout::render(ctx, "Home", &body)
}

/// Not-found page.
#[must_use]
pub fn not_found(ctx: &PageContext) -> String {
    layout::render(
        ctx,
        "Not found",
        r#"<section class="not-found">
<h1>404</h1>
<p>That page went off the rails.</p>
<p><a href="/">Back to the station</a></p>
</section>"#,
    )
}

const fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use coaster_core::{LikedUser, RatedRollercoaster, TrendingRollercoaster};
    use coaster_db::entities::{rollercoaster, user};

    fn test_coaster(id: &str, name: &str) -> rollercoaster::Model {
        rollercoaster::Model {
            id: id.to_string(),
            name: name.to_string(),
            year: 2015,
            height: 99.1,
            length: 2012.0,
            manufacturer: "Bolliger & Mabillard".to_string(),
            model: "Giga Coaster".to_string(),
            inversions: 0,
            speed: 153.0,
        }
    }

    fn test_user(id: &str, name: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: name.to_string(),
            name_lower: name.to_lowercase(),
            password: "hash".to_string(),
            token: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_index_empty_states() {
        let html = index(&PageContext::anonymous(), &IndexRankings::default());

        assert!(html.contains("Trending rollercoasters"));
        assert!(html.contains("No ratings yet."));
        assert!(html.contains("No likes yet."));
        assert!(html.contains("No review has been liked recently."));
    }

    #[test]
    fn test_index_lists_rankings() {
        let rankings = IndexRankings {
            trending_rollercoasters: vec![TrendingRollercoaster {
                rollercoaster: test_coaster("rc1", "Fury 325"),
                review_count: 1,
            }],
            trending_reviews: vec![],
            highest_rated: vec![RatedRollercoaster {
                rollercoaster: test_coaster("rc1", "Fury 325"),
                average_score: 9.5,
                review_count: 2,
            }],
            most_liked_users: vec![LikedUser {
                user: test_user("u1", "Ann"),
                total_likes: 7,
            }],
        };

        let html = index(&PageContext::anonymous(), &rankings);

        assert!(html.contains(r#"<a href="/rollercoaster/rc1">Fury 325</a>"#));
        assert!(html.contains("1 new review<"));
        assert!(html.contains("9.50 / 10"));
        assert!(html.contains("(2 reviews)"));
        assert!(html.contains(r#"<a href="/profile/u1">Ann</a>"#));
        assert!(html.contains("7 likes"));
    }

    #[test]
    fn test_not_found_page() {
        let html = not_found(&PageContext::anonymous());
        assert!(html.contains("404"));
        assert!(html.contains(r#"href="/""#));
    }
}
