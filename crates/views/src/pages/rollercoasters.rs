use super::{empty_state, format_score, rollercoaster_link};
use crate::{PageContext, html_escape, layout, pages::reviews::review_card};
use coaster_core::{ReviewWithAuthor, RollercoasterWithScore};

/// Every rollercoaster with its average score.
#[must_use]
pub fn rollercoasters(ctx: &PageContext, rollercoasters: &[RollercoasterWithScore]) -> String {
    let table = if rollercoasters.is_empty() {
        empty_state("No rollercoasters yet.")
    } else {
        let rows: String = rollercoasters
            .iter()
            .map(|entry| {
                let rc = &entry.rollercoaster;
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    rollercoaster_link(rc),
                    html_escape(&rc.manufacturer),
                    rc.year,
                    format_score(entry.average_score),
                )
            })
            .collect();

        format!(
            "<table class=\"table\">\n<thead><tr><th>Name</th><th>Manufacturer</th><th>Opened</th><th>Average score</th></tr></thead>\n<tbody>{rows}</tbody>\n</table>"
        )
    };

    layout::render(
        ctx,
        "Rollercoasters",
        &format!("<h1>Rollercoasters</h1>\n{table}"),
    )
}

/// One rollercoaster: its stats, its score and its reviews.
#[must_use]
pub fn rollercoaster(
    ctx: &PageContext,
    entry: &RollercoasterWithScore,
    reviews: &[ReviewWithAuthor],
) -> String {
    let rc = &entry.rollercoaster;

    let reviews_html = if reviews.is_empty() {
        empty_state("No reviews yet. Be the first!")
    } else {
        reviews
            .iter()
            .map(|r| review_card(ctx, &r.review, Some(&r.author), None))
            .collect()
    };

    let body = format!(
        r#"<section class="rollercoaster">
<h1>{name}</h1>
<p class="score">Average score: {score}</p>
<dl class="stats">
<dt>Manufacturer</dt><dd>{manufacturer}</dd>
<dt>Model</dt><dd>{model}</dd>
<dt>Opened</dt><dd>{year}</dd>
<dt>Height</dt><dd>{height} m</dd>
<dt>Length</dt><dd>{length} m</dd>
<dt>Speed</dt><dd>{speed} km/h</dd>
<dt>Inversions</dt><dd>{inversions}</dd>
</dl>
</section>
<section class="reviews">
<h2>Reviews</h2>
{reviews_html}
</section>"#,
        name = html_escape(&rc.name),
        score = format_score(entry.average_score),
        manufacturer = html_escape(&rc.manufacturer),
        model = html_escape(&rc.model),
        year = rc.year,
        height = rc.height,
        length = rc.length,
        speed = rc.speed,
        inversions = rc.inversions,
    );

    layout::render(ctx, &rc.name, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use coaster_db::entities::{review, rollercoaster, user};

    fn test_entry(score: Option<f64>) -> RollercoasterWithScore {
        RollercoasterWithScore {
            rollercoaster: rollercoaster::Model {
                id: "rc1".to_string(),
                name: "Nemesis".to_string(),
                year: 1994,
                height: 13.0,
                length: 716.0,
                manufacturer: "Bolliger & Mabillard".to_string(),
                model: "Inverted Coaster".to_string(),
                inversions: 4,
                speed: 80.0,
            },
            average_score: score,
        }
    }

    #[test]
    fn test_rollercoasters_table() {
        let html = rollercoasters(
            &PageContext::anonymous(),
            &[test_entry(Some(8.25)), test_entry(None)],
        );

        assert!(html.contains("Bolliger &amp; Mabillard"));
        assert!(html.contains("8.25 / 10"));
        assert!(html.contains("No ratings yet"));
    }

    #[test]
    fn test_rollercoaster_without_reviews() {
        let html = rollercoaster(&PageContext::anonymous(), &test_entry(None), &[]);

        assert!(html.contains("<h1>Nemesis</h1>"));
        assert!(html.contains("Inverted Coaster"));
        assert!(html.contains("No reviews yet"));
    }

    #[test]
    fn test_rollercoaster_with_reviews() {
        let reviews = vec![ReviewWithAuthor {
            review: review::Model {
                id: "r1".to_string(),
                user_id: "u1".to_string(),
                rollercoaster_id: "rc1".to_string(),
                rating: 9.0,
                review_text: "Still the best inverter".to_string(),
                likes: 4,
                created_at: Utc::now().into(),
            },
            author: user::Model {
                id: "u1".to_string(),
                name: "Ann".to_string(),
                name_lower: "ann".to_string(),
                password: "hash".to_string(),
                token: None,
                created_at: Utc::now().into(),
                updated_at: None,
            },
        }];

        let html = rollercoaster(&PageContext::anonymous(), &test_entry(Some(9.0)), &reviews);

        assert!(html.contains("Still the best inverter"));
        assert!(html.contains(r#"<a href="/profile/u1">Ann</a>"#));
        assert!(html.contains("9.00 / 10"));
    }
}
