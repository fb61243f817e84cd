//! Page renderers, one function per page.

mod auth;
mod index;
mod rollercoasters;
mod reviews;
mod users;

pub use auth::{login, signup};
pub use index::{index, not_found};
pub use reviews::{review, write_review};
pub use rollercoasters::{rollercoaster, rollercoasters};
pub use users::{profile, users};

use crate::html_escape;
use chrono::{DateTime, FixedOffset};
use coaster_db::entities::{rollercoaster::Model as RollercoasterModel, user::Model as UserModel};

fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "No ratings yet".to_string(), |s| format!("{s:.2} / 10"))
}

fn user_link(user: &UserModel) -> String {
    format!(
        r#"<a href="/profile/{id}">{name}</a>"#,
        id = html_escape(&user.id),
        name = html_escape(&user.name),
    )
}

fn rollercoaster_link(rollercoaster: &RollercoasterModel) -> String {
    format!(
        r#"<a href="/rollercoaster/{id}">{name}</a>"#,
        id = html_escape(&rollercoaster.id),
        name = html_escape(&rollercoaster.name),
    )
}

fn empty_state(message: &str) -> String {
    format!(r#"<p class="empty">{}</p>"#, html_escape(message))
}
