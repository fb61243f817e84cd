use crate::{PageContext, html_escape, layout};

fn error_box(error: Option<&str>) -> String {
    error.map_or_else(String::new, |e| {
        format!(r#"<div class="alert alert-danger">{}</div>"#, html_escape(e))
    })
}

/// Login form. `error` is shown after a failed attempt.
#[must_use]
pub fn login(ctx: &PageContext, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Log in</h1>
{error}
<form action="/login" method="post" class="auth-form">
<label for="name">Name</label>
<input id="name" name="name" type="text" autocomplete="username" required>
<label for="password">Password</label>
<input id="password" name="password" type="password" autocomplete="current-password" required>
<button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/signup">Sign up</a></p>"#,
        error = error_box(error),
    );

    layout::render(ctx, "Log in", &body)
}

/// Signup form. `error` is shown after a rejected attempt.
#[must_use]
pub fn signup(ctx: &PageContext, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Sign up</h1>
{error}
<form action="/signup" method="post" class="auth-form">
<label for="name">Name</label>
<input id="name" name="name" type="text" maxlength="100" autocomplete="username" required>
<label for="password">Password</label>
<input id="password" name="password" type="password" minlength="8" maxlength="128" autocomplete="new-password" required>
<button type="submit">Sign up</button>
</form>
<p>Already have an account? <a href="/login">Log in</a></p>"#,
        error = error_box(error),
    );

    layout::render(ctx, "Sign up", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form() {
        let html = login(&PageContext::anonymous(), None);

        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains(r#"name="password""#));
        assert!(!html.contains("alert-danger"));
    }

    #[test]
    fn test_login_error() {
        let html = login(
            &PageContext::anonymous(),
            Some("Please check your login details and try again."),
        );
        assert!(html.contains("Please check your login details and try again."));
    }

    #[test]
    fn test_signup_error_escaped() {
        let html = signup(&PageContext::anonymous(), Some("<oops>"));
        assert!(html.contains("&lt;oops&gt;"));
        assert!(html.contains(r#"action="/signup""#));
    }
}
