//! One-shot messages shown after a redirect.

/// A message carried across one redirect in a cookie.
///
/// Only the key travels in the cookie; the text lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    ReviewWritten,
    SignedUp,
    LoggedOut,
}

impl Flash {
    /// Cookie-safe key for this message.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ReviewWritten => "review-written",
            Self::SignedUp => "signed-up",
            Self::LoggedOut => "logged-out",
        }
    }

    /// Parse a key written by [`Flash::key`]. Unknown keys are ignored.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "review-written" => Some(Self::ReviewWritten),
            "signed-up" => Some(Self::SignedUp),
            "logged-out" => Some(Self::LoggedOut),
            _ => None,
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ReviewWritten => "Review Written!",
            Self::SignedUp => "Welcome aboard! Your account is ready.",
            Self::LoggedOut => "You have been logged out.",
        }
    }

    /// CSS class of the alert box.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::ReviewWritten | Self::SignedUp => "alert-success",
            Self::LoggedOut => "alert-info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for flash in [Flash::ReviewWritten, Flash::SignedUp, Flash::LoggedOut] {
            assert_eq!(Flash::from_key(flash.key()), Some(flash));
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(Flash::from_key("<script>"), None);
    }

    #[test]
    fn test_review_written_message() {
        assert_eq!(Flash::ReviewWritten.message(), "Review Written!");
        assert_eq!(Flash::ReviewWritten.class(), "alert-success");
    }
}
