use std::sync::LazyLock;

use regex::Regex;

use crate::error::{MetaError, Result};

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("static regex"));
// usernames are ASCII only
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_\n]|_)@([A-Za-z0-9_](?:[A-Za-z0-9_.]{0,28}[A-Za-z0-9_])?)")
        .expect("static regex")
});

/// Pull the post shortcode out of an Instagram URL.
///
/// Reel links use the last path segment; post links (`/p/<code>/`) use the
/// segment before the trailing slash.
pub fn parse_shortcode(url: &str) -> Result<String> {
    let bare = url.split(['?', '#']).next().unwrap_or_default();

    let shortcode = if bare.contains("reel") {
        bare.trim_end_matches('/').rsplit('/').next()
    } else {
        let segments: Vec<&str> = bare.split('/').collect();
        segments
            .len()
            .checked_sub(2)
            .and_then(|i| segments.get(i))
            .copied()
    };

    match shortcode {
        Some(code) if !code.is_empty() && !code.contains(':') => Ok(code.to_string()),
        _ => Err(MetaError::InvalidUrl("Instagram".to_string())),
    }
}

pub fn caption_hashtags(caption: &str) -> Vec<String> {
    HASHTAG_RE
        .captures_iter(caption)
        .map(|c| c[1].to_lowercase())
        .collect()
}

pub fn caption_mentions(caption: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(caption)
        .map(|c| c[1].to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shortcode_reel() {
        assert_eq!(
            parse_shortcode("https://www.instagram.com/reel/C1a2B3c4D5e/").unwrap(),
            "C1a2B3c4D5e"
        );
        assert_eq!(
            parse_shortcode("https://www.instagram.com/reel/C1a2B3c4D5e?igsh=abc").unwrap(),
            "C1a2B3c4D5e"
        );
    }

    #[test]
    fn test_parse_shortcode_post() {
        assert_eq!(
            parse_shortcode("https://www.instagram.com/p/Bxyz123/").unwrap(),
            "Bxyz123"
        );
        // without a trailing slash the segment before the code is taken
        assert_eq!(
            parse_shortcode("https://www.instagram.com/p/Bxyz123").unwrap(),
            "p"
        );
    }

    #[test]
    fn test_parse_shortcode_invalid() {
        let err = parse_shortcode("nonsense").unwrap_err();
        assert_eq!(err.to_string(), "Invalid Instagram URL format");
        assert!(parse_shortcode("https://").is_err());
    }

    #[test]
    fn test_caption_tags() {
        let caption = "Sunset run #Goa #travel_diaries with @friend.one and @you mail@host";
        assert_eq!(caption_hashtags(caption), vec!["goa", "travel_diaries"]);
        assert_eq!(caption_mentions(caption), vec!["friend.one", "you"]);
    }

    #[test]
    fn test_hashtags_without_separator() {
        assert_eq!(caption_hashtags("loved it#sunset ##goa"), vec!["sunset", "goa"]);
        assert_eq!(caption_hashtags("#चाय time"), vec!["चाय"]);
    }

    #[test]
    fn test_mentions_ascii_only() {
        assert_eq!(caption_mentions("hi @café_fan"), vec!["caf"]);
        assert_eq!(caption_mentions("(@Pal) _@under"), vec!["pal", "under"]);
    }
}
