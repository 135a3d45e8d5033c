use crate::error::{MetaError, Result};

/// Parse the video id out of `dailymotion.com/video/<id>` or `dai.ly/<id>` links
pub fn parse_id(url: &str) -> Result<String> {
    let id = if let Some((_, rest)) = url.split_once("dailymotion.com/video/") {
        rest.split('_').next().and_then(|s| s.split('?').next())
    } else if let Some((_, rest)) = url.split_once("dai.ly/") {
        rest.split('?').next()
    } else {
        None
    };

    match id {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(MetaError::InvalidUrl("Dailymotion".to_string())),
    }
}

pub fn is_dailymotion_short_url(url: &str) -> bool {
    url.contains("dai.ly/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_long_form() {
        assert_eq!(
            parse_id("https://www.dailymotion.com/video/x8abc12").unwrap(),
            "x8abc12"
        );
        assert_eq!(
            parse_id("https://www.dailymotion.com/video/x8abc12_some-slug").unwrap(),
            "x8abc12"
        );
        assert_eq!(
            parse_id("https://www.dailymotion.com/video/x8abc12?playlist=x6hynp").unwrap(),
            "x8abc12"
        );
    }

    #[test]
    fn test_parse_id_short_form() {
        assert_eq!(parse_id("https://dai.ly/x1abcde").unwrap(), "x1abcde");
        assert_eq!(parse_id("https://dai.ly/x1abcde?start=10").unwrap(), "x1abcde");
        assert!(is_dailymotion_short_url("https://dai.ly/x1abcde"));
    }

    #[test]
    fn test_parse_id_invalid() {
        for url in [
            "https://www.dailymotion.com/user/someone",
            "https://dai.ly/",
            "https://example.com/video/x1",
        ] {
            let err = parse_id(url).unwrap_err();
            assert_eq!(err.to_string(), "Invalid Dailymotion URL format");
        }
    }
}
