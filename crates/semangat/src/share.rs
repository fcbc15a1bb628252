//! Social share link builder.

/// Platforms with a known share URL template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Facebook,
    Twitter,
    Instagram,
    TikTok,
}

impl Platform {
    /// Case-insensitive lookup; `None` for unknown platforms.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "facebook" => Some(Platform::Facebook),
            "twitter" => Some(Platform::Twitter),
            "instagram" => Some(Platform::Instagram),
            "tiktok" => Some(Platform::TikTok),
            _ => None,
        }
    }
}

/// Build the share URL for `platform`.
///
/// Unknown platforms get the raw `url` back unchanged (or an empty string).
pub fn share_url(platform: &str, text: Option<&str>, url: Option<&str>) -> String {
    let Some(platform) = Platform::parse(platform) else {
        return url.unwrap_or_default().to_string();
    };

    let t = urlencoding::encode(text.unwrap_or_default());
    let u = urlencoding::encode(url.unwrap_or_default());

    match platform {
        Platform::Facebook => {
            format!("https://www.facebook.com/sharer/sharer.php?u={u}&quote={t}")
        }
        Platform::Twitter => format!("https://twitter.com/intent/tweet?text={t}&url={u}"),
        // No parameterised share endpoint
        Platform::Instagram => "https://www.instagram.com/".to_string(),
        Platform::TikTok => format!("https://www.tiktok.com/search?q={t}"),
    }
}
