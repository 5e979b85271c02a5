//! Recognized social platforms, component slots, and math renderers.
//!
//! Keys in the configuration file are matched against these fixed
//! enumerations; unknown keys are validation errors rather than silently
//! carried strings.

/// Social platform recognized in the `[social]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SocialPlatform {
    Github,
    X,
    Discord,
    Linkedin,
    Telegram,
    Youtube,
    Reddit,
    Mastodon,
    Twitch,
}

impl SocialPlatform {
    /// Canonical configuration key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::X => "x",
            Self::Discord => "discord",
            Self::Linkedin => "linkedin",
            Self::Telegram => "telegram",
            Self::Youtube => "youtube",
            Self::Reddit => "reddit",
            Self::Mastodon => "mastodon",
            Self::Twitch => "twitch",
        }
    }

    /// Parse a configuration key, accepting historical aliases.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "github" => Some(Self::Github),
            "x" | "x.com" | "twitter" => Some(Self::X),
            "discord" => Some(Self::Discord),
            "linkedin" => Some(Self::Linkedin),
            "telegram" => Some(Self::Telegram),
            "youtube" => Some(Self::Youtube),
            "reddit" => Some(Self::Reddit),
            "mastodon" => Some(Self::Mastodon),
            "twitch" => Some(Self::Twitch),
            _ => None,
        }
    }
}

/// UI slot that can be overridden with a custom component file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComponentSlot {
    PageFrame,
    Header,
    ContentPanel,
    Sidebar,
    SiteTitle,
    Footer,
}

impl ComponentSlot {
    /// Canonical configuration key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PageFrame => "page_frame",
            Self::Header => "header",
            Self::ContentPanel => "content_panel",
            Self::Sidebar => "sidebar",
            Self::SiteTitle => "site_title",
            Self::Footer => "footer",
        }
    }

    /// Parse a configuration key.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "page_frame" => Some(Self::PageFrame),
            "header" => Some(Self::Header),
            "content_panel" => Some(Self::ContentPanel),
            "sidebar" => Some(Self::Sidebar),
            "site_title" => Some(Self::SiteTitle),
            "footer" => Some(Self::Footer),
            _ => None,
        }
    }
}

/// Math markup renderer the external markdown pipeline should enable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MathRenderer {
    /// Math markup is passed through untransformed.
    #[default]
    None,
    Mathjax,
    Katex,
}

impl MathRenderer {
    /// Canonical configuration value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mathjax => "mathjax",
            Self::Katex => "katex",
        }
    }

    /// Parse a configuration value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "mathjax" => Some(Self::Mathjax),
            "katex" => Some(Self::Katex),
            _ => None,
        }
    }
}
