//! Media link extraction from free text.
//!
//! Only two shapes of URL are picked up: YouTube watch/short links, and
//! URLs ending in a known media extension. Everything else in the text is
//! ignored.

use std::sync::LazyLock;

use regex::Regex;

/// YouTube links (group `youtube`) or URLs with a media extension (group `media`).
static MEDIA_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<youtube>(?:https?|ftp)://(?:[\w\-]+\.)*(?:youtube\.com/watch\?v=|youtu\.be/)[a-zA-Z0-9_\-]{11})",
        r"|(?P<media>(?:https?|ftp)://[\w/\-?=%.]+\.(?:mp3|mp4|jpeg|jpg|png|webp|mov|ogg|gif))",
    ))
    .expect("media URL regex should compile")
});

const VIDEO_EXTENSIONS: &[&str] = &[".mov", ".mp4"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".ogg"];
const IMAGE_EXTENSIONS: &[&str] = &[".webp", ".jpg", ".jpeg", ".gif", ".png"];

/// What a classified link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Image,
    Video,
    Youtube,
    Audio,
    Url,
}

/// A classified link with its normalized URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub kind: LinkKind,
    pub url: String,
}

/// Extract media links from `text`, in order of appearance.
pub fn classify(text: &str) -> Vec<Link> {
    MEDIA_URL_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            if let Some(m) = caps.name("youtube") {
                Some(youtube_link(m.as_str()))
            } else {
                caps.name("media").map(|m| media_link(m.as_str()))
            }
        })
        .collect()
}

fn youtube_link(url: &str) -> Link {
    let video_id = match url.split_once("youtu.be/") {
        Some((_, rest)) => rest.split(['?', '/']).next().unwrap_or(""),
        None => query_param(url, "v").unwrap_or(""),
    };

    Link {
        kind: LinkKind::Youtube,
        url: format!("https://www.youtube.com/embed/{video_id}"),
    }
}

fn media_link(url: &str) -> Link {
    let stripped = strip_querystring(url);
    let has_ext = |exts: &[&str]| exts.iter().any(|ext| stripped.ends_with(ext));

    let kind = if has_ext(VIDEO_EXTENSIONS) {
        LinkKind::Video
    } else if has_ext(AUDIO_EXTENSIONS) {
        LinkKind::Audio
    } else if has_ext(IMAGE_EXTENSIONS) {
        LinkKind::Image
    } else {
        LinkKind::Url
    };

    Link {
        kind,
        url: stripped.to_string(),
    }
}

fn strip_querystring(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

fn query_param<'a>(url: &'a str, key: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
