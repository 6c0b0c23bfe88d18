//! Video id extraction for the embed rewrite

use url::Url;

const SHORT_LINK_HOST: &str = "youtu.be";

/// Path prefixes that carry the id as the next segment.
const ID_PATH_PREFIXES: &[&str] = &["shorts", "live", "v"];

/// Extract a video id from a watch page, share link or short link.
///
/// Returns `None` for URLs that are already embed paths, that carry no id,
/// or whose id contains characters the platform never uses.
pub fn video_id(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(video_id_from)
}

pub(crate) fn video_id_from(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = if host == SHORT_LINK_HOST {
        segments.next().map(str::to_string)
    } else {
        match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            prefix if ID_PATH_PREFIXES.contains(&prefix) => segments.next().map(str::to_string),
            _ => None,
        }
    };

    candidate.filter(|id| is_valid_id(id))
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
