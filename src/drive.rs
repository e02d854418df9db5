//! Google Drive link rewriting.
//!
//! Photos are often pasted as Drive *sharing* links, which serve an HTML
//! viewer rather than the image. Two sharing shapes carry the file id:
//!
//! ```text
//! https://drive.google.com/file/d/<id>/view?usp=sharing
//! https://drive.google.com/open?id=<id>
//! ```
//!
//! Both rewrite to the direct image host `https://lh3.googleusercontent.com/d/<id>`.
//! Anything else passes through untouched.

use url::Url;

const DRIVE_HOST: &str = "drive.google.com";
const DIRECT_HOST: &str = "https://lh3.googleusercontent.com/d/";

/// Whether `url` points at Google Drive.
pub fn is_drive_link(url: &str) -> bool {
    url.contains(DRIVE_HOST)
}

/// Extract the file id from a Drive sharing link.
///
/// An explicit `id=` query parameter wins over a `/file/d/<id>` path.
pub fn drive_file_id(url: &str) -> Option<String> {
    if !is_drive_link(url) {
        return None;
    }
    let parsed = Url::parse(url).ok()?;

    let from_query = parsed
        .query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned());

    let from_path = || {
        let segments: Vec<&str> = parsed.path_segments()?.collect();
        segments
            .windows(3)
            .find(|w| w[0] == "file" && w[1] == "d")
            .map(|w| w[2].to_string())
    };

    from_query
        .or_else(from_path)
        .filter(|id| is_valid_id(id))
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Rewrite a Drive sharing link to a direct image URL.
///
/// # Examples
/// ```
/// # use scrapbook::drive::transform_drive_link;
/// assert_eq!(
///     transform_drive_link("https://drive.google.com/file/d/abc_123/view?usp=sharing"),
///     "https://lh3.googleusercontent.com/d/abc_123"
/// );
/// assert_eq!(transform_drive_link("https://example.com/a.jpg"), "https://example.com/a.jpg");
/// ```
pub fn transform_drive_link(url: &str) -> String {
    match drive_file_id(url) {
        Some(id) => format!("{DIRECT_HOST}{id}"),
        None => url.to_string(),
    }
}

/// A smaller preview of a Drive file, `size` pixels wide.
///
/// Non-Drive URLs pass through untouched.
pub fn drive_thumbnail(url: &str, size: u32) -> String {
    match drive_file_id(url) {
        Some(id) => format!("https://{DRIVE_HOST}/thumbnail?id={id}&sz=w{size}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_path_link() {
        let url = "https://drive.google.com/file/d/1wOhyUNhAZDgG6gWxo9Y9a7BgLWDBgwwl/view?usp=sharing";
        assert_eq!(
            transform_drive_link(url),
            "https://lh3.googleusercontent.com/d/1wOhyUNhAZDgG6gWxo9Y9a7BgLWDBgwwl"
        );
    }

    #[test]
    fn open_id_link() {
        let url = "https://drive.google.com/open?id=XYZ-789";
        assert_eq!(drive_file_id(url).as_deref(), Some("XYZ-789"));
    }

    #[test]
    fn query_id_wins_over_path() {
        let url = "https://drive.google.com/file/d/pathid/view?id=queryid";
        assert_eq!(drive_file_id(url).as_deref(), Some("queryid"));
    }

    #[test]
    fn non_drive_link_passes_through() {
        let url = "https://images.example.com/photo.jpg";
        assert!(!is_drive_link(url));
        assert_eq!(transform_drive_link(url), url);
    }

    #[test]
    fn drive_link_without_id_passes_through() {
        let url = "https://drive.google.com/drive/folders";
        assert_eq!(transform_drive_link(url), url);
    }

    #[test]
    fn invalid_id_characters_rejected() {
        let url = "https://drive.google.com/open?id=bad%20id";
        assert_eq!(drive_file_id(url), None);
    }

    #[test]
    fn empty_url() {
        assert_eq!(transform_drive_link(""), "");
    }

    #[test]
    fn thumbnail_url() {
        let url = "https://drive.google.com/file/d/abc/view";
        assert_eq!(
            drive_thumbnail(url, 400),
            "https://drive.google.com/thumbnail?id=abc&sz=w400"
        );
        assert_eq!(drive_thumbnail("x.jpg", 400), "x.jpg");
    }
}
