//! Redirect path resolution.
//!
//! The site layout is fixed and shallow: reports at the root or one
//! directory down, archived reports two directories down under `archive/`.
//! The auth page lives at the root, so the path back to it is a function of
//! directory depth alone. This is deliberately not a general relative-URL
//! resolver.

/// Marker for pages two levels below the site root.
const ARCHIVE_SEGMENT: &str = "/archive/";

/// Last segment of `path`, or `default_page` when the path is empty or ends
/// in a slash. This is what gets stored as the Return-Page Marker.
pub fn current_page(path: &str, default_page: &str) -> String {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => default_page.to_string(),
    }
}

/// Relative path from `path` to the auth page at the site root.
pub fn auth_path(path: &str, auth_page: &str) -> String {
    if path.contains(ARCHIVE_SEGMENT) {
        format!("../../{}", auth_page)
    } else if path.matches('/').count() > 1 {
        format!("../{}", auth_page)
    } else {
        auth_page.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_page_last_segment() {
        assert_eq!(current_page("/reports/daily.html", "index.html"), "daily.html");
        assert_eq!(current_page("/index.html", "index.html"), "index.html");
    }

    #[test]
    fn test_current_page_defaults_on_trailing_slash() {
        assert_eq!(current_page("/", "index.html"), "index.html");
        assert_eq!(current_page("/reports/", "index.html"), "index.html");
        assert_eq!(current_page("", "index.html"), "index.html");
    }

    #[test]
    fn test_auth_path_archive_goes_up_two() {
        assert_eq!(
            auth_path("/reports/archive/2024-q3/index.html", "auth.html"),
            "../../auth.html"
        );
    }

    #[test]
    fn test_auth_path_subdirectory_goes_up_one() {
        assert_eq!(auth_path("/reports/daily.html", "auth.html"), "../auth.html");
    }

    #[test]
    fn test_auth_path_root_is_bare() {
        assert_eq!(auth_path("/index.html", "auth.html"), "auth.html");
        assert_eq!(auth_path("index.html", "auth.html"), "auth.html");
    }
}
