//! Cache-Control policy for outgoing responses. Every request path falls
//! into exactly one of four buckets, checked in order: static asset
//! extension, `/api/` prefix, bracketed dynamic-route segment, static page.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, VARY};
use std::collections::HashSet;
use std::path::Path;

const STATIC_ASSET_EXTENSIONS: &[&str] = &[
    "js", "css", "map", "ico", "png", "jpg", "jpeg", "gif", "svg", "webp", "avif", "woff",
    "woff2", "ttf", "otf",
];

/// Hashed build assets never change under the same name.
const STATIC_ASSET_POLICY: &str = "public, max-age=31536000, immutable";
const API_POLICY: &str = "public, max-age=60, stale-while-revalidate=300";
const DYNAMIC_ROUTE_POLICY: &str = "public, max-age=300, stale-while-revalidate=3600";
const PAGE_POLICY: &str = "public, max-age=3600, stale-while-revalidate=86400";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheClass {
    StaticAsset,
    Api,
    DynamicRoute,
    Page,
}

pub fn classify(path: &str) -> CacheClass {
    if has_static_extension(path) {
        CacheClass::StaticAsset
    } else if path.starts_with("/api/") {
        CacheClass::Api
    } else if path.contains('[') && path.contains(']') {
        CacheClass::DynamicRoute
    } else {
        CacheClass::Page
    }
}

pub fn cache_control(class: CacheClass) -> &'static str {
    match class {
        CacheClass::StaticAsset => STATIC_ASSET_POLICY,
        CacheClass::Api => API_POLICY,
        CacheClass::DynamicRoute => DYNAMIC_ROUTE_POLICY,
        CacheClass::Page => PAGE_POLICY,
    }
}

/// Sets the bucket's `Cache-Control` plus the fixed `Vary` and
/// `X-Content-Type-Options` headers on an outgoing response.
pub fn apply_headers(path: &str, headers: &mut HeaderMap) {
    let policy = cache_control(classify(path));

    headers.insert(CACHE_CONTROL, HeaderValue::from_static(policy));
    headers.insert(VARY, HeaderValue::from_static("Accept-Encoding"));
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
}

fn has_static_extension(path: &str) -> bool {
    let allowed: HashSet<&str> = STATIC_ASSET_EXTENSIONS.iter().copied().collect();

    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.contains(ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_assets_are_classified_by_extension() {
        assert_eq!(classify("/_next/static/chunks/main.js"), CacheClass::StaticAsset);
        assert_eq!(classify("/images/campus-isib.WEBP"), CacheClass::StaticAsset);
        assert_eq!(classify("/fonts/inter.woff2"), CacheClass::StaticAsset);
        assert_eq!(classify("/favicon.ico"), CacheClass::StaticAsset);
    }

    #[test]
    fn extension_check_wins_over_api_prefix() {
        assert_eq!(classify("/api/og-image.png"), CacheClass::StaticAsset);
    }

    #[test]
    fn api_routes_get_the_short_policy() {
        assert_eq!(classify("/api/contact"), CacheClass::Api);
        assert_eq!(classify("/api/news/latest"), CacheClass::Api);
    }

    #[test]
    fn bracketed_segments_are_dynamic_routes() {
        assert_eq!(classify("/actualites/[slug]"), CacheClass::DynamicRoute);
        assert_eq!(classify("/campus/[campusId]/equipe"), CacheClass::DynamicRoute);
    }

    #[test]
    fn everything_else_is_a_static_page() {
        assert_eq!(classify("/"), CacheClass::Page);
        assert_eq!(classify("/services"), CacheClass::Page);
        assert_eq!(classify("/contact"), CacheClass::Page);
    }

    #[test]
    fn apply_headers_sets_all_three_headers() {
        let mut headers = HeaderMap::new();
        apply_headers("/_next/static/chunks/main.js", &mut headers);

        assert_eq!(
            headers.get(CACHE_CONTROL).unwrap(),
            "public, max-age=31536000, immutable"
        );
        assert_eq!(headers.get(VARY).unwrap(), "Accept-Encoding");
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    }

    #[test]
    fn page_policy_is_the_default() {
        let mut headers = HeaderMap::new();
        apply_headers("/contact", &mut headers);

        assert_eq!(
            headers.get(CACHE_CONTROL).unwrap(),
            "public, max-age=3600, stale-while-revalidate=86400"
        );
    }
}
