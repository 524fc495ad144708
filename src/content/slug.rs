//! URL slugs: lowercase ASCII words joined by single hyphens.

/// Whether `slug` matches `^[a-z0-9]+(-[a-z0-9]+)*$`.
pub fn is_valid(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9')))
}

/// Derive a slug from free text. Returns `None` when nothing usable is left.
pub fn slugify(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
        // other punctuation is dropped
    }
    (!out.is_empty()).then_some(out)
}

/// First of `base`, `base-2`, `base-3`, ... that `taken` rejects.
pub fn unique(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_slug_shape() {
        for ok in ["bitcoin", "market-analysis", "eth2", "a-1-b"] {
            assert!(is_valid(ok), "{ok}");
        }
        for bad in ["", "-a", "a-", "a--b", "Market", "a b", "a_b", "café"] {
            assert!(!is_valid(bad), "{bad}");
        }
    }

    #[test]
    fn slugifies_titles() {
        assert_eq!(
            slugify("Ethereum 2.0 Upgrade Timeline: What You Need to Know").as_deref(),
            Some("ethereum-20-upgrade-timeline-what-you-need-to-know")
        );
        assert_eq!(
            slugify("  Bitcoin Surges Past $60,000 ").as_deref(),
            Some("bitcoin-surges-past-60000")
        );
        assert_eq!(slugify("!!!"), None);
    }

    #[test]
    fn slugify_output_is_valid() {
        for title in ["A -- B", "__x__", "Roundup: This Week in Crypto", "DeFi & NFTs"] {
            let slug = slugify(title).unwrap();
            assert!(is_valid(&slug), "{title} -> {slug}");
        }
    }

    #[test]
    fn unique_appends_counter() {
        let taken = ["news", "news-2"];
        assert_eq!(unique("news", |s| taken.contains(&s)), "news-3");
        assert_eq!(unique("fresh", |s| taken.contains(&s)), "fresh");
    }
}
