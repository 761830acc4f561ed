use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating explicit slug fields.
    /// Must be lowercase alphanumeric with single hyphens
    /// - Valid: "local-news", "sports2024", "off-topic"
    /// - Invalid: "-news", "news-", "off--topic", "News", "off_topic"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Derive a URL-safe slug from a display name: lowercased, accents folded
/// to ASCII, non-alphanumeric runs collapsed to a single hyphen, leading
/// and trailing hyphens trimmed.
///
/// May return an empty string when the name contains no usable characters;
/// callers must treat that as a validation failure.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars().flat_map(|c| c.to_lowercase()) {
        let c = fold_accent(c);
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Map common accented Latin characters to their ASCII base letter.
/// Anything unmapped and non-alphanumeric becomes a separator in `slugify`.
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => 'a',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => 'u',
        'ç' | 'ć' | 'č' => 'c',
        'ñ' | 'ń' => 'n',
        'ß' => 's',
        'ý' | 'ÿ' => 'y',
        'ž' => 'z',
        'š' => 's',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("local-news"));
        assert!(SLUG_REGEX.is_match("sports2024"));
        assert!(SLUG_REGEX.is_match("a"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-news")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("news-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("off--topic")); // double hyphen
        assert!(!SLUG_REGEX.is_match("News")); // uppercase
        assert!(!SLUG_REGEX.is_match("off_topic")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("local news")); // space
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Local News"), "local-news");
        assert_eq!(slugify("Sports 2024"), "sports-2024");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("Off -- Topic!!"), "off-topic");
        assert_eq!(slugify("  General  "), "general");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Économie & Société"), "economie-societe");
        assert_eq!(slugify("Fußball"), "fusball");
        assert_eq!(slugify("Año Nuevo"), "ano-nuevo");
    }

    #[test]
    fn test_slugify_empty_when_no_usable_chars() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_output_passes_slug_regex() {
        for name in ["Local News", "Économie & Société", "a  b", "X"] {
            let slug = slugify(name);
            assert!(SLUG_REGEX.is_match(&slug), "bad slug {:?} from {:?}", slug, name);
        }
    }
}
