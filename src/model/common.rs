use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type Id = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// Derive a URL-safe slug from a display name: lowercase, spaces become
/// hyphens, anything outside `[A-Za-z0-9_-]` is stripped.
///
/// Only used when a create request omits the slug; an already-set slug is
/// never re-derived on rename.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// One label/value row rendered in a product's technical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSpec {
    pub label: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Clasps"), "clasps");
        assert_eq!(slugify("Spring Rings"), "spring-rings");
    }

    #[test]
    fn test_slugify_strips_non_word_characters() {
        assert_eq!(slugify("Chain & Link 2"), "chain--link-2");
        assert_eq!(slugify("Éclat!"), "clat");
        assert_eq!(slugify("lobster_claw"), "lobster_claw");
    }

    #[test]
    fn test_generate_id_is_unique() {
        assert_ne!(generate_id(), generate_id());
    }
}
