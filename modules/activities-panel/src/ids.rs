//! Element identifiers derived from activity names.
//!
//! Names are free text, so they are slugged for readability and suffixed with
//! a hash prefix so that "Art Club" and "Art-Club" never share an id.

use sha2::{Digest, Sha256};

pub fn card_id(name: &str) -> String {
    format!("activity-{}", key(name))
}

pub fn edit_panel_id(name: &str) -> String {
    format!("edit-{}", key(name))
}

pub fn edit_form_id(name: &str) -> String {
    format!("edit-form-{}", key(name))
}

pub fn edit_message_id(name: &str) -> String {
    format!("edit-message-{}", key(name))
}

fn key(name: &str) -> String {
    let slug = slug(name);
    let hash = short_hash(name);
    if slug.is_empty() {
        hash
    } else {
        format!("{slug}-{hash}")
    }
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

fn short_hash(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    hex::encode(&digest[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_safe(id: &str) -> bool {
        id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    }

    #[test]
    fn ids_are_deterministic_and_selector_safe() {
        let id = card_id("Chess Club");
        assert_eq!(id, card_id("Chess Club"));
        assert!(id.starts_with("activity-chess-club-"));
        assert!(is_safe(&id));
        assert!(is_safe(&edit_form_id(r#"<a href="x">'quoted' & #hash</a>"#)));
    }

    #[test]
    fn similar_names_do_not_collide() {
        assert_ne!(card_id("Art Club"), card_id("Art-Club"));
        assert_ne!(card_id("Art Club"), card_id("art club"));
    }

    #[test]
    fn non_ascii_name_still_gets_an_id() {
        let id = card_id("日本語");
        assert!(id.starts_with("activity-"));
        assert_eq!(id.len(), "activity-".len() + 8);
    }

    #[test]
    fn hash_suffix_is_sha256_prefix() {
        // sha256("abc") = ba7816bf...
        assert_eq!(short_hash("abc"), "ba7816bf");
        assert_eq!(card_id("abc"), "activity-abc-ba7816bf");
    }
}
