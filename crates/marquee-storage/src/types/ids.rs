//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use uuid::Uuid;

/// User identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

/// Group identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub Uuid);

/// Suggestion identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SuggestionId(pub Uuid);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_debug_contains_uuid() {
        let uuid = Uuid::new_v4();
        let user_id = UserId(uuid);
        assert!(format!("{:?}", user_id).contains(&uuid.to_string()));
    }

    #[test]
    fn ids_of_same_uuid_are_equal() {
        let uuid = Uuid::new_v4();
        assert_eq!(GroupId(uuid), GroupId(uuid));
        assert_ne!(SuggestionId(Uuid::new_v4()), SuggestionId(Uuid::new_v4()));
    }
}
