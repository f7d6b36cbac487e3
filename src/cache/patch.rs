//! Merge-patch hydration primitives.
//!
//! Wire payloads describe entities with optional fields, and "field not
//! sent" means something different from "field sent as null" or "field
//! sent with an empty value". [`Patch`] keeps those three cases apart so
//! that re-hydrating an entity only ever touches fields the payload
//! explicitly defines.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::Registry;

/// A single field of a payload: absent, explicitly null, or a value.
///
/// Deserializes so that a missing key stays [`Patch::Absent`] (via
/// `#[serde(default)]` on the payload struct), an explicit `null`
/// becomes [`Patch::Null`], and anything else [`Patch::Value`]. A
/// defined-but-empty value ("", 0, false) is still `Value` and must
/// overwrite on merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// The defined value, if any. Null counts as "no value".
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Clone> Patch<T> {
    /// Merge this patch into an optional entity field.
    ///
    /// Absent leaves the field untouched, Null unsets it, and a value
    /// overwrites it - even when the value is empty or falsy.
    pub fn apply(&self, slot: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *slot = None,
            Patch::Value(v) => *slot = Some(v.clone()),
        }
    }

    /// Merge into a field the entity always carries (e.g. its id).
    /// Only a defined value overwrites; Absent and Null keep the current one.
    pub fn apply_required(&self, slot: &mut T) {
        if let Patch::Value(v) = self {
            *slot = v.clone();
        }
    }

    /// The defined value, or the type's default for always-carried fields
    /// the payload happened to omit.
    pub fn cloned_or_default(&self) -> T
    where
        T: Default,
    {
        match self {
            Patch::Value(v) => v.clone(),
            _ => T::default(),
        }
    }
}

/// Construction and re-hydration strategy for one entity kind.
///
/// This is the seam the generic manager is parameterized over: how to
/// build an entity from its first payload (with access to the
/// cross-reference [`Registry`] so aggregates can wire up their nested
/// managers), and how to merge-patch a later payload into it.
pub trait Hydrate: Clone + Send + Sync + 'static {
    type Payload: DeserializeOwned + Send + Sync + 'static;

    /// Full construction from the first payload seen for an id.
    fn from_payload(registry: &Registry, payload: &Self::Payload) -> Self;

    /// Merge-patch a later payload into this entity. Fields the payload
    /// does not define keep their current value.
    fn apply(&mut self, payload: &Self::Payload);
}

/// An entity that belongs to an owning aggregate (e.g. an emoji or a
/// channel belonging to a guild). Scoped views use this to decide which
/// subset of a shared store is theirs.
pub trait Scoped {
    fn owner_id(&self) -> Option<&str>;
    fn set_owner_id(&mut self, owner: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Probe {
        name: Patch<String>,
        count: Patch<i64>,
    }

    #[test]
    fn test_missing_null_and_value_are_distinct() {
        let probe: Probe = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(probe.name, Patch::Absent);

        let probe: Probe = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(probe.name, Patch::Null);

        let probe: Probe = serde_json::from_str(r#"{"name": "pepe"}"#).unwrap();
        assert_eq!(probe.name, Patch::Value("pepe".to_string()));
    }

    #[test]
    fn test_falsy_values_are_defined() {
        let probe: Probe = serde_json::from_str(r#"{"name": "", "count": 0}"#).unwrap();
        assert_eq!(probe.name, Patch::Value(String::new()));
        assert_eq!(probe.count, Patch::Value(0));
    }

    #[test]
    fn test_apply_semantics() {
        let mut slot = Some("old".to_string());

        Patch::<String>::Absent.apply(&mut slot);
        assert_eq!(slot.as_deref(), Some("old"));

        Patch::Value(String::new()).apply(&mut slot);
        assert_eq!(slot.as_deref(), Some(""));

        Patch::<String>::Null.apply(&mut slot);
        assert_eq!(slot, None);
    }

    #[test]
    fn test_apply_required_keeps_current_unless_defined() {
        let mut id = "42".to_string();
        Patch::<String>::Absent.apply_required(&mut id);
        assert_eq!(id, "42");
        Patch::<String>::Null.apply_required(&mut id);
        assert_eq!(id, "42");
        Patch::Value("43".to_string()).apply_required(&mut id);
        assert_eq!(id, "43");
    }

    #[test]
    fn test_cloned_or_default() {
        assert_eq!(Patch::Value(7i64).cloned_or_default(), 7);
        assert_eq!(Patch::<i64>::Absent.cloned_or_default(), 0);
        assert_eq!(Patch::<String>::Null.cloned_or_default(), String::new());
    }
}
