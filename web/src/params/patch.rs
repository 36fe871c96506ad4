use serde::{Deserialize, Deserializer};

/// Three-way patch field: distinguishes an omitted JSON field from an
/// explicit `null` from a concrete value.
///
/// Clearing stored region annotations requires sending `null` explicitly;
/// omitting the field leaves the stored value untouched. A bare
/// `Option<Option<T>>` loses that distinction too easily, so the three states
/// are spelled out.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    /// Field absent from the request body: leave the stored value alone
    #[default]
    Unset,
    /// Field present as explicit null: clear the stored value
    Clear,
    /// Field present with a value: replace the stored value
    Set(T),
}

// serde only invokes this when the field is present in the body; a missing
// field goes through Default instead. Pair every `Patch` field with
// `#[serde(default)]`.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        regions: Patch<serde_json::Value>,
    }

    #[test]
    fn an_omitted_field_deserializes_as_unset() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.regions, Patch::Unset);
    }

    #[test]
    fn an_explicit_null_deserializes_as_clear() {
        let body: Body = serde_json::from_str(r#"{"regions": null}"#).unwrap();
        assert_eq!(body.regions, Patch::Clear);
    }

    #[test]
    fn a_value_deserializes_as_set() {
        let body: Body = serde_json::from_str(r#"{"regions": [{"start": 0, "end": 1}]}"#).unwrap();
        assert_eq!(
            body.regions,
            Patch::Set(serde_json::json!([{"start": 0, "end": 1}]))
        );
    }
}
