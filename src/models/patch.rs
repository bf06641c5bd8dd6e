use serde::{Deserialize, Deserializer};

/// A request field where leaving the key out and sending `null` mean
/// different things, such as one field of a partial update.
///
/// Distinguishes a key that was left out of the request body (`Absent`) from
/// one that was sent as an explicit JSON `null` (`Null`). Fields must be
/// annotated with `#[serde(default)]` so that a missing key deserializes to
/// `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

// Manual impl: the derive would require `T: Default`
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Applies the patch to an optional field: `Null` clears it.
    pub fn apply_to_option(self, target: &mut Option<T>) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = None,
            Patch::Value(v) => *target = Some(v),
        }
    }

    /// Applies the patch to a required field. `Null` is rejected with an
    /// error naming the field.
    pub fn apply_required(self, target: &mut T, field: &str) -> Result<(), String> {
        match self {
            Patch::Absent => Ok(()),
            Patch::Null => Err(format!("Field '{}' cannot be cleared", field)),
            Patch::Value(v) => {
                *target = v;
                Ok(())
            }
        }
    }
}

impl<T: Default> Patch<T> {
    /// Applies the patch to a field whose cleared state is its default value.
    pub fn apply_or_default(self, target: &mut T) {
        match self {
            Patch::Absent => {}
            Patch::Null => *target = T::default(),
            Patch::Value(v) => *target = v,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}
