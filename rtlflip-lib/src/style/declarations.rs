use crate::style::value::Value;

/// Tri-state flip setting, used the same way on a rule, on a sheet and as
/// the plugin default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    Unset,
    On,
    Off,
}

impl Flip {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Flip::Unset => None,
            Flip::On => Some(true),
            Flip::Off => Some(false),
        }
    }

    pub fn is_set(self) -> bool {
        self != Flip::Unset
    }
}

impl From<bool> for Flip {
    fn from(flip: bool) -> Self {
        if flip {
            Flip::On
        } else {
            Flip::Off
        }
    }
}

impl From<Option<bool>> for Flip {
    fn from(flip: Option<bool>) -> Self {
        flip.map_or(Flip::Unset, Flip::from)
    }
}

/// The declarations of one rule, in source order.
///
/// The `flip` marker lives in its own slot rather than among the properties,
/// so it can never be printed as CSS by accident.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Declarations {
    flip: Flip,
    entries: Vec<(String, Value)>,
}

impl Declarations {
    pub fn new() -> Self {
        Declarations::default()
    }

    pub fn with_flip(mut self, flip: impl Into<Flip>) -> Self {
        self.flip = flip.into();
        self
    }

    pub fn flip(&self) -> Flip {
        self.flip
    }

    pub fn set_flip(&mut self, flip: impl Into<Flip>) {
        self.flip = flip.into();
    }

    /// Reads the flip marker and clears it.
    pub fn take_flip(&mut self) -> Flip {
        std::mem::take(&mut self.flip)
    }

    /// Sets a property. An existing property keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Applies `f` to every value, keeping names, order and the flip marker.
    pub fn map_values(self, mut f: impl FnMut(Value) -> Value) -> Self {
        Declarations {
            flip: self.flip,
            entries: self
                .entries
                .into_iter()
                .map(|(n, v)| (n, f(v)))
                .collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Declarations
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut declarations = Declarations::new();
        for (name, value) in iter {
            declarations.set(name, value);
        }
        declarations
    }
}

impl IntoIterator for Declarations {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
