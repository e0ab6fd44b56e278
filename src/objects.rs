use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_visits_every_object() {
        let mut object = ObjectKind::Arrow;
        let mut seen = Vec::new();
        for _ in 0..ObjectKind::ALL.len() {
            seen.push(object);
            object = object.next();
        }
        assert_eq!(seen, ObjectKind::ALL.to_vec());
        assert_eq!(object, ObjectKind::Arrow);
    }

    #[test]
    fn deserializes_lowercase() {
        let object: ObjectKind = serde_json::from_str("\"ball\"").unwrap();
        assert_eq!(object, ObjectKind::Ball);
        assert_eq!(object.to_string(), "Ball");
    }
}

/// The object standing on the optical axis to the left of the lens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Arrow,
    Pencil,
    Glass,
    Ball,
    Book,
}

impl ObjectKind {
    /// Objects in the order the selector cycles through them.
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::Arrow,
        ObjectKind::Pencil,
        ObjectKind::Glass,
        ObjectKind::Ball,
        ObjectKind::Book,
    ];

    /// The next object in the cycle, wrapping back to the arrow.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|o| *o == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Arrow => "Arrow",
            ObjectKind::Pencil => "Pencil",
            ObjectKind::Glass => "Glass",
            ObjectKind::Ball => "Ball",
            ObjectKind::Book => "Book",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
