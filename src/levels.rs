//! Zone table
//!
//! Levels are a closed, ordered list supplied at startup. Indexing past the
//! end is a programming error and panics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a level table
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level table is empty")]
    Empty,
    #[error("level {level} ({name}) has an invalid {field} colour {value:?}")]
    BadColor {
        level: usize,
        name: String,
        field: &'static str,
        value: String,
    },
}

/// A themed zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Background colour (`#rrggbb`)
    pub color: String,
    pub enemy_color: String,
    pub boss_color: String,
}

impl Level {
    fn new(name: &str, color: &str, enemy_color: &str, boss_color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            enemy_color: enemy_color.to_string(),
            boss_color: boss_color.to_string(),
        }
    }
}

/// Ordered, validated, non-empty list of levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: vec![
                Level::new("Enchanted Forest", "#00ff88", "#008855", "#22ff88"),
                Level::new("Dark Grove", "#44ff44", "#228822", "#55ff55"),
                Level::new("Ruined Village", "#999999", "#555555", "#bbbbbb"),
                Level::new("Castle Walls", "#4444ff", "#2222aa", "#7777ff"),
                Level::new("Castle Halls", "#8844ff", "#5522aa", "#aa77ff"),
                Level::new("Catacombs", "#ff4444", "#aa2222", "#ff7777"),
                Level::new("Crystal Cave", "#44ffff", "#22aaaa", "#77ffff"),
                Level::new("Infernal Volcano", "#ff5500", "#cc2200", "#ff8800"),
                Level::new("Arcane Tower", "#ff00ff", "#aa00aa", "#ff55ff"),
                Level::new("Demonic Throne", "#ff0000", "#aa0000", "#ff3333"),
            ],
        }
    }
}

impl LevelTable {
    /// Build a table from levels, validating every entry
    pub fn new(levels: Vec<Level>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::Empty);
        }
        for (i, level) in levels.iter().enumerate() {
            for (field, value) in [
                ("background", &level.color),
                ("enemy", &level.enemy_color),
                ("boss", &level.boss_color),
            ] {
                if !is_hex_color(value) {
                    return Err(ConfigError::BadColor {
                        level: i,
                        name: level.name.clone(),
                        field,
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Level at `index`. Panics when out of range.
    pub fn get(&self, index: usize) -> &Level {
        assert!(
            index < self.levels.len(),
            "level index {index} out of range (table has {})",
            self.levels.len()
        );
        &self.levels[index]
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Whether `index` is the final zone
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.levels.len()
    }
}

/// `#rrggbb`
fn is_hex_color(s: &str) -> bool {
    s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = LevelTable::default();
        assert_eq!(table.len(), 10);
        assert_eq!(table.get(0).name, "Enchanted Forest");
        assert!(table.is_last(9));
        assert!(!table.is_last(8));
    }

    #[test]
    fn test_from_json() {
        let json = r##"[{"name":"Pit","color":"#101010","enemy_color":"#202020","boss_color":"#303030"}]"##;
        let table = LevelTable::from_json(json).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0).boss_color, "#303030");
        assert!(table.is_last(0));
    }

    #[test]
    fn test_rejects_empty_and_bad_colors() {
        assert!(matches!(LevelTable::from_json("[]"), Err(ConfigError::Empty)));
        assert!(matches!(LevelTable::from_json("{"), Err(ConfigError::Json(_))));

        let json = r##"[{"name":"Pit","color":"red","enemy_color":"#202020","boss_color":"#303030"}]"##;
        match LevelTable::from_json(json) {
            Err(ConfigError::BadColor { level, field, .. }) => {
                assert_eq!(level, 0);
                assert_eq!(field, "background");
            }
            other => panic!("expected BadColor, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        LevelTable::default().get(10);
    }
}
