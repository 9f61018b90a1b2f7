//! Logical input keys
//!
//! The shell maps physical `KeyboardEvent.key` values to logical keys and
//! keeps a held-key snapshot the simulation reads once per tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Logical keys understood by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Attack,
    /// Ranged shot (mouse button or bound key)
    Fire,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Jump,
        Key::Attack,
        Key::Fire,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySet(u8);

impl KeySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    /// Apply a key transition (last write wins)
    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), KeySet::with)
    }
}

/// Physical key name -> logical key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    bindings: BTreeMap<String, Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = BTreeMap::new();
        for (name, key) in [
            ("arrowleft", Key::Left),
            ("a", Key::Left),
            ("arrowright", Key::Right),
            ("d", Key::Right),
            ("arrowup", Key::Up),
            ("w", Key::Up),
            ("arrowdown", Key::Down),
            ("s", Key::Down),
            (" ", Key::Jump),
            ("f", Key::Attack),
            ("j", Key::Attack),
            ("k", Key::Fire),
        ] {
            bindings.insert(name.to_string(), key);
        }
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up a `KeyboardEvent.key` value (case-insensitive)
    pub fn lookup(&self, physical: &str) -> Option<Key> {
        self.bindings.get(&physical.to_lowercase()).copied()
    }

    /// Bind (or rebind) a physical key
    pub fn bind(&mut self, physical: &str, key: Key) {
        self.bindings.insert(physical.to_lowercase(), key);
    }

    /// Remove a binding, returning the logical key it had
    pub fn unbind(&mut self, physical: &str) -> Option<Key> {
        self.bindings.remove(&physical.to_lowercase())
    }

    /// Physical keys bound to `key`
    pub fn keys_for(&self, key: Key) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(move |(_, k)| **k == key)
            .map(|(name, _)| name.as_str())
    }
}
