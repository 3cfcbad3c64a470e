/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Bidirectional catalog index/name mapping: case-insensitive lookup,
//! a localized-name overlay, and prefix completion.
//!
//! Independent of [`crate::stellar`]; a star catalog keys its entries by
//! the catalog index this type maps to and from display names.

use indexmap::IndexMap;
use std::collections::HashMap;

/// Common three-letter IAU Bayer-designation abbreviations and their full
/// Greek letter names, in alphabet order.
const GREEK_LETTERS: &[(&str, &str)] = &[
    ("alp", "alpha"),
    ("bet", "beta"),
    ("gam", "gamma"),
    ("del", "delta"),
    ("eps", "epsilon"),
    ("zet", "zeta"),
    ("eta", "eta"),
    ("the", "theta"),
    ("iot", "iota"),
    ("kap", "kappa"),
    ("lam", "lambda"),
    ("mu", "mu"),
    ("nu", "nu"),
    ("xi", "xi"),
    ("omi", "omicron"),
    ("pi", "pi"),
    ("rho", "rho"),
    ("sig", "sigma"),
    ("tau", "tau"),
    ("ups", "upsilon"),
    ("phi", "phi"),
    ("chi", "chi"),
    ("psi", "psi"),
    ("ome", "omega"),
];

/// Expands a leading Bayer-designation abbreviation (e.g. `"Alp And"`) to
/// its full Greek letter form (`"Alpha And"`). Returns `None` if `name`
/// does not begin with a recognized abbreviation followed by a separator.
fn expand_greek(name: &str) -> Option<String> {
    let (head, rest) = name.split_once(' ')?;
    let head_lower = head.to_ascii_lowercase();
    let (_, full) = GREEK_LETTERS.iter().find(|(abbr, _)| *abbr == head_lower)?;
    let mut expanded = String::with_capacity(full.len() + 1 + rest.len());
    let mut chars = full.chars();
    if let Some(c) = chars.next() {
        expanded.extend(c.to_uppercase());
    }
    expanded.push_str(chars.as_str());
    expanded.push(' ');
    expanded.push_str(rest);
    Some(expanded)
}

/// Bidirectional mapping between catalog index numbers and display names.
///
/// `by_index` preserves insertion order both across indices and across the
/// names registered per index, so [`NameIndex::iterate_names_for_index`]
/// and [`NameIndex::get_completion`] yield names in the order they were
/// added rather than in hash order. Name lookups are case-insensitive;
/// `localized` is a second, independently populated overlay consulted
/// ahead of the primary map when a lookup asks for it.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    by_index: IndexMap<u32, Vec<String>>,
    by_name: HashMap<String, u32>,
    localized: HashMap<String, u32>,
}

impl NameIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` for `index`. When `parse_greek` is set and `name`
    /// opens with a recognized Bayer abbreviation (`"Alp And"`), the
    /// expanded Greek form (`"Alpha And"`) is registered as an additional
    /// alias for the same index, so either form resolves via
    /// [`NameIndex::lookup_by_name`].
    pub fn add(&mut self, index: u32, name: &str, parse_greek: bool) {
        self.by_index
            .entry(index)
            .or_default()
            .push(name.to_string());
        self.by_name.insert(name.to_ascii_lowercase(), index);

        if parse_greek {
            if let Some(expanded) = expand_greek(name) {
                self.by_index.entry(index).or_default().push(expanded.clone());
                self.by_name.insert(expanded.to_ascii_lowercase(), index);
            }
        }
    }

    /// Registers `name` as a localized alias for `index`, consulted ahead
    /// of the primary map by [`NameIndex::lookup_by_name`] when its `i18n`
    /// flag is set. Does not affect [`NameIndex::lookup_by_index`] or
    /// [`NameIndex::iterate_names_for_index`], which only see primary
    /// names.
    pub fn add_localized(&mut self, index: u32, name: &str) {
        self.localized.insert(name.to_ascii_lowercase(), index);
    }

    /// Removes `index` and every name registered for it, from both the
    /// primary and localized maps.
    pub fn erase(&mut self, index: u32) {
        if let Some(names) = self.by_index.shift_remove(&index) {
            for name in names {
                let key = name.to_ascii_lowercase();
                self.by_name.remove(&key);
                self.localized.remove(&key);
            }
        }
        self.localized.retain(|_, v| *v != index);
    }

    /// Looks up `name` case-insensitively. When `i18n` is set, the
    /// localized overlay is consulted first, falling back to the primary
    /// map on a miss.
    pub fn lookup_by_name(&self, name: &str, i18n: bool) -> Option<u32> {
        let key = name.to_ascii_lowercase();
        if i18n {
            if let Some(&index) = self.localized.get(&key) {
                return Some(index);
            }
        }
        self.by_name.get(&key).copied()
    }

    /// Returns the first (primary) name registered for `index`, or `""`
    /// if the index has none.
    pub fn lookup_by_index(&self, index: u32) -> &str {
        self.by_index
            .get(&index)
            .and_then(|names| names.first())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Iterates every name registered for `index`, in registration order.
    pub fn iterate_names_for_index(&self, index: u32) -> impl Iterator<Item = &str> {
        self.by_index
            .get(&index)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    /// Returns every registered name whose lowercased form starts with
    /// `prefix` (also lowercased), in index-then-registration order. When
    /// `i18n` is set, localized names are also searched and interleaved
    /// ahead of the index that owns them. When `greek_expansion` is set, a
    /// prefix that matches a Greek letter name (`"Alpha"`) also matches
    /// names stored under the abbreviated form (`"Alp And"`), and vice
    /// versa.
    pub fn get_completion(&self, prefix: &str, i18n: bool, greek_expansion: bool) -> Vec<String> {
        let prefix_lower = prefix.to_ascii_lowercase();
        let mut out = Vec::new();

        for names in self.by_index.values() {
            for name in names {
                if name.to_ascii_lowercase().starts_with(&prefix_lower) {
                    out.push(name.clone());
                    continue;
                }
                if greek_expansion {
                    if let Some(expanded) = expand_greek(name) {
                        if expanded.to_ascii_lowercase().starts_with(&prefix_lower) {
                            out.push(name.clone());
                        }
                    }
                }
            }
        }

        if i18n {
            for name in self.localized.keys() {
                if name.starts_with(&prefix_lower) {
                    out.push(name.clone());
                }
            }
        }

        out
    }

    /// Number of distinct indices registered.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    /// Whether no indices are registered.
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_lookup_roundtrips_case_insensitively() {
        let mut idx = NameIndex::new();
        idx.add(677, "Sirius", false);
        assert_eq!(idx.lookup_by_name("SIRIUS", false), Some(677));
        assert_eq!(idx.lookup_by_name("sirius", false), Some(677));
        assert_eq!(idx.lookup_by_index(677), "Sirius");
    }

    #[test]
    fn erase_removes_all_names_for_index() {
        let mut idx = NameIndex::new();
        idx.add(1, "Polaris", false);
        idx.add(1, "North Star", false);
        idx.erase(1);
        assert_eq!(idx.lookup_by_name("polaris", false), None);
        assert_eq!(idx.lookup_by_index(1), "");
        assert!(idx.is_empty());
    }

    #[test]
    fn iterate_names_for_index_preserves_insertion_order() {
        let mut idx = NameIndex::new();
        idx.add(10, "Rigel", false);
        idx.add(10, "Beta Orionis", false);
        let names: Vec<&str> = idx.iterate_names_for_index(10).collect();
        assert_eq!(names, vec!["Rigel", "Beta Orionis"]);
    }

    #[test]
    fn parse_greek_registers_expanded_alias() {
        let mut idx = NameIndex::new();
        idx.add(42, "Alp And", true);
        assert_eq!(idx.lookup_by_name("alpha and", false), Some(42));
        assert_eq!(idx.lookup_by_name("alp and", false), Some(42));
    }

    #[test]
    fn localized_overlay_is_consulted_first_when_requested() {
        let mut idx = NameIndex::new();
        idx.add(5, "Altair", false);
        idx.add_localized(5, "Al Nasr al Ta'ir");
        assert_eq!(idx.lookup_by_name("al nasr al ta'ir", true), Some(5));
        assert_eq!(idx.lookup_by_name("al nasr al ta'ir", false), None);
        assert_eq!(idx.lookup_by_name("altair", true), Some(5));
    }

    #[test]
    fn get_completion_matches_prefix_in_registration_order() {
        let mut idx = NameIndex::new();
        idx.add(1, "Vega", false);
        idx.add(2, "Vesta", false);
        idx.add(3, "Deneb", false);
        let matches = idx.get_completion("ve", false, false);
        assert_eq!(matches, vec!["Vega", "Vesta"]);
    }

    #[test]
    fn get_completion_with_greek_expansion_matches_either_form() {
        let mut idx = NameIndex::new();
        idx.add(99, "Bet Cas", true);
        let matches = idx.get_completion("beta", false, true);
        assert_eq!(matches, vec!["Bet Cas"]);
    }
}
