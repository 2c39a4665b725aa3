// Data-driven tree parameters.
//
// All tunable numbers for a tree species live in `TreeParams`, a plain
// serde record that can be loaded from JSON and edited without touching
// code. Every weighted parameter is a "1-in-N" chance: the event fires
// when a single bounded draw lands on 0 (`GameRng::chance`); 0 disables
// the event entirely.
//
// Settings derived from these params are rebuilt on every
// generation/validation call (`TreeDefinition::settings()`), so runtime
// edits take effect immediately — nothing here is cached across calls.
//
// See also: `species.rs` which pairs params with per-species predicates
// and hooks, `generator.rs` and `reconcile.rs` which consume the derived
// `TreeSettings`.

use serde::{Deserialize, Serialize};

/// Tunable parameters for one tree species.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Minimum trunk segment count, inclusive. Must be `>= 1` and
    /// `<= max_height`.
    pub min_height: u32,
    /// Maximum trunk segment count, inclusive.
    pub max_height: u32,
    /// Empty cells required above the prospective top for the tree to fit.
    pub top_padding: u32,

    /// 1-in-N chance per random tick that a sapling grows.
    pub grow_chance: u32,
    /// Selection weight among registered species during world generation.
    pub generation_weight: u32,
    /// 1-in-N chance that the species, once selected by weight, actually
    /// attempts to generate.
    pub generation_chance: u32,

    /// 1-in-N chance per interior segment of growing a branch.
    pub branch_chance: u32,
    /// 1-in-N chance that the crown generates snapped off.
    pub broken_top_chance: u32,
    /// 1-in-N chance per segment of the sparse-bark variant.
    pub less_bark_chance: u32,
    /// 1-in-N chance per segment of the dense-bark variant.
    pub more_bark_chance: u32,
    /// 1-in-N chance that a generated branch has no leaves.
    pub not_leafy_branch_chance: u32,
    /// 1-in-N chance that the root cell generates without flared roots.
    pub no_root_chance: u32,
}

impl TreeParams {
    /// The common forest tree: the defaults every species starts from.
    pub fn forest() -> Self {
        Self {
            min_height: 5,
            max_height: 12,
            top_padding: 4,
            grow_chance: 5,
            generation_weight: 10,
            generation_chance: 5,
            branch_chance: 4,
            broken_top_chance: 13,
            less_bark_chance: 7,
            more_bark_chance: 7,
            not_leafy_branch_chance: 3,
            no_root_chance: 3,
        }
    }

    /// Check the height bounds hold. Registration rejects params where
    /// this fails.
    pub fn heights_valid(&self) -> bool {
        self.min_height >= 1 && self.min_height <= self.max_height
    }
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::forest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forest_defaults_are_valid() {
        let params = TreeParams::forest();
        assert!(params.heights_valid());
        assert_eq!(params.min_height, 5);
        assert_eq!(params.max_height, 12);
        assert_eq!(params.broken_top_chance, 13);
    }

    #[test]
    fn heights_valid_rejects_bad_bounds() {
        let mut params = TreeParams::forest();
        params.min_height = 0;
        assert!(!params.heights_valid());
        params.min_height = 10;
        params.max_height = 5;
        assert!(!params.heights_valid());
    }

    #[test]
    fn json_roundtrip() {
        let params = TreeParams::forest();
        let json = serde_json::to_string(&params).unwrap();
        let restored: TreeParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, restored);
    }

    #[test]
    fn partial_json_is_an_error() {
        // Params come from data files; a missing field should fail loudly
        // rather than silently default.
        let result = serde_json::from_str::<TreeParams>(r#"{"min_height": 5}"#);
        assert!(result.is_err());
    }
}
