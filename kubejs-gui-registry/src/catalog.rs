use std::collections::BTreeMap;

use itertools::Itertools;
use kubejs_gui_core::{Identifier, VANILLA_NAMESPACE};

/// Vanilla recipe types offered even when nothing else is known.
pub const VANILLA_RECIPE_TYPES: &[&str] = &[
    "minecraft:crafting_shaped",
    "minecraft:crafting_shapeless",
    "minecraft:smelting",
    "minecraft:blasting",
    "minecraft:smoking",
    "minecraft:campfire_cooking",
    "minecraft:stonecutting",
    "minecraft:smithing_transform",
    "minecraft:smithing_trim",
];

/// Known recipe types grouped by namespace, both levels sorted.
#[derive(Debug, Clone, Default)]
pub struct RecipeTypeCatalog {
    namespaces: BTreeMap<String, Vec<Identifier>>,
}

impl RecipeTypeCatalog {
    /// Builds a catalog from raw recipe type ids. The shaped and shapeless
    /// crafting types are always present, a bare `crafting` type is dropped
    /// in favour of them. Ids that don't parse are skipped.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = ids
            .into_iter()
            .filter_map(|raw| match raw.as_ref().parse::<Identifier>() {
                Ok(id) => Some(id),
                Err(err) => {
                    log::warn!("Skipping recipe type '{}': {err}", raw.as_ref());
                    None
                }
            })
            .chain([
                Identifier::vanilla("crafting_shaped"),
                Identifier::vanilla("crafting_shapeless"),
            ])
            .filter(|id| id.path != "crafting");

        let mut namespaces: BTreeMap<String, Vec<Identifier>> = BTreeMap::new();
        for id in parsed {
            namespaces.entry(id.namespace.clone()).or_default().push(id);
        }
        for types in namespaces.values_mut() {
            *types = std::mem::take(types)
                .into_iter()
                .sorted_by(|a, b| a.path.cmp(&b.path))
                .dedup()
                .collect();
        }
        log::debug!("Recipe type catalog has {} namespaces", namespaces.len());
        Self { namespaces }
    }

    /// The vanilla types plus the given extra ids.
    pub fn with_vanilla<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra: Vec<String> = extra
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect();
        Self::from_ids(
            VANILLA_RECIPE_TYPES
                .iter()
                .map(|id| id.to_string())
                .chain(extra),
        )
    }

    pub fn namespaces(&self) -> Vec<&str> {
        self.namespaces.keys().map(String::as_str).collect()
    }

    /// Types of one namespace sorted by path, empty for unknown namespaces.
    pub fn types_for(&self, namespace: &str) -> &[Identifier] {
        self.namespaces
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The namespace to start in: vanilla when present, otherwise the first.
    pub fn default_namespace(&self) -> Option<&str> {
        if self.namespaces.contains_key(VANILLA_NAMESPACE) {
            Some(VANILLA_NAMESPACE)
        } else {
            self.namespaces.keys().next().map(String::as_str)
        }
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.types_for(&id.namespace).contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.namespaces.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.namespaces.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}
