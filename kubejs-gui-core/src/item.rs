use serde::{Deserialize, Deserializer, Serialize};

use crate::Identifier;

/// Vanilla's stack limit, used when merging stacks in the editor menu.
pub const MAX_STACK_SIZE: u8 = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Identifier,
    #[serde(default = "default_count", deserialize_with = "deserialize_count")]
    pub count: u8,
}

const fn default_count() -> u8 {
    1
}

/// Hand-edited drafts may carry any count, a slot holds `1..=64`.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let count = u64::deserialize(deserializer)?;
    Ok(count.clamp(1, u64::from(MAX_STACK_SIZE)) as u8)
}

impl ItemStack {
    pub fn new(item: Identifier, count: u8) -> Self {
        Self { item, count }
    }

    pub fn single(item: Identifier) -> Self {
        Self::new(item, 1)
    }

    pub fn is_same_item(&self, other: &ItemStack) -> bool {
        self.item == other.item
    }

    /// How many more items fit on top of this stack.
    pub fn remaining_space(&self) -> u8 {
        MAX_STACK_SIZE.saturating_sub(self.count)
    }
}

#[cfg(test)]
mod test {
    use super::ItemStack;
    use crate::Identifier;

    #[test]
    fn count_defaults_to_one() {
        let stack: ItemStack = serde_json::from_str(r#"{"item":"minecraft:stick"}"#).unwrap();
        assert_eq!(stack, ItemStack::single(Identifier::vanilla("stick")));
    }

    #[test]
    fn stored_counts_are_clamped_to_a_stack() {
        for (json, count) in [
            (r#"{"item":"minecraft:stick","count":0}"#, 1),
            (r#"{"item":"minecraft:stick","count":200}"#, 64),
            (r#"{"item":"minecraft:stick","count":70000}"#, 64),
            (r#"{"item":"minecraft:stick","count":16}"#, 16),
        ] {
            let stack: ItemStack = serde_json::from_str(json).unwrap();
            assert_eq!(stack.count, count);
        }
        assert!(serde_json::from_str::<ItemStack>(r#"{"item":"minecraft:stick","count":-1}"#).is_err());
    }

    #[test]
    fn remaining_space_saturates() {
        let mut stack = ItemStack::new(Identifier::vanilla("dirt"), 60);
        assert_eq!(stack.remaining_space(), 4);
        stack.count = 80;
        assert_eq!(stack.remaining_space(), 0);
    }
}
