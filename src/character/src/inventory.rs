//src/character/src/inventory.rs
use items::{Item, ItemKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Character, CharacterError};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("item index out of range")]
    InvalidIndex,
    #[error("no potion in inventory")]
    NoPotion,
    #[error("item cannot be used directly")]
    NotUsable,
    #[error(transparent)]
    Character(#[from] CharacterError),
}

/// 背包：无序的物品多重集（金币永不入包，直接入账）
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove(&mut self, index: usize) -> Result<Item, InventoryError> {
        if index >= self.items.len() {
            return Err(InventoryError::InvalidIndex);
        }
        Ok(self.items.remove(index))
    }

    /// 背包中第一瓶药水的位置
    pub fn first_potion_index(&self) -> Option<usize> {
        self.items.iter().position(|i| i.is_potion())
    }

    /// 消耗背包中的第一瓶药水并应用效果，返回用掉的药水
    pub fn use_first_potion(&mut self, character: &mut Character) -> Result<Item, InventoryError> {
        let index = self.first_potion_index().ok_or(InventoryError::NoPotion)?;
        self.use_potion_at(index, character)
    }

    /// 喝掉指定位置的药水（背包界面按序号选用）
    pub fn use_potion_at(
        &mut self,
        index: usize,
        character: &mut Character,
    ) -> Result<Item, InventoryError> {
        match self.items.get(index) {
            Some(item) if item.is_potion() => {}
            Some(_) => return Err(InventoryError::NotUsable),
            None => return Err(InventoryError::InvalidIndex),
        }

        let item = self.items.remove(index);
        match &item.kind {
            ItemKind::Potion(potion) => {
                character.apply_potion(potion);
                Ok(item)
            }
            // unreachable given the guard above, kept for exhaustiveness
            _ => Err(InventoryError::NotUsable),
        }
    }

    /// 装备指定物品；被替换下来的装备放回背包
    pub fn equip(&mut self, index: usize, character: &mut Character) -> Result<(), InventoryError> {
        let equippable = match self.items.get(index) {
            Some(item) => matches!(item.kind, ItemKind::Weapon(_) | ItemKind::ArmorPiece(_)),
            None => return Err(InventoryError::InvalidIndex),
        };
        if !equippable {
            return Err(CharacterError::NotEquippable.into());
        }

        let item = self.items.remove(index);
        if let Some(displaced) = character.equip_item(item)? {
            self.items.push(displaced);
        }
        Ok(())
    }

    /// 卖出：移除物品并给角色加上半价金币
    pub fn sell(&mut self, index: usize, character: &mut Character) -> Result<i32, InventoryError> {
        let item = self.remove(index)?;
        let amount = item.sell_price();
        character.add_gold(amount as i64);
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Class;
    use items::{Rarity, StatusEffect};

    #[test]
    fn use_first_potion_consumes_it() {
        let mut inv = Inventory::new();
        let mut c = Character::new("Tess", Class::Knight);
        c.current_hp = 50;

        inv.add(Item::weapon("Old Axe", 2, Rarity::Common));
        inv.add(Item::healing_potion("Small Health Potion", 20));
        inv.add(Item::healing_potion("Large Health Potion", 80));

        let used = inv.use_first_potion(&mut c).unwrap();
        assert_eq!(used.name, "Small Health Potion");
        assert_eq!(c.current_hp, 70);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn use_potion_fails_gracefully_when_none() {
        let mut inv = Inventory::new();
        let mut c = Character::new("Tess", Class::Knight);
        inv.add(Item::weapon("Old Axe", 2, Rarity::Common));

        assert!(matches!(
            inv.use_first_potion(&mut c),
            Err(InventoryError::NoPotion)
        ));
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn equip_puts_displaced_item_back() {
        let mut inv = Inventory::new();
        let mut c = Character::new("Tess", Class::Knight);

        inv.add(Item::weapon("Rusty Shortsword", 2, Rarity::Common));
        inv.equip(0, &mut c).unwrap();
        assert!(inv.is_empty());

        inv.add(Item::weapon("Rune Blade", 8, Rarity::Rare));
        inv.equip(0, &mut c).unwrap();

        // the shortsword returned to the pool
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.items()[0].name, "Rusty Shortsword");
    }

    #[test]
    fn equipping_a_potion_is_an_error() {
        let mut inv = Inventory::new();
        let mut c = Character::new("Tess", Class::Knight);
        inv.add(Item::effect_potion("Smoke Bomb", StatusEffect::Escape));

        assert!(inv.equip(0, &mut c).is_err());
    }

    #[test]
    fn selling_credits_half_price() {
        let mut inv = Inventory::new();
        let mut c = Character::new("Tess", Class::Knight);
        inv.add(Item::weapon("Iron Longsword", 4, Rarity::Uncommon));

        let credited = inv.sell(0, &mut c).unwrap();
        assert_eq!(credited, 50);
        assert_eq!(c.gold, 50);
        assert!(inv.is_empty());
    }
}
