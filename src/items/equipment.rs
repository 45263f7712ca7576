use super::types::{EquipmentSlot, Item};
use crate::core::config::GameConfig;
use crate::core::game_state::GameState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Items currently worn, one per slot.
///
/// Serialized with the slot display names as keys. Every slot is
/// `#[serde(default)]` so snapshots missing a slot load with it empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipped {
    #[serde(rename = "武器")]
    pub weapon: Option<Item>,
    #[serde(rename = "头盔")]
    pub helmet: Option<Item>,
    #[serde(rename = "护甲")]
    pub armor: Option<Item>,
    #[serde(rename = "护腿")]
    pub leggings: Option<Item>,
    #[serde(rename = "靴子")]
    pub boots: Option<Item>,
    #[serde(rename = "饰品")]
    pub accessory: Option<Item>,
}

impl Equipped {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Leggings => &self.leggings,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Accessory => &self.accessory,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Leggings => &mut self.leggings,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Accessory => &mut self.accessory,
        }
    }

    /// Puts `item` into its slot, returning whatever was there before.
    pub fn replace(&mut self, item: Item) -> Option<Item> {
        self.slot_mut(item.slot).replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.weapon,
            &self.helmet,
            &self.armor,
            &self.leggings,
            &self.boots,
            &self.accessory,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }
}

/// Moves an inventory item into its slot. Whatever was worn takes the
/// item's old inventory position. No-op for unknown ids.
pub fn equip_item(state: &mut GameState, item_id: Uuid) -> bool {
    let Some(pos) = state.inventory.iter().position(|item| item.id == item_id) else {
        return false;
    };
    let item = state.inventory.remove(pos);
    let name = item.name.clone();
    if let Some(previous) = state.equipped.replace(item) {
        state.inventory.insert(pos, previous);
    }
    state.add_log(format!("Equipped {}", name));
    state.normalize_hp();
    true
}

/// Moves the item in `slot` back to the end of the inventory. Logs and
/// leaves it equipped when the inventory is full.
pub fn unequip_item(state: &mut GameState, slot: EquipmentSlot, config: &GameConfig) -> bool {
    if state.equipped.get(slot).is_none() {
        return false;
    }
    if state.inventory.len() >= config.inventory_capacity {
        state.add_log(format!("Inventory full, cannot unequip {}", slot.name()));
        return false;
    }
    let Some(item) = state.equipped.take(slot) else {
        return false;
    };
    state.add_log(format!("Unequipped {}", item.name));
    state.inventory.push(item);
    state.normalize_hp();
    true
}
