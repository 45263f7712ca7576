//! Every state transition the store accepts, plus a small text parser for
//! the headless session runner.

use super::game_state::GameState;
use crate::items::drops::AutoDecompose;
use crate::items::types::{EquipmentSlot, Quality};
use uuid::Uuid;

/// A user action or timer tick, applied through `GameStore::dispatch`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SpawnWave,
    Attack,
    CastSkill(String),
    EquipItem(Uuid),
    UnequipItem(EquipmentSlot),
    EquipSkill(String),
    UnequipSkill(String),
    SelectStage(u32),
    NextStage,
    StartAutoBattle,
    StopAutoBattle,
    StartRest,
    Revive,
    SetAutoDecompose(AutoDecompose),
    DecomposeItem(Uuid),
    DecomposeBatch { max_quality: Quality, max_level: u32 },
    StrengthenSlot(EquipmentSlot),
    CheckIn,
    ClaimOfflineRewards,
    SetAutoAdvance(bool),
    ActivateCheat,
    ResetAll,

    // Timer ticks
    AutoBattleTick,
    RestTick,
    OnlineTick,
}

impl Command {
    /// Timer ticks are driven by the session clock, never typed by the user.
    pub fn is_tick(&self) -> bool {
        matches!(
            self,
            Command::AutoBattleTick | Command::RestTick | Command::OnlineTick
        )
    }
}

/// Accepts the Chinese slot name or its English equivalent.
pub fn parse_slot(token: &str) -> Option<EquipmentSlot> {
    EquipmentSlot::from_name(token).or_else(|| match token.to_ascii_lowercase().as_str() {
        "weapon" => Some(EquipmentSlot::Weapon),
        "helmet" => Some(EquipmentSlot::Helmet),
        "armor" => Some(EquipmentSlot::Armor),
        "leggings" => Some(EquipmentSlot::Leggings),
        "boots" => Some(EquipmentSlot::Boots),
        "accessory" => Some(EquipmentSlot::Accessory),
        _ => None,
    })
}

fn parse_toggle(token: Option<&str>) -> Option<bool> {
    match token? {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Inventory items are addressed by their 1-based position.
fn inventory_id(state: &GameState, token: Option<&str>) -> Option<Uuid> {
    let index: usize = token?.parse().ok()?;
    state.inventory.get(index.checked_sub(1)?).map(|item| item.id)
}

fn parse_quality(token: Option<&str>) -> Option<Quality> {
    let index: usize = token?.parse().ok()?;
    (index < Quality::ALL.len()).then(|| Quality::from_index(index))
}

/// Parses one line of user input. Unknown or malformed input yields `None`.
pub fn parse_command(line: &str, state: &GameState) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?.to_ascii_lowercase();
    let arg = parts.next();

    let command = match verb.as_str() {
        "spawn" => Command::SpawnWave,
        "attack" | "a" => Command::Attack,
        "cast" => Command::CastSkill(arg?.to_string()),
        "equip" => Command::EquipItem(inventory_id(state, arg)?),
        "unequip" => Command::UnequipItem(parse_slot(arg?)?),
        "learn" => Command::EquipSkill(arg?.to_string()),
        "forget" => Command::UnequipSkill(arg?.to_string()),
        "stage" => Command::SelectStage(arg?.parse().ok()?),
        "next" => Command::NextStage,
        "auto" => {
            if parse_toggle(arg)? {
                Command::StartAutoBattle
            } else {
                Command::StopAutoBattle
            }
        }
        "rest" => Command::StartRest,
        "revive" => Command::Revive,
        "autodecompose" => match arg? {
            "off" => Command::SetAutoDecompose(AutoDecompose::default()),
            quality => Command::SetAutoDecompose(AutoDecompose {
                enabled: true,
                max_quality: parse_quality(Some(quality))?,
                max_level: match parts.next() {
                    Some(level) => level.parse().ok()?,
                    None => u32::MAX,
                },
            }),
        },
        "decompose" => Command::DecomposeItem(inventory_id(state, arg)?),
        "salvage" => Command::DecomposeBatch {
            max_quality: parse_quality(arg)?,
            max_level: match parts.next() {
                Some(level) => level.parse().ok()?,
                None => u32::MAX,
            },
        },
        "strengthen" => Command::StrengthenSlot(parse_slot(arg?)?),
        "checkin" => Command::CheckIn,
        "claim" => Command::ClaimOfflineRewards,
        "advance" => Command::SetAutoAdvance(parse_toggle(arg)?),
        "kkk" => Command::ActivateCheat,
        "reset" => Command::ResetAll,
        _ => return None,
    };
    Some(command)
}
