use kubejs_gui_core::ItemStack;
use serde::Serialize;

use crate::layout::{LayoutConfig, SlotGrid, SLOT_SIZE};
use crate::InventoryError;

pub const MAX_INPUT_SLOTS: usize = 81;
pub const MAX_OUTPUT_SLOTS: usize = 9;
pub const PLAYER_INVENTORY_SLOTS: usize = 27;
pub const HOTBAR_SLOTS: usize = 9;

const OUTPUT_START: usize = MAX_INPUT_SLOTS;
const PLAYER_START: usize = OUTPUT_START + MAX_OUTPUT_SLOTS;
const TOTAL_SLOTS: usize = PLAYER_START + PLAYER_INVENTORY_SLOTS + HOTBAR_SLOTS;

const PLAYER_SLOTS_X: i32 = 8;

/// Which part of the menu a slot index belongs to, with the index inside
/// that part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Input(usize),
    Output(usize),
    Inventory(usize),
    Hotbar(usize),
}

impl SlotKind {
    pub fn of(menu_slot: usize) -> Option<Self> {
        match menu_slot {
            _ if menu_slot < OUTPUT_START => Some(Self::Input(menu_slot)),
            _ if menu_slot < PLAYER_START => Some(Self::Output(menu_slot - OUTPUT_START)),
            _ if menu_slot < PLAYER_START + PLAYER_INVENTORY_SLOTS => {
                Some(Self::Inventory(menu_slot - PLAYER_START))
            }
            _ if menu_slot < TOTAL_SLOTS => Some(Self::Hotbar(
                menu_slot - PLAYER_START - PLAYER_INVENTORY_SLOTS,
            )),
            _ => None,
        }
    }

    pub const fn is_recipe_slot(self) -> bool {
        matches!(self, Self::Input(_) | Self::Output(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SlotPosition {
    pub x: i32,
    pub y: i32,
}

/// The recipe editor's container: every input and output slot the largest
/// layout can show, followed by the player's inventory and hotbar.
///
/// Slots are never moved individually. Applying a layout recomputes every
/// position from scratch.
pub struct EditorMenu {
    inputs: Vec<Option<ItemStack>>,
    outputs: Vec<Option<ItemStack>>,
    // main inventory rows then the hotbar, in menu order
    player: Vec<Option<ItemStack>>,
    positions: Vec<SlotPosition>,
    active_inputs: usize,
    active_outputs: usize,
}

impl Default for EditorMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorMenu {
    pub fn new() -> Self {
        let mut menu = Self {
            inputs: vec![None; MAX_INPUT_SLOTS],
            outputs: vec![None; MAX_OUTPUT_SLOTS],
            player: vec![None; PLAYER_INVENTORY_SLOTS + HOTBAR_SLOTS],
            positions: vec![SlotPosition::default(); TOTAL_SLOTS],
            active_inputs: 1,
            active_outputs: 1,
        };
        menu.configure_layout(&crate::plan_layout(""));
        menu
    }

    pub fn configure_layout(&mut self, layout: &LayoutConfig) {
        self.active_inputs = layout.active_input_slots().min(MAX_INPUT_SLOTS);
        self.active_outputs = layout.active_output_slots().min(MAX_OUTPUT_SLOTS);

        let input = clamp_columns(*layout.input(), MAX_INPUT_SLOTS);
        let output = clamp_columns(*layout.output(), MAX_OUTPUT_SLOTS);
        for i in 0..MAX_INPUT_SLOTS {
            self.positions[i] = grid_position(&input, i);
        }
        for i in 0..MAX_OUTPUT_SLOTS {
            self.positions[OUTPUT_START + i] = grid_position(&output, i);
        }
        for i in 0..PLAYER_INVENTORY_SLOTS {
            self.positions[PLAYER_START + i] = SlotPosition {
                x: PLAYER_SLOTS_X + (i % 9) as i32 * SLOT_SIZE,
                y: layout.player_inventory_y() + (i / 9) as i32 * SLOT_SIZE,
            };
        }
        for i in 0..HOTBAR_SLOTS {
            self.positions[PLAYER_START + PLAYER_INVENTORY_SLOTS + i] = SlotPosition {
                x: PLAYER_SLOTS_X + i as i32 * SLOT_SIZE,
                y: layout.hotbar_y(),
            };
        }
        log::debug!(
            "menu configured for {} inputs and {} outputs",
            self.active_inputs,
            self.active_outputs
        );
    }

    pub const fn size(&self) -> usize {
        TOTAL_SLOTS
    }

    pub fn active_input_slots(&self) -> usize {
        self.active_inputs
    }

    pub fn active_output_slots(&self) -> usize {
        self.active_outputs
    }

    pub fn position(&self, menu_slot: usize) -> Option<SlotPosition> {
        self.positions.get(menu_slot).copied()
    }

    /// Inactive recipe slots are hidden and refuse items.
    pub fn is_active(&self, menu_slot: usize) -> bool {
        match SlotKind::of(menu_slot) {
            Some(SlotKind::Input(i)) => i < self.active_inputs,
            Some(SlotKind::Output(i)) => i < self.active_outputs,
            Some(SlotKind::Inventory(_) | SlotKind::Hotbar(_)) => true,
            None => false,
        }
    }

    pub fn item(&self, menu_slot: usize) -> Option<&ItemStack> {
        self.slot_ref(menu_slot)?.as_ref()
    }

    pub fn set_item(
        &mut self,
        menu_slot: usize,
        item: Option<ItemStack>,
    ) -> Result<(), InventoryError> {
        if !self.is_active(menu_slot) {
            return Err(match SlotKind::of(menu_slot) {
                Some(_) => InventoryError::InactiveSlot(menu_slot),
                None => InventoryError::InvalidSlot(menu_slot),
            });
        }
        let slot = self
            .slot_mut(menu_slot)
            .ok_or(InventoryError::InvalidSlot(menu_slot))?;
        *slot = item;
        Ok(())
    }

    pub fn take_item(&mut self, menu_slot: usize) -> Result<Option<ItemStack>, InventoryError> {
        let slot = self
            .slot_mut(menu_slot)
            .ok_or(InventoryError::InvalidSlot(menu_slot))?;
        Ok(slot.take())
    }

    /// Active input slots, in grid order.
    pub fn input_items(&self) -> &[Option<ItemStack>] {
        &self.inputs[..self.active_inputs]
    }

    /// Active output slots, in grid order.
    pub fn output_items(&self) -> &[Option<ItemStack>] {
        &self.outputs[..self.active_outputs]
    }

    /// Empties the active input and output slots, the player's items stay.
    pub fn clear_recipe_slots(&mut self) {
        self.inputs[..self.active_inputs].fill(None);
        self.outputs[..self.active_outputs].fill(None);
    }

    /// Shift-click: recipe slots empty into the player's inventory (hotbar
    /// end first), player slots fill the active input slots.
    ///
    /// Returns a copy of the stack as it was before moving, or `None` if
    /// nothing could be moved.
    pub fn quick_move(&mut self, menu_slot: usize) -> Result<Option<ItemStack>, InventoryError> {
        let kind = SlotKind::of(menu_slot).ok_or(InventoryError::InvalidSlot(menu_slot))?;
        let Some(mut stack) = self.take_item(menu_slot)? else {
            return Ok(None);
        };
        let original = stack.clone();

        let moved = if kind.is_recipe_slot() {
            move_stack_into(&mut stack, &mut self.player, true)
        } else if self.active_inputs == 0 {
            false
        } else {
            move_stack_into(&mut stack, &mut self.inputs[..self.active_inputs], false)
        };

        if stack.count > 0 {
            if let Some(slot) = self.slot_mut(menu_slot) {
                *slot = Some(stack);
            }
        }
        Ok(moved.then_some(original))
    }

    fn slot_ref(&self, menu_slot: usize) -> Option<&Option<ItemStack>> {
        match SlotKind::of(menu_slot)? {
            SlotKind::Input(i) => self.inputs.get(i),
            SlotKind::Output(i) => self.outputs.get(i),
            SlotKind::Inventory(i) => self.player.get(i),
            SlotKind::Hotbar(i) => self.player.get(PLAYER_INVENTORY_SLOTS + i),
        }
    }

    fn slot_mut(&mut self, menu_slot: usize) -> Option<&mut Option<ItemStack>> {
        match SlotKind::of(menu_slot)? {
            SlotKind::Input(i) => self.inputs.get_mut(i),
            SlotKind::Output(i) => self.outputs.get_mut(i),
            SlotKind::Inventory(i) => self.player.get_mut(i),
            SlotKind::Hotbar(i) => self.player.get_mut(PLAYER_INVENTORY_SLOTS + i),
        }
    }
}

fn clamp_columns(grid: SlotGrid, capacity: usize) -> SlotGrid {
    SlotGrid {
        columns: grid.columns.clamp(1, capacity),
        ..grid
    }
}

fn grid_position(grid: &SlotGrid, index: usize) -> SlotPosition {
    let (x, y) = grid.position(index);
    SlotPosition { x, y }
}

/// Tops up stacks of the same item first, then fills empty slots. Returns
/// whether anything moved; `stack.count` is what is left over.
fn move_stack_into(stack: &mut ItemStack, targets: &mut [Option<ItemStack>], reverse: bool) -> bool {
    let start = stack.count;
    let order: Vec<usize> = if reverse {
        (0..targets.len()).rev().collect()
    } else {
        (0..targets.len()).collect()
    };

    for &i in &order {
        if stack.count == 0 {
            break;
        }
        if let Some(existing) = targets[i].as_mut() {
            if existing.is_same_item(stack) {
                let moved = existing.remaining_space().min(stack.count);
                existing.count += moved;
                stack.count -= moved;
            }
        }
    }
    for &i in &order {
        if stack.count == 0 {
            break;
        }
        if targets[i].is_none() {
            targets[i] = Some(stack.clone());
            stack.count = 0;
        }
    }
    stack.count != start
}
