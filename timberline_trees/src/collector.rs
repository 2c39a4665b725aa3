// Item collector — a machine that vacuums nearby world items.
//
// Every `SCAN_INTERVAL` ticks the collector scans the host's item list
// and pulls active items within `SCAN_RANGE` world units into its bounded
// inventory, merging into existing stacks before opening new slots.
// Depleted world items are deactivated in place; the host reaps them.
//
// This is the framework's second, simpler subsystem: a plain polling loop
// with none of the tree system's combinatorial rules. The inventory
// persists through the host's tagged save container (`tag.rs`); the
// collector rebuilds everything else from its anchor tile.
//
// See also: `grid.rs` for the anchor-tile check, `tag.rs` for the save
// shape.

use crate::grid::TileGrid;
use crate::tag::{TagCompound, TagValue};
use crate::types::{ItemTypeId, TileCoord, TileTypeId};
use serde::{Deserialize, Serialize};

/// World units per tile.
pub const TILE_PIXELS: f32 = 16.0;
/// Pull radius in world units (10 tiles).
pub const SCAN_RANGE: f32 = 10.0 * TILE_PIXELS;
/// Ticks between scans.
pub const SCAN_INTERVAL: u32 = 30;
/// Inventory size of the collector machine.
pub const COLLECTOR_SLOTS: usize = 18;

/// A free-floating item in the host world.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldItem {
    pub kind: ItemTypeId,
    pub stack: u32,
    pub max_stack: u32,
    /// Center position in world units.
    pub position: [f32; 2],
    pub active: bool,
}

impl WorldItem {
    /// An item with nothing left in it; skipped by scans.
    pub fn is_air(&self) -> bool {
        self.stack == 0
    }
}

/// One occupied inventory slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemTypeId,
    pub stack: u32,
    pub max_stack: u32,
}

/// A fixed-size inventory with merge-then-empty insertion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemBuffer {
    slots: Vec<Option<ItemStack>>,
}

impl ItemBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Move as much of `item` as fits into the buffer: top up same-kind
    /// stacks first, then open empty slots. The source item's stack is
    /// decremented; a fully drained item is deactivated.
    pub fn insert(&mut self, item: &mut WorldItem) {
        // Merge phase.
        for slot in self.slots.iter_mut().flatten() {
            if item.stack == 0 {
                break;
            }
            if slot.kind != item.kind || slot.stack >= slot.max_stack {
                continue;
            }
            let moved = (slot.max_stack - slot.stack).min(item.stack);
            slot.stack += moved;
            item.stack -= moved;
        }
        // Empty-slot phase.
        for slot in self.slots.iter_mut() {
            if item.stack == 0 {
                break;
            }
            if slot.is_none() {
                let moved = item.stack.min(item.max_stack);
                *slot = Some(ItemStack {
                    kind: item.kind,
                    stack: moved,
                    max_stack: item.max_stack,
                });
                item.stack -= moved;
            }
        }
        if item.stack == 0 {
            item.active = false;
        }
    }

    /// Empty the buffer, returning its stacks (the on-kill drop path).
    pub fn drain(&mut self) -> Vec<ItemStack> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }

    /// Serialize occupied slots into the host save container.
    pub fn save(&self) -> TagCompound {
        let slots: Vec<TagValue> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|s| (i, *s)))
            .map(|(i, s)| {
                let mut tag = TagCompound::new();
                tag.set("slot", TagValue::Int(i as i64));
                tag.set("kind", TagValue::Int(s.kind.0 as i64));
                tag.set("stack", TagValue::Int(s.stack as i64));
                tag.set("max_stack", TagValue::Int(s.max_stack as i64));
                TagValue::Compound(tag)
            })
            .collect();
        let mut tag = TagCompound::new();
        tag.set("slots", TagValue::List(slots));
        tag
    }

    /// Restore buffer contents from a save container. Entries with a
    /// missing field or an out-of-range slot index are skipped — a save
    /// from a differently-sized machine degrades instead of failing.
    pub fn load(&mut self, tag: &TagCompound) {
        self.slots.fill(None);
        let Some(entries) = tag.get_list("slots") else {
            return;
        };
        for entry in entries {
            let TagValue::Compound(entry) = entry else {
                continue;
            };
            let (Some(slot), Some(kind), Some(stack), Some(max_stack)) = (
                entry.get_int("slot"),
                entry.get_int("kind"),
                entry.get_int("stack"),
                entry.get_int("max_stack"),
            ) else {
                continue;
            };
            let index = slot as usize;
            if index < self.slots.len() {
                self.slots[index] = Some(ItemStack {
                    kind: ItemTypeId(kind as u32),
                    stack: stack as u32,
                    max_stack: max_stack as u32,
                });
            }
        }
    }
}

/// The collector machine: an anchor tile, a scan timer, and the inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemCollector {
    /// Top-left tile of the machine's footprint.
    pub anchor: TileCoord,
    timer: u32,
    buffer: ItemBuffer,
}

impl ItemCollector {
    pub fn new(anchor: TileCoord) -> Self {
        Self {
            anchor,
            timer: 0,
            buffer: ItemBuffer::new(COLLECTOR_SLOTS),
        }
    }

    /// Center of the 2x2 machine in world units.
    fn center(&self) -> [f32; 2] {
        [
            self.anchor.x as f32 * TILE_PIXELS + TILE_PIXELS,
            self.anchor.y as f32 * TILE_PIXELS + TILE_PIXELS,
        ]
    }

    /// Per-tick host update. Scans at most once per `SCAN_INTERVAL`.
    pub fn update(&mut self, items: &mut [WorldItem]) {
        self.timer += 1;
        if self.timer < SCAN_INTERVAL {
            return;
        }
        self.timer = 0;

        let [cx, cy] = self.center();
        for item in items.iter_mut() {
            if !item.active || item.is_air() {
                continue;
            }
            let dx = item.position[0] - cx;
            let dy = item.position[1] - cy;
            if dx * dx + dy * dy > SCAN_RANGE * SCAN_RANGE {
                continue;
            }
            self.buffer.insert(item);
        }
    }

    /// Whether `coord` is the machine's anchor: an active collector tile
    /// carrying the footprint's origin frame.
    pub fn valid_anchor<G: TileGrid>(
        grid: &G,
        collector_tile: TileTypeId,
        coord: TileCoord,
    ) -> bool {
        let tile = grid.get(coord);
        tile.active && tile.tile_type == collector_tile && tile.frame_x == 0 && tile.frame_y == 0
    }

    pub fn buffer(&self) -> &ItemBuffer {
        &self.buffer
    }

    /// Empty the inventory for the host to drop on destruction.
    pub fn on_kill(&mut self) -> Vec<ItemStack> {
        self.buffer.drain()
    }

    pub fn save(&self) -> TagCompound {
        self.buffer.save()
    }

    pub fn load(&mut self, tag: &TagCompound) {
        self.buffer.load(tag);
    }
}
