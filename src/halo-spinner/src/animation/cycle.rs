//! Bookkeeping for the two alternating trail slots.

use halo_core::Color;

/// One of the two trail layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    A,
    B,
}

impl SlotId {
    /// Both slots, in index order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// The slot that is not `self`.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Position of the slot in per-slot arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Relative draw order of the two trail layers.
///
/// Both sit below the dot, which is drawn at z = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    Back,
    Front,
}

impl ZOrder {
    /// The layer z position for this order.
    pub const fn z_position(self) -> f32 {
        match self {
            Self::Back => 0.0,
            Self::Front => 1.0,
        }
    }
}

/// Mirror of the persisted values of one trail layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSlot {
    /// Persisted stroke color (transient cross-fades are not reflected).
    pub color: Color,
    /// Persisted stroke progress.
    pub progress: f32,
    pub z_order: ZOrder,
}

/// Result of one completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTransition {
    /// Slot whose animation just finished.
    pub finished: SlotId,
    /// Slot that animates next and is now in front.
    pub next: SlotId,
    /// Index of the trail color the next slot shows.
    pub color_index: usize,
}

/// Mutable runtime state of the trail cycle.
///
/// Created with color 0 and slot A active, A in front. After `k` completed
/// cycles over `n` colors the color index is `k mod n` and the active slot is
/// A for even `k`, B for odd `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailCycleState {
    color_index: usize,
    active: SlotId,
    slots: [TrailSlot; 2],
    completed: u64,
}

impl TrailCycleState {
    /// Creates the initial state with both slots showing `initial_color`, undrawn.
    pub fn new(initial_color: Color) -> Self {
        let slot = |z_order| TrailSlot {
            color: initial_color,
            progress: 0.0,
            z_order,
        };
        Self {
            color_index: 0,
            active: SlotId::A,
            slots: [slot(ZOrder::Front), slot(ZOrder::Back)],
            completed: 0,
        }
    }

    /// Index of the current trail color.
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Slot that is animating (or about to animate).
    pub fn active_slot(&self) -> SlotId {
        self.active
    }

    /// Number of completed cycles.
    pub fn completed_cycles(&self) -> u64 {
        self.completed
    }

    pub fn slot(&self, id: SlotId) -> &TrailSlot {
        &self.slots[id.index()]
    }

    pub fn slot_mut(&mut self, id: SlotId) -> &mut TrailSlot {
        &mut self.slots[id.index()]
    }

    /// Records that the active slot finished: advances the color index
    /// cyclically, flips the active slot and brings it to the front.
    ///
    /// `color_count` of zero leaves the index at 0.
    pub fn advance(&mut self, color_count: usize) -> CycleTransition {
        let finished = self.active;
        let next = finished.other();

        self.color_index = if color_count == 0 {
            0
        } else {
            (self.color_index + 1) % color_count
        };
        self.active = next;
        self.slot_mut(next).z_order = ZOrder::Front;
        self.slot_mut(finished).z_order = ZOrder::Back;
        self.completed += 1;

        CycleTransition {
            finished,
            next,
            color_index: self.color_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_count(state: &TrailCycleState) -> usize {
        SlotId::ALL
            .iter()
            .filter(|id| state.slot(**id).z_order == ZOrder::Front)
            .count()
    }

    #[test]
    fn test_initial_state() {
        let state = TrailCycleState::new(Color::RED);
        assert_eq!(state.color_index(), 0);
        assert_eq!(state.active_slot(), SlotId::A);
        assert_eq!(state.completed_cycles(), 0);
        assert_eq!(state.slot(SlotId::A).z_order, ZOrder::Front);
        assert_eq!(state.slot(SlotId::B).z_order, ZOrder::Back);
        assert_eq!(state.slot(SlotId::B).color, Color::RED);
        assert_eq!(state.slot(SlotId::B).progress, 0.0);
    }

    #[test]
    fn test_slot_helpers() {
        assert_eq!(SlotId::A.other(), SlotId::B);
        assert_eq!(SlotId::B.other(), SlotId::A);
        assert_eq!(SlotId::A.index(), 0);
        assert_eq!(SlotId::B.index(), 1);
        assert_eq!(ZOrder::Front.z_position(), 1.0);
        assert_eq!(ZOrder::Back.z_position(), 0.0);
    }

    #[test]
    fn test_advance_transition() {
        let mut state = TrailCycleState::new(Color::RED);
        let transition = state.advance(3);
        assert_eq!(
            transition,
            CycleTransition {
                finished: SlotId::A,
                next: SlotId::B,
                color_index: 1,
            }
        );
        assert_eq!(state.slot(SlotId::B).z_order, ZOrder::Front);
        assert_eq!(state.slot(SlotId::A).z_order, ZOrder::Back);
    }

    #[test]
    fn test_index_and_slot_after_k_cycles() {
        for n in 1..=5usize {
            let mut state = TrailCycleState::new(Color::BLACK);
            for k in 1..=20u64 {
                state.advance(n);
                assert_eq!(state.color_index(), (k as usize) % n);
                let expected = if k % 2 == 0 { SlotId::A } else { SlotId::B };
                assert_eq!(state.active_slot(), expected);
                assert_eq!(front_count(&state), 1);
                assert_eq!(state.slot(state.active_slot()).z_order, ZOrder::Front);
                assert_eq!(state.completed_cycles(), k);
            }
        }
    }

    #[test]
    fn test_advance_without_colors() {
        let mut state = TrailCycleState::new(Color::BLACK);
        assert_eq!(state.advance(0).color_index, 0);
        assert_eq!(state.advance(0).color_index, 0);
    }
}
