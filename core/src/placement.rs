/// A rule deciding where drawn numbers may be placed on a row of slots.
///
/// Slots are `None` while empty and hold the placed value otherwise.
pub trait PlacementRule {
    /// Whether `value` at `index` is consistent with everything already placed.
    fn is_valid_placement(&self, positions: &[Option<u32>], index: usize, value: u32) -> bool;

    /// Whether at least one empty slot could still accept `next_value`.
    fn can_place_next(&self, positions: &[Option<u32>], next_value: u32) -> bool;
}

/// Placed values must read in ascending order from the first slot to the last.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AscendingPlacement;

impl PlacementRule for AscendingPlacement {
    fn is_valid_placement(&self, positions: &[Option<u32>], index: usize, value: u32) -> bool {
        positions
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|placed| (i, placed)))
            .all(|(i, placed)| {
                let invalid_before = i < index && placed > value;
                let invalid_after = i > index && placed < value;
                !(invalid_before || invalid_after)
            })
    }

    fn can_place_next(&self, positions: &[Option<u32>], next_value: u32) -> bool {
        positions.iter().enumerate().any(|(i, slot)| {
            if slot.is_some() {
                return false;
            }

            let left = positions[..i].iter().rev().find_map(|&slot| slot);
            let right = positions[i + 1..].iter().find_map(|&slot| slot);

            left.is_none_or(|left| left < next_value) && right.is_none_or(|right| next_value < right)
        })
    }
}
