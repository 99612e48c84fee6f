//! Unit selection and move orders.

use arena_core::constants::FORMATION_SPACING;
use arena_core::types::Vector2;

use crate::friendly::FriendlyId;
use crate::garrison::Garrison;

#[derive(Debug, Clone, Default)]
pub struct CommandSystem {
    selected: Vec<FriendlyId>,
}

impl CommandSystem {
    pub fn selected(&self) -> &[FriendlyId] {
        &self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Select the unit under `point`, replacing the current selection.
    /// Overlapping hits resolve to the closest unit centre.
    pub fn select_at(&mut self, garrison: &Garrison, point: Vector2) -> Option<FriendlyId> {
        self.selected.clear();
        let hit = garrison
            .friendlies()
            .iter()
            .map(|f| (f.position.distance_squared(point), f))
            .filter(|(d, f)| *d <= f.radius * f.radius)
            .min_by(|(da, a), (db, b)| da.total_cmp(db).then(a.id.cmp(&b.id)))
            .map(|(_, f)| f.id)?;
        self.selected.push(hit);
        Some(hit)
    }

    /// Select every unit whose centre lies in the rectangle spanned by `a`
    /// and `b`. Returns the selection size.
    pub fn select_in_rect(&mut self, garrison: &Garrison, a: Vector2, b: Vector2) -> usize {
        let min = a.min(b);
        let max = a.max(b);
        self.selected = garrison
            .friendlies()
            .iter()
            .filter(|f| f.position.cmpge(min).all() && f.position.cmple(max).all())
            .map(|f| f.id)
            .collect();
        self.selected.len()
    }

    /// Order selected mobile units to `target` in a grid formation.
    /// Static units ignore the order. Returns how many units were ordered.
    pub fn issue_move(&self, garrison: &mut Garrison, target: Vector2) -> usize {
        let movers: Vec<FriendlyId> = self
            .selected
            .iter()
            .copied()
            .filter(|id| garrison.get(*id).is_some_and(|f| f.is_mobile()))
            .collect();
        let offsets = formation_offsets(movers.len(), FORMATION_SPACING);
        for (id, offset) in movers.iter().zip(offsets) {
            if let Some(friendly) = garrison.get_mut(*id) {
                friendly.target_position = Some(target + offset);
            }
        }
        movers.len()
    }
}

/// Offsets for `count` units in a square-ish grid centred on the origin.
pub fn formation_offsets(count: usize, spacing: f64) -> Vec<Vector2> {
    if count == 0 {
        return Vec::new();
    }
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);
    let half_w = (cols - 1) as f64 / 2.0;
    let half_h = (rows - 1) as f64 / 2.0;
    (0..count)
        .map(|i| {
            let col = (i % cols) as f64;
            let row = (i / cols) as f64;
            Vector2::new((col - half_w) * spacing, (row - half_h) * spacing)
        })
        .collect()
}
