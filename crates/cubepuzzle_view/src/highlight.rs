use std::collections::HashMap;

use cubeprefs::HighlightPreferences;
use cubepuzzle_core::{Cube, MaterialId, PieceId, Rgb};

/// Temporarily tints pieces and restores their exact original colors
/// afterward.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HighlightManager {
    /// Color of each highlighted material from before it was highlighted.
    originals: HashMap<MaterialId, Rgb>,
}
impl HighlightManager {
    /// Constructs a highlight manager with nothing highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlights or unhighlights every material of `pieces`.
    ///
    /// A material's original color is only recorded the first time it is
    /// highlighted, so highlighting twice does not compound the tint.
    pub fn set_highlighted(
        &mut self,
        cube: &mut Cube,
        pieces: &[PieceId],
        on: bool,
        prefs: &HighlightPreferences,
    ) {
        let materials: Vec<MaterialId> = pieces
            .iter()
            .filter_map(|&id| cube.piece(id))
            .flat_map(|piece| piece.materials().map(|m| m.id))
            .collect();
        for id in materials {
            if on {
                let Some(current) = cube.material_color(id) else {
                    continue;
                };
                let original = *self.originals.entry(id).or_insert(current);
                cube.set_material_color(id, Rgb::mix(original, prefs.color, prefs.blend));
            } else if let Some(original) = self.originals.remove(&id) {
                cube.set_material_color(id, original);
            }
        }
    }

    /// Returns whether nothing is highlighted.
    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
    /// Returns the number of highlighted materials.
    pub fn len(&self) -> usize {
        self.originals.len()
    }
}
