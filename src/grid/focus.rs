//! Focus capability supplied by the hosting UI

use super::model::CellPosition;

/// How the grid asks its host to move keyboard focus
///
/// The navigation controller never knows how focus is rendered; it only calls
/// these hooks. Implementations must tolerate positions they cannot show.
pub trait FocusHost {
    /// Give keyboard focus to the cell
    fn focus(&mut self, pos: CellPosition);

    /// Scroll so the cell is inside the visible region
    fn scroll_into_view(&mut self, pos: CellPosition);

    /// Focus is leaving the grid via Tab (`backward` for Shift+Tab)
    fn leave_grid(&mut self, _backward: bool) {}
}
