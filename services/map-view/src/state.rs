//! View state shared with the UI shell.

use capmap_common::Facility;

/// Lifecycle of the selected-isochrone source/layer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsochroneLayerState {
    /// No isochrone layer on the map.
    Absent,
    /// The layer shows the polygon for this facility name.
    Present(String),
}

/// Normalized facilities plus the current selection.
///
/// This is the boundary to the excluded UI shell: the facility slice feeds
/// list rendering, the selection feeds highlighting. The shell's selection
/// signal lands in [`select_from_list`](ViewState::select_from_list).
#[derive(Debug, Default)]
pub struct ViewState {
    facilities: Vec<Facility>,
    selected: Option<Facility>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the facility dataset.
    pub fn set_facilities(&mut self, facilities: Vec<Facility>) {
        self.facilities = facilities;
    }

    /// The normalized facility sequence, in display order.
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    /// Current selection. Never cleared automatically.
    pub fn selected_facility(&self) -> Option<&Facility> {
        self.selected.as_ref()
    }

    /// Record a selection made on the map.
    pub fn select(&mut self, facility: Facility) {
        self.selected = Some(facility);
    }

    /// Selection signal from the shell's list UI, by display index.
    ///
    /// Updates the selection slot only. Driving the map view (isochrone
    /// layer, popup) from a list selection is an integration point the
    /// caller has to wire; the original never did.
    pub fn select_from_list(&mut self, display_index: usize) -> Option<&Facility> {
        let facility = self
            .facilities
            .iter()
            .find(|f| f.display_index == display_index)?
            .clone();
        self.selected = Some(facility);
        self.selected.as_ref()
    }
}
