//=========================================================================
// UI Views
//=========================================================================
//
// View-model widgets the facade owns.
//
// Rendering is a host concern; these views hold exactly the state a
// renderer would draw (visibility, displayed values, transient
// messages), mutated only through the facade's show/hide pass-throughs.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camp_info;
pub mod pause;
pub mod soldier_info;
pub mod status;

//=== UiView ==============================================================

/// Lifecycle shared by the facade-owned views. Both hooks default to
/// no-ops; the status view uses `update` for message expiry.
pub trait UiView {
    fn update(&mut self) {}

    fn release(&mut self) {}
}
