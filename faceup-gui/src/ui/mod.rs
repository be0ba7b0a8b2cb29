//! UI module organization for the faceup GUI.

pub mod preview;
pub mod status_bar;
