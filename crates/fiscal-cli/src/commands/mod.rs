pub mod nav;
pub mod preferences;
pub mod simulate;
