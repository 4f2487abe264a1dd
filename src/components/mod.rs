pub mod charts;
pub mod selector;
