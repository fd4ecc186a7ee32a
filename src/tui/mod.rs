pub mod form;
pub mod navigation;
pub mod screens;
