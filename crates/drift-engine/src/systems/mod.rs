pub mod connections;
pub mod render;
pub mod stepper;
