pub mod backend;
pub mod cpu;
pub mod recorder;
pub mod surface;
pub(crate) mod text;
