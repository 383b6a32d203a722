pub mod dataset;
pub mod decode;
