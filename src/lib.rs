pub mod display;
pub mod igv;
pub mod utils;

pub use igv::IgvOptions;
