pub mod consulta;

pub use consulta::*;
