pub mod consultor;
pub mod navegador;

pub use consultor::*;
pub use navegador::*;
