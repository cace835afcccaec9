pub mod actividad;
pub mod usuario;
pub mod sesion;

pub use actividad::*;
pub use usuario::*;
pub use sesion::*;
