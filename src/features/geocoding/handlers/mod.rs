pub mod geocode_handler;

pub use geocode_handler::{__path_geocode, __path_reverse_geocode, geocode, reverse_geocode};
