pub mod regenerator;
