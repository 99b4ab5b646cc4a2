pub mod communication;
pub mod quiz;
pub mod result;
