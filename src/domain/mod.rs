//! Domain types shared by the computation and the boundary.

pub mod failure;
pub mod identifier;
pub mod ports;
pub mod record;
pub mod request;
pub mod response;
