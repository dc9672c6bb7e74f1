pub mod dsa;
pub mod optical_network;
