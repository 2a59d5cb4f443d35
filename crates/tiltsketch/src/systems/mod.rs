pub mod debug;
pub mod vector;
