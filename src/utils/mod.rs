pub mod sort;
pub mod vector;
