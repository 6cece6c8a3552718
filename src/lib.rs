pub mod error;
pub mod transform;

pub mod io;
pub mod trajectory;

pub mod align;
pub mod kitti;
pub mod metrics;
mod optim;

#[cfg(test)]
mod unit_test;
