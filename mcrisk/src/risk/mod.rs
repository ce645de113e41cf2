pub mod analytic;
pub mod reduction;
