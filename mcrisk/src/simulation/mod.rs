pub mod observer;
pub mod parallel;
pub mod partition;
