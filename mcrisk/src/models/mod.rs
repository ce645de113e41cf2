pub mod gbm;
pub mod randomnumbers;
