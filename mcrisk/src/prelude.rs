pub use crate::{
    models::{gbm::*, randomnumbers::*},
    risk::{analytic::*, reduction::*},
    simulation::{observer::*, parallel::*, partition::*},
    utils::errors::*,
};
