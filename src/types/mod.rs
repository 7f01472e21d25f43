pub mod observation;
pub mod period;
pub mod season;
