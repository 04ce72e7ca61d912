pub mod control;
pub mod creator;
pub mod execute;
