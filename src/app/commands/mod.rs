pub mod activity;
pub mod quiz;
pub mod run;
pub mod tasks;
