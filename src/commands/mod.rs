pub mod clip;
pub mod ls;
pub mod show;
