pub mod build;
pub mod install;
pub mod push;
pub mod quality;
pub mod revendor;
pub mod test;
pub mod version;
