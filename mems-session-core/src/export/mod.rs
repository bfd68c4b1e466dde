pub mod archive;
pub mod bundler;
pub mod csv;
pub mod info;
