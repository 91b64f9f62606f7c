pub mod pipe;
pub mod redirect;
pub mod status;
pub mod supervisor;
