pub mod artifacts;
pub mod form;
pub mod request;
pub mod response;
