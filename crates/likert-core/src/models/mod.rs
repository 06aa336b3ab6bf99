pub mod item;
pub mod response;
pub mod session;
