pub mod builtin;
pub mod catalog;
pub mod scorer;
pub mod session;
