pub mod aggregate;
pub mod create;
pub mod info;
pub mod propose;
pub mod sign;
