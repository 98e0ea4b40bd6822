pub mod process;
pub mod receipts;
pub mod root;
pub mod upload;
pub mod validate;
