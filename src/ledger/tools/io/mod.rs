pub mod backup;
pub mod excel_read;
pub mod excel_write;
