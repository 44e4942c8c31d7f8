pub mod url_check;
pub mod white_label;
