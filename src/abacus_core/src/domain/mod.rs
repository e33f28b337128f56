pub mod calculation;
pub mod email;
pub mod full_name;
pub mod password;
pub mod user;
pub mod username;
