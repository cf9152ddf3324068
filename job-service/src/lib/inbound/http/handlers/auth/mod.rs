pub mod forgot_password;
pub mod login;
pub mod reset_password;
pub mod signup;
