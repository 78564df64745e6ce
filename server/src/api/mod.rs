pub mod health;
pub mod signup;
pub mod verify;
