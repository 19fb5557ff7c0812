pub mod channel;
pub mod dashboard;
pub mod feed;
pub mod forgot_password;
pub mod home;
pub mod login;
pub mod playlists;
pub mod profile;
pub mod signup;
pub mod video;
