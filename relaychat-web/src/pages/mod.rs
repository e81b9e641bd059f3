mod channel;
mod error;
mod home;
mod login;

pub use channel::ChannelPage;
pub use error::ErrorPage;
pub use home::HomePage;
pub use login::LoginPage;
