mod login;

pub use login::{login, LoginData};
