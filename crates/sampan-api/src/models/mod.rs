//! Request and response bodies for the auth endpoints.

mod code_login;
mod login_response;
mod phone_bind;
mod send_code;
mod user_info;
mod wx_login;

pub use code_login::CodeLoginRequestModel;
pub use login_response::LoginResponseModel;
pub use phone_bind::{PhoneBindRequestModel, PhoneBindResponseModel};
pub use send_code::SendCodeRequestModel;
pub use user_info::{Gender, UserInfoModel};
pub use wx_login::WxLoginRequestModel;
