mod device_get;
mod login_request;
mod login_response;

pub use device_get::DeviceGet;
pub use login_request::LoginRequest;
pub use login_response::LoginResponse;
