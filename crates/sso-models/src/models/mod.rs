//! Single Sign-On API request and response records

mod request_audit_read;
mod request_audit_read_seek;
mod response_access_many;
mod response_access_many_data;
mod response_openid_configuration;

pub use request_audit_read::RequestAuditRead;
pub use request_audit_read_seek::RequestAuditReadSeek;
pub use response_access_many::ResponseAccessMany;
pub use response_access_many_data::ResponseAccessManyData;
pub use response_openid_configuration::ResponseOpenidConfiguration;
