//! Building blocks shared by every record module: identifiers, tenancy, field checks

mod company;
mod enums;
mod id;
pub mod validation;

pub use company::CompanyId;
pub(crate) use enums::string_enum;
pub(crate) use id::define_id;
