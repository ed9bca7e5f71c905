//! Domain models

pub mod application;
pub mod common;
pub mod company;
pub mod internship;

pub use application::{
    Application, ApplicationDetail, ApplicationStatus, CreateApplicationInput,
    UpdateApplicationInput,
};
pub use common::{Patch, StringUuid};
pub use company::{
    Company, CompanyDetail, CompanyStats, CompanyWithStats, CreateCompanyInput,
    UpdateCompanyInput, DEFAULT_PREFERRED_LOCATION,
};
pub use internship::{
    CreateInternshipInput, Internship, InternshipDetail, InternshipWithApplication,
    UpdateInternshipInput,
};
