//! Company branding fields for the landing screen.

use velodash_api::types::CompanyResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInfo {
    pub name: String,
    pub slogan: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<CompanyResponse> for CompanyInfo {
    fn from(wire: CompanyResponse) -> Self {
        Self {
            name: wire.name,
            slogan: wire.slogan,
            phone: wire.phone,
            email: wire.email,
            address: wire.address,
        }
    }
}
