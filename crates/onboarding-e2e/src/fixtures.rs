// Applicant test data
//
// Every run uses a fresh disposable address so the inbox search only ever
// sees this run's verification email.

use crate::wizard::{BusinessType, Industry};
use rand::Rng;
use rand::seq::SliceRandom;

const FIRST_NAMES: &[&str] = &["Avery", "Jordan", "Morgan", "Riley", "Casey", "Quinn"];
const LAST_NAMES: &[&str] = &["Fuller", "Nakamura", "Okafor", "Lindqvist", "Reyes", "Patel"];

/// Prefix shared by every generated inbox name
pub const EMAIL_PREFIX_STEM: &str = "Filler";

/// Postal address used for home and business steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub line1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            line1: "123 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
        }
    }
}

/// Business details for the know-your-business steps.
#[derive(Debug, Clone)]
pub struct Business {
    pub legal_name: String,
    pub business_type: BusinessType,
    pub industry: Industry,
    pub ein: String,
    pub website: String,
    pub address: Address,
}

/// One applicant walking through the wizard.
#[derive(Debug, Clone)]
pub struct Applicant {
    /// Local part of the disposable address, e.g. `Filler4821`
    pub email_prefix: String,
    pub first_name: String,
    pub last_name: String,
    /// `MM/DD/YYYY`
    pub date_of_birth: String,
    /// Ten digits, no punctuation
    pub phone: String,
    /// Nine digits, no punctuation
    pub ssn: String,
    pub home_address: Address,
    pub business: Business,
}

impl Applicant {
    /// Random applicant with a sole proprietorship.
    pub fn random() -> Self {
        Self::random_with(BusinessType::SoleProprietorship)
    }

    /// Random applicant whose business has `business_type`.
    pub fn random_with(business_type: BusinessType) -> Self {
        let mut rng = rand::thread_rng();
        let first_name = FIRST_NAMES
            .choose(&mut rng)
            .copied()
            .unwrap_or("Avery")
            .to_string();
        let last_name = LAST_NAMES
            .choose(&mut rng)
            .copied()
            .unwrap_or("Fuller")
            .to_string();

        Self {
            email_prefix: random_email_prefix(&mut rng),
            date_of_birth: format!(
                "{:02}/{:02}/{}",
                rng.gen_range(1..=12),
                rng.gen_range(1..=28),
                rng.gen_range(1960..=2000)
            ),
            // 555-01xx numbers are reserved for fiction
            phone: format!("312555{:04}", rng.gen_range(100..200)),
            ssn: format!("666{:06}", rng.gen_range(0..1_000_000)),
            home_address: Address::default(),
            business: Business {
                legal_name: format!("{} {} Holdings", first_name, last_name),
                business_type,
                industry: Industry::Software,
                ein: format!("{:09}", rng.gen_range(100_000_000..1_000_000_000u64)),
                website: format!("https://{}.example.com", last_name.to_ascii_lowercase()),
                address: Address {
                    line1: "500 Commerce Ave".to_string(),
                    ..Address::default()
                },
            },
            first_name,
            last_name,
        }
    }

    /// Full address at the disposable inbox domain.
    pub fn email(&self, domain: &str) -> String {
        format!("{}@{}", self.email_prefix, domain)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn random_email_prefix<R: Rng>(rng: &mut R) -> String {
    format!("{}{:04}", EMAIL_PREFIX_STEM, rng.gen_range(0..10_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_prefix_shape() {
        let applicant = Applicant::random();
        let digits = applicant
            .email_prefix
            .strip_prefix(EMAIL_PREFIX_STEM)
            .unwrap();
        assert_eq!(digits.len(), 4);
        assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(
            applicant.email("mailinator.com"),
            format!("{}@mailinator.com", applicant.email_prefix)
        );
    }

    #[test]
    fn test_generated_fields_are_well_formed() {
        let applicant = Applicant::random_with(BusinessType::Llc);
        assert_eq!(applicant.phone.len(), 10);
        assert_eq!(applicant.ssn.len(), 9);
        assert_eq!(applicant.business.ein.len(), 9);
        assert_eq!(applicant.date_of_birth.len(), 10);
        assert_eq!(applicant.business.business_type, BusinessType::Llc);
    }
}
