//! Page objects for the onboarding wizard.
//!
//! Each step of the wizard has one page object bundling its candidate
//! selectors and interaction helpers. Test specs drive them one after the
//! other; there is deliberately no "run the whole wizard" driver.

mod applicant;
mod business;
mod plan;
mod screen;
mod step;
mod welcome;

pub use applicant::{HomeAddressPage, IdentityPage, PersonalDetailsPage, PhonePage};
pub use business::{
    BusinessAddressPage, BusinessType, BusinessTypePage, Industry, IndustryPage,
    KnowYourBusinessPage, OwnersCenterPage,
};
pub use plan::{BillingCycle, Plan, PlanSelectionPage, Price, annual_is_discounted};
pub use screen::Screen;
pub use step::WizardStep;
pub use welcome::{EmailVerificationPage, WelcomePage};
