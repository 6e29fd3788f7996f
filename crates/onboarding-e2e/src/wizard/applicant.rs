// Applicant pages: personal details, phone, identity, home address

use super::{Screen, WizardStep};
use crate::error::Result;
use crate::fixtures::{Address, Applicant};

const FIRST_NAME: &[&str] = &["input[name='firstName']", "#first-name"];
const LAST_NAME: &[&str] = &["input[name='lastName']", "#last-name"];
const DATE_OF_BIRTH: &[&str] = &[
    "input[name='dateOfBirth']",
    "#dob",
    "input[placeholder='MM/DD/YYYY']",
];
const PHONE: &[&str] = &["input[name='phone']", "input[type='tel']"];
const SSN: &[&str] = &["input[name='ssn']", "#ssn", "input[name='taxId']"];
const ADDRESS_LINE1: &[&str] = &[
    "input[name='addressLine1']",
    "input[name='street']",
    "#address-line-1",
];
const CITY: &[&str] = &["input[name='city']", "#city"];
const STATE: &[&str] = &["select[name='state']", "#state"];
const ZIP: &[&str] = &["input[name='zip']", "input[name='postalCode']", "#zip"];

/// Fills a postal address block on the current page.
pub(crate) async fn fill_address(screen: &Screen, address: &Address) -> Result<()> {
    screen.fill(ADDRESS_LINE1, &address.line1).await?;
    screen.fill(CITY, &address.city).await?;
    screen.select_label(STATE, &address.state).await?;
    screen.fill(ZIP, &address.zip).await
}

/// `/personal-details`
pub struct PersonalDetailsPage {
    screen: Screen,
}

impl PersonalDetailsPage {
    pub const STEP: WizardStep = WizardStep::PersonalDetails;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn fill_name(&self, first: &str, last: &str) -> Result<()> {
        self.screen.fill(FIRST_NAME, first).await?;
        self.screen.fill(LAST_NAME, last).await
    }

    pub async fn fill_date_of_birth(&self, date: &str) -> Result<()> {
        self.screen.fill(DATE_OF_BIRTH, date).await
    }

    pub async fn complete(&self, applicant: &Applicant) -> Result<()> {
        self.screen.wait_for(Self::STEP).await?;
        self.fill_name(&applicant.first_name, &applicant.last_name)
            .await?;
        self.fill_date_of_birth(&applicant.date_of_birth).await?;
        self.screen.submit().await?;
        self.screen.wait_for(WizardStep::Phone).await
    }
}

/// `/phone`
pub struct PhonePage {
    screen: Screen,
}

impl PhonePage {
    pub const STEP: WizardStep = WizardStep::Phone;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn fill_phone(&self, phone: &str) -> Result<()> {
        self.screen.fill(PHONE, phone).await
    }

    pub async fn complete(&self, applicant: &Applicant) -> Result<()> {
        self.screen.wait_for(Self::STEP).await?;
        self.fill_phone(&applicant.phone).await?;
        self.screen.submit().await?;
        self.screen.wait_for(WizardStep::Identity).await
    }
}

/// `/identity`
pub struct IdentityPage {
    screen: Screen,
}

impl IdentityPage {
    pub const STEP: WizardStep = WizardStep::Identity;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn fill_ssn(&self, ssn: &str) -> Result<()> {
        self.screen.fill(SSN, ssn).await
    }

    pub async fn complete(&self, applicant: &Applicant) -> Result<()> {
        self.screen.wait_for(Self::STEP).await?;
        self.fill_ssn(&applicant.ssn).await?;
        self.screen.submit().await?;
        self.screen.wait_for(WizardStep::HomeAddress).await
    }
}

/// `/home-address`
pub struct HomeAddressPage {
    screen: Screen,
}

impl HomeAddressPage {
    pub const STEP: WizardStep = WizardStep::HomeAddress;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn fill_address(&self, address: &Address) -> Result<()> {
        fill_address(&self.screen, address).await
    }

    pub async fn complete(&self, applicant: &Applicant) -> Result<()> {
        self.screen.wait_for(Self::STEP).await?;
        self.fill_address(&applicant.home_address).await?;
        self.screen.submit().await?;
        self.screen.wait_for(WizardStep::BusinessType).await
    }
}
