// Business pages: type, industry, know-your-business, address, owners

use super::applicant::fill_address;
use super::{Screen, WizardStep};
use crate::error::Result;
use crate::fixtures::{Address, Applicant};

const INDUSTRY_SEARCH: &[&str] = &[
    "input[name='industry']",
    "input[role='combobox']",
    "#industry-search",
];
const LEGAL_NAME: &[&str] = &["input[name='legalName']", "input[name='businessName']"];
const EIN: &[&str] = &["input[name='ein']", "#ein"];
const WEBSITE: &[&str] = &["input[name='website']", "input[type='url']"];
const SAME_AS_HOME: &[&str] = &[
    "input[name='sameAsHome']",
    "label:has-text(\"Same as home address\") input",
];
const OWNERSHIP: &[&str] = &["input[name='ownershipPercentage']", "#ownership"];
const SOLE_OWNER: &[&str] = &[
    "input[name='soleOwner']",
    "label:has-text(\"I am the only owner\") input",
];

/// Legal structure chosen on `/business-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessType {
    SoleProprietorship,
    Llc,
    Partnership,
    Corporation,
}

impl BusinessType {
    /// Label of the option card on the page
    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::SoleProprietorship => "Sole proprietorship",
            BusinessType::Llc => "LLC",
            BusinessType::Partnership => "Partnership",
            BusinessType::Corporation => "Corporation",
        }
    }

    /// Whether the wizard asks for an EIN instead of reusing the SSN
    pub fn requires_ein(&self) -> bool {
        !matches!(self, BusinessType::SoleProprietorship)
    }
}

/// Industry picked from the `/industry` search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Industry {
    Software,
    Retail,
    Consulting,
    Restaurants,
}

impl Industry {
    pub fn label(&self) -> &'static str {
        match self {
            Industry::Software => "Software",
            Industry::Retail => "Retail",
            Industry::Consulting => "Consulting",
            Industry::Restaurants => "Restaurants",
        }
    }
}

/// `/business-type`
pub struct BusinessTypePage {
    screen: Screen,
}

impl BusinessTypePage {
    pub const STEP: WizardStep = WizardStep::BusinessType;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn choose(&self, business_type: BusinessType) -> Result<()> {
        let label = business_type.label();
        let radio = format!("input[type='radio'][value='{}']", label);
        let card = format!("label:has-text(\"{}\")", label);
        let text = format!("text={}", label);
        self.screen
            .click(&[radio.as_str(), card.as_str(), text.as_str()])
            .await
    }

    pub async fn complete(&self, applicant: &Applicant) -> Result<()> {
        self.screen.wait_for(Self::STEP).await?;
        self.choose(applicant.business.business_type).await?;
        self.screen.submit().await?;
        self.screen.wait_for(WizardStep::Industry).await
    }
}

/// `/industry`
pub struct IndustryPage {
    screen: Screen,
}

impl IndustryPage {
    pub const STEP: WizardStep = WizardStep::Industry;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Types the industry into the search box and picks the matching option.
    pub async fn choose(&self, industry: Industry) -> Result<()> {
        let label = industry.label();
        self.screen.fill(INDUSTRY_SEARCH, label).await?;
        let option = format!("[role='option']:has-text(\"{}\")", label);
        let item = format!("li:has-text(\"{}\")", label);
        self.screen
            .click(&[option.as_str(), item.as_str()])
            .await
    }

    pub async fn complete(&self, applicant: &Applicant) -> Result<()> {
        self.screen.wait_for(Self::STEP).await?;
        self.choose(applicant.business.industry).await?;
        self.screen.submit().await?;
        self.screen.wait_for(WizardStep::KnowYourBusiness).await
    }
}

/// `/know-your-business`
pub struct KnowYourBusinessPage {
    screen: Screen,
}

impl KnowYourBusinessPage {
    pub const STEP: WizardStep = WizardStep::KnowYourBusiness;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn complete(&self, applicant: &Applicant) -> Result<()> {
        let business = &applicant.business;
        self.screen.wait_for(Self::STEP).await?;
        self.screen.fill(LEGAL_NAME, &business.legal_name).await?;
        if business.business_type.requires_ein() {
            self.screen.fill(EIN, &business.ein).await?;
        }
        self.screen.fill(WEBSITE, &business.website).await?;
        self.screen.submit().await?;
        self.screen.wait_for(WizardStep::BusinessAddress).await
    }
}

/// `/business-address`
pub struct BusinessAddressPage {
    screen: Screen,
}

impl BusinessAddressPage {
    pub const STEP: WizardStep = WizardStep::BusinessAddress;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn use_home_address(&self) -> Result<()> {
        self.screen.check(SAME_AS_HOME).await
    }

    pub async fn fill_address(&self, address: &Address) -> Result<()> {
        fill_address(&self.screen, address).await
    }

    /// Reuses the home address when it matches, otherwise types the
    /// business address.
    pub async fn complete(&self, applicant: &Applicant) -> Result<()> {
        self.screen.wait_for(Self::STEP).await?;
        if applicant.business.address == applicant.home_address {
            self.use_home_address().await?;
        } else {
            self.fill_address(&applicant.business.address).await?;
        }
        self.screen.submit().await?;
        self.screen.wait_for(WizardStep::OwnersCenter).await
    }
}

/// `/owners-center`
pub struct OwnersCenterPage {
    screen: Screen,
}

impl OwnersCenterPage {
    pub const STEP: WizardStep = WizardStep::OwnersCenter;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Declares the applicant as the sole, 100% owner.
    pub async fn declare_sole_owner(&self) -> Result<()> {
        self.screen.check(SOLE_OWNER).await?;
        if self.screen.is_shown(OWNERSHIP).await {
            self.screen.fill(OWNERSHIP, "100").await?;
        }
        Ok(())
    }

    pub async fn complete(&self) -> Result<()> {
        self.screen.wait_for(Self::STEP).await?;
        self.declare_sole_owner().await?;
        self.screen.submit().await?;
        self.screen.wait_for(WizardStep::PlanSelection).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_sole_proprietors_skip_ein() {
        assert!(!BusinessType::SoleProprietorship.requires_ein());
        assert!(BusinessType::Llc.requires_ein());
        assert!(BusinessType::Corporation.requires_ein());
    }
}
