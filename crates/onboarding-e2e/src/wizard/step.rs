// Wizard steps and their URL checkpoints

use url::Url;

/// One page of the onboarding wizard, in the order the wizard visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Welcome,
    EmailVerification,
    PersonalDetails,
    Phone,
    Identity,
    HomeAddress,
    BusinessType,
    Industry,
    KnowYourBusiness,
    BusinessAddress,
    OwnersCenter,
    PlanSelection,
}

impl WizardStep {
    /// Every step in wizard order
    pub const ALL: [WizardStep; 12] = [
        WizardStep::Welcome,
        WizardStep::EmailVerification,
        WizardStep::PersonalDetails,
        WizardStep::Phone,
        WizardStep::Identity,
        WizardStep::HomeAddress,
        WizardStep::BusinessType,
        WizardStep::Industry,
        WizardStep::KnowYourBusiness,
        WizardStep::BusinessAddress,
        WizardStep::OwnersCenter,
        WizardStep::PlanSelection,
    ];

    /// URL path suffix identifying the step
    pub fn path(&self) -> &'static str {
        match self {
            WizardStep::Welcome => "/welcome",
            WizardStep::EmailVerification => "/email-verification",
            WizardStep::PersonalDetails => "/personal-details",
            WizardStep::Phone => "/phone",
            WizardStep::Identity => "/identity",
            WizardStep::HomeAddress => "/home-address",
            WizardStep::BusinessType => "/business-type",
            WizardStep::Industry => "/industry",
            WizardStep::KnowYourBusiness => "/know-your-business",
            WizardStep::BusinessAddress => "/business-address",
            WizardStep::OwnersCenter => "/owners-center",
            WizardStep::PlanSelection => "/plan-selection",
        }
    }

    /// Absolute URL of the step under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }

    /// True if `url`'s path ends with this step's path.
    ///
    /// Query strings, fragments and a trailing slash are ignored.
    pub fn matches(&self, url: &str) -> bool {
        url_path(url).trim_end_matches('/').ends_with(self.path())
    }

    /// The step a URL points at, if any.
    pub fn from_url(url: &str) -> Option<WizardStep> {
        Self::ALL.into_iter().find(|step| step.matches(url))
    }

    /// Position in wizard order, starting at 0
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|step| step == self)
            .unwrap_or_default()
    }

    /// The step the wizard moves to after this one
    pub fn next(&self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path().trim_start_matches('/'))
    }
}

/// Path component of `url`; bare relative paths are taken as-is.
fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_owned(),
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_owned()
        }
    }
}
