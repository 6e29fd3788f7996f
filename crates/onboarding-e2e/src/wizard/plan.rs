// Plan selection: the last wizard step

use super::{BusinessType, Screen, WizardStep};
use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// `$1,234.50` with optional cents
static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\s*([0-9]+(?:,[0-9]{3})*)(?:\.([0-9]{2}))?")
        .expect("price pattern is valid")
});

const ANNUAL_TOGGLE: &[&str] = &[
    "button[role='switch'][aria-label*='nnual']",
    "button:has-text(\"Annual\")",
    "text=Annual",
];
const MONTHLY_TOGGLE: &[&str] = &[
    "button[role='switch'][aria-label*='onthly']",
    "button:has-text(\"Monthly\")",
    "text=Monthly",
];
const CONFIRM: &[&str] = &[
    "button:has-text(\"Open account\")",
    "button:has-text(\"Confirm\")",
    "button[type='submit']",
];

/// Account plans offered at the end of onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plan {
    Essential,
    Plus,
    Premium,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Essential, Plan::Plus, Plan::Premium];

    pub fn label(&self) -> &'static str {
        match self {
            Plan::Essential => "Essential",
            Plan::Plus => "Plus",
            Plan::Premium => "Premium",
        }
    }

    /// The plan the wizard pre-highlights for a business type.
    pub fn recommended_for(business_type: BusinessType) -> Plan {
        match business_type {
            BusinessType::SoleProprietorship => Plan::Essential,
            BusinessType::Llc | BusinessType::Partnership => Plan::Plus,
            BusinessType::Corporation => Plan::Premium,
        }
    }

    /// Whether the plan is free on monthly billing
    pub fn is_free(&self) -> bool {
        matches!(self, Plan::Essential)
    }

    fn card(&self) -> [String; 2] {
        [
            format!("[data-plan='{}']", self.label().to_ascii_lowercase()),
            format!("section:has(h3:has-text(\"{}\"))", self.label()),
        ]
    }
}

/// Billing cadence toggle on the plan page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BillingCycle {
    Monthly,
    Annual,
}

/// A price as displayed on a plan card, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price {
    pub cents: u64,
}

impl Price {
    /// Parses the first dollar amount in `text`; "Free" is zero.
    pub fn parse(text: &str) -> Option<Price> {
        if let Some(caps) = PRICE_PATTERN.captures(text) {
            let dollars: u64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
            let cents: u64 = match caps.get(2) {
                Some(c) => c.as_str().parse().ok()?,
                None => 0,
            };
            return Some(Price {
                cents: dollars.checked_mul(100)?.checked_add(cents)?,
            });
        }
        if text.to_ascii_lowercase().contains("free") {
            return Some(Price { cents: 0 });
        }
        None
    }

    /// The same spend expressed per month.
    pub fn monthly_equivalent(&self, cycle: BillingCycle) -> Price {
        match cycle {
            BillingCycle::Monthly => *self,
            BillingCycle::Annual => Price {
                cents: self.cents / 12,
            },
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

/// Annual billing must never cost more than twelve months of monthly billing.
pub fn annual_is_discounted(monthly: Price, annual: Price) -> bool {
    annual.cents <= monthly.cents.saturating_mul(12)
}

/// `/plan-selection`
pub struct PlanSelectionPage {
    screen: Screen,
}

impl PlanSelectionPage {
    pub const STEP: WizardStep = WizardStep::PlanSelection;

    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub async fn set_billing(&self, cycle: BillingCycle) -> Result<()> {
        match cycle {
            BillingCycle::Monthly => self.screen.click(MONTHLY_TOGGLE).await,
            BillingCycle::Annual => self.screen.click(ANNUAL_TOGGLE).await,
        }
    }

    /// Price shown on `plan`'s card for the current billing cycle.
    pub async fn price_of(&self, plan: Plan) -> Result<Price> {
        let [data, section] = plan.card();
        let price_data = format!("{} [data-testid='price']", data);
        let price_section = format!("{} .price", section);
        let text = self
            .screen
            .text(&[price_data.as_str(), price_section.as_str()])
            .await?;
        Price::parse(&text).ok_or_else(|| {
            Error::UnexpectedContent(format!("no price in '{}' for {}", text, plan.label()))
        })
    }

    /// The plan whose card carries the "Recommended" badge.
    pub async fn highlighted(&self) -> Result<Option<Plan>> {
        for plan in Plan::ALL {
            let [data, section] = plan.card();
            let badge_data = format!("{} :text(\"Recommended\")", data);
            let badge_section = format!("{} :text(\"Recommended\")", section);
            if self
                .screen
                .is_shown(&[badge_data.as_str(), badge_section.as_str()])
                .await
            {
                return Ok(Some(plan));
            }
        }
        Ok(None)
    }

    pub async fn choose(&self, plan: Plan) -> Result<()> {
        let [data, section] = plan.card();
        let button_data = format!("{} button", data);
        let button_section = format!("{} button:has-text(\"Select\")", section);
        self.screen
            .click(&[button_data.as_str(), button_section.as_str()])
            .await
    }

    /// Picks `plan` on `cycle` and confirms; returns the price shown.
    pub async fn complete(&self, plan: Plan, cycle: BillingCycle) -> Result<Price> {
        self.screen.wait_for(Self::STEP).await?;
        self.set_billing(cycle).await?;
        let price = self.price_of(plan).await?;
        tracing::info!(plan = plan.label(), ?cycle, %price, "selecting plan");
        self.choose(plan).await?;
        self.screen.click(CONFIRM).await?;
        Ok(price)
    }
}
