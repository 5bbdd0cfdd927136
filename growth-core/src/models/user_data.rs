use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Industry;

/// Business metrics collected across the survey steps.
///
/// Numeric fields start at zero and only mean something once every
/// step has been visited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    /// Selected business category, `None` until step one is answered.
    pub industry: Option<Industry>,

    /// Typical number of enquiries received per month.
    pub current_enquiries: Decimal,

    /// Revenue from one converted customer.
    pub avg_client_spend: Decimal,

    /// Percentage of enquiries that become customers, 0 to 100.
    pub conversion_rate: Decimal,

    /// Whether a customer's spend repeats every following month.
    pub is_recurring: bool,
}

/// A partial set of [`UserData`] fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDataUpdate {
    pub industry: Option<Industry>,
    pub current_enquiries: Option<Decimal>,
    pub avg_client_spend: Option<Decimal>,
    pub conversion_rate: Option<Decimal>,
    pub is_recurring: Option<bool>,
}

impl UserDataUpdate {
    pub fn industry(industry: Industry) -> Self {
        Self {
            industry: Some(industry),
            ..Default::default()
        }
    }

    pub fn current_enquiries(value: Decimal) -> Self {
        Self {
            current_enquiries: Some(value),
            ..Default::default()
        }
    }

    pub fn avg_client_spend(value: Decimal) -> Self {
        Self {
            avg_client_spend: Some(value),
            ..Default::default()
        }
    }

    pub fn conversion_rate(value: Decimal) -> Self {
        Self {
            conversion_rate: Some(value),
            ..Default::default()
        }
    }

    pub fn is_recurring(value: bool) -> Self {
        Self {
            is_recurring: Some(value),
            ..Default::default()
        }
    }
}

impl UserData {
    /// Overwrites every field that is set in `update`.
    pub fn apply(
        &mut self,
        update: UserDataUpdate,
    ) {
        if let Some(industry) = update.industry {
            self.industry = Some(industry);
        }
        if let Some(enquiries) = update.current_enquiries {
            self.current_enquiries = enquiries;
        }
        if let Some(spend) = update.avg_client_spend {
            self.avg_client_spend = spend;
        }
        if let Some(rate) = update.conversion_rate {
            self.conversion_rate = rate;
        }
        if let Some(recurring) = update.is_recurring {
            self.is_recurring = recurring;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_is_unselected_and_zeroed() {
        let data = UserData::default();

        assert_eq!(data.industry, None);
        assert_eq!(data.current_enquiries, Decimal::ZERO);
        assert_eq!(data.avg_client_spend, Decimal::ZERO);
        assert_eq!(data.conversion_rate, Decimal::ZERO);
        assert!(!data.is_recurring);
    }

    #[test]
    fn apply_only_touches_set_fields() {
        let mut data = UserData {
            current_enquiries: dec!(20),
            avg_client_spend: dec!(1400),
            ..Default::default()
        };

        data.apply(UserDataUpdate {
            avg_client_spend: Some(dec!(900)),
            is_recurring: Some(true),
            ..Default::default()
        });

        assert_eq!(data.current_enquiries, dec!(20));
        assert_eq!(data.avg_client_spend, dec!(900));
        assert!(data.is_recurring);
    }

    #[test]
    fn apply_empty_update_is_noop() {
        let mut data = UserData {
            industry: Some(Industry::Locksmith),
            conversion_rate: dec!(45),
            ..Default::default()
        };
        let before = data.clone();

        data.apply(UserDataUpdate::default());

        assert_eq!(data, before);
    }

    #[test]
    fn apply_can_turn_recurring_off_again() {
        let mut data = UserData::default();

        data.apply(UserDataUpdate::is_recurring(true));
        data.apply(UserDataUpdate::is_recurring(false));

        assert!(!data.is_recurring);
    }
}
